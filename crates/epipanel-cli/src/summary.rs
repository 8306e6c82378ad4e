use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use epipanel_cli::types::{BuildResult, CountrySummary};
use epipanel_transform::CountryAliasMap;

pub fn print_build_summary(result: &BuildResult) {
    match result.panel.max_date {
        Some(date) => println!("Latest date: {date}"),
        None => println!("Latest date: -"),
    }
    match &result.outputs {
        Some(paths) => {
            for path in paths.iter() {
                println!("Wrote: {}", path.display());
            }
        }
        None => println!("Dry run: no files written"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Country"),
        header_cell("Source name"),
        header_cell("Rows"),
        header_cell("From"),
        header_cell("To"),
        header_cell("Cases"),
        header_cell("Deaths"),
        header_cell("Fully vaccinated %"),
        header_cell("No rate"),
    ]);
    apply_summary_table_style(&mut table);
    for index in [2, 5, 6, 7, 8] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in result.country_summaries() {
        table.add_row(summary_row(&summary));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.panel.rows.len()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    if !result.diagnostics.is_empty() {
        eprintln!("Warnings:");
        for warning in &result.diagnostics.warnings {
            eprintln!("- {warning}");
        }
    }
    println!("Finished in {:.2}s", result.duration.as_secs_f64());
}

fn summary_row(summary: &CountrySummary) -> Vec<Cell> {
    let country = if summary.rows == 0 {
        Cell::new(&summary.canonical).fg(Color::Yellow)
    } else {
        Cell::new(&summary.canonical)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    };
    let source_name = if summary.source_name == summary.canonical {
        dim_cell("-")
    } else {
        Cell::new(&summary.source_name)
    };
    vec![
        country,
        source_name,
        Cell::new(summary.rows),
        optional_cell(summary.first_date),
        optional_cell(summary.last_date),
        optional_cell(summary.total_cases),
        optional_cell(summary.total_deaths),
        optional_cell(summary.vaccination_rate.map(|rate| format!("{rate:.2}"))),
        if summary.undefined_rates == 0 {
            dim_cell("-")
        } else {
            Cell::new(summary.undefined_rates).fg(Color::Yellow)
        },
    ]
}

pub fn print_aliases(aliases: &CountryAliasMap) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Cumulative source"),
        header_cell("Rate source"),
    ]);
    apply_table_style(&mut table);
    for (source, canonical) in aliases.iter() {
        table.add_row(vec![source, canonical]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
