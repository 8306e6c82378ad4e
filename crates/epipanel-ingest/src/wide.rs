//! Loading of the wide cumulative-count tables.

use std::io::Read;

use epipanel_model::{IdentifierKind, Metric, PanelError, WideRow, WideSeriesTable};
use tracing::{debug, warn};

use crate::csv_table::{CsvTable, read_csv_table};
use crate::error::Result;
use crate::numeric::{CountCell, parse_count};

/// Read a wide cumulative-count CSV for `metric`.
pub fn read_wide_table<R: Read>(
    reader: R,
    metric: Metric,
    source_name: &str,
) -> Result<WideSeriesTable> {
    let table = read_csv_table(reader, source_name)?;
    wide_table_from_csv(&table, metric)
}

/// Split a raw CSV into identifier columns and date columns.
///
/// The leading run of recognized identifier headers (`Province/State`,
/// `Country/Region`, `Lat`, `Long`) are identifiers; every later column is a
/// date column. Date headers are kept verbatim and parsed by the reshaper.
pub fn wide_table_from_csv(table: &CsvTable, metric: Metric) -> Result<WideSeriesTable> {
    if table.headers.is_empty() {
        return Err(PanelError::empty_table(metric.as_str(), "no columns").into());
    }
    let identifier_count = table
        .headers
        .iter()
        .take_while(|header| IdentifierKind::classify(header).is_some())
        .count();
    let (identifiers, dates) = table.headers.split_at(identifier_count);
    let mut wide = WideSeriesTable::new(metric, identifiers.to_vec(), dates.to_vec())?;
    let country_index = wide.country_index();

    let mut skipped = 0usize;
    for (row_idx, cells) in table.rows.iter().enumerate() {
        if cells[country_index].is_empty() {
            skipped += 1;
            continue;
        }
        let mut values = Vec::with_capacity(dates.len());
        for (offset, header) in dates.iter().enumerate() {
            let raw = &cells[identifier_count + offset];
            match parse_count(raw) {
                CountCell::Unset => values.push(None),
                CountCell::Value(value) => values.push(Some(value)),
                CountCell::Invalid => {
                    return Err(PanelError::InvalidCell {
                        table: metric.to_string(),
                        row: row_idx + 1,
                        column: header.clone(),
                        value: raw.clone(),
                    }
                    .into());
                }
            }
        }
        wide.push_row(WideRow {
            identifiers: cells[..identifier_count].to_vec(),
            values,
        })?;
    }

    if skipped > 0 {
        warn!(metric = %metric, rows = skipped, "rows without a country were skipped");
    }
    if wide.is_empty() {
        return Err(PanelError::empty_table(metric.as_str(), "no rows").into());
    }
    debug!(
        metric = %metric,
        rows = wide.rows.len(),
        date_columns = wide.date_headers.len(),
        "wide table loaded"
    );
    Ok(wide)
}
