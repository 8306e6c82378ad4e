//! Raw CSV reading into a header + string-cell table.

use std::io::Read;

use csv::ReaderBuilder;
use tracing::warn;

use crate::error::{IngestError, Result};

/// A CSV file as trimmed string cells, with one normalized header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Position of a column, matched case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    /// Cell at `(row, column)`, or an empty string for short rows.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read CSV bytes with a single header row.
///
/// Blank lines are skipped and short rows are padded to the header width.
/// `source_name` is used in error messages only.
pub fn read_csv_table<R: Read>(reader: R, source_name: &str) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = reader.records();

    let headers: Vec<String> = loop {
        match records.next() {
            None => {
                return Ok(CsvTable {
                    headers: Vec::new(),
                    rows: Vec::new(),
                });
            }
            Some(record) => {
                let record = record.map_err(|error| csv_error(source_name, &error))?;
                let row: Vec<String> = record.iter().map(normalize_header).collect();
                if row.iter().all(String::is_empty) {
                    continue;
                }
                break row;
            }
        }
    };

    let mut rows = Vec::new();
    let mut overlong = 0usize;
    for record in records {
        let record = record.map_err(|error| csv_error(source_name, &error))?;
        let mut row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        if row.len() > headers.len() {
            overlong += 1;
            row.truncate(headers.len());
        }
        row.resize(headers.len(), String::new());
        rows.push(row);
    }
    if overlong > 0 {
        warn!(
            source = %source_name,
            rows = overlong,
            "rows with more cells than headers were truncated"
        );
    }
    Ok(CsvTable { headers, rows })
}

fn csv_error(source_name: &str, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        source_name: source_name.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_pads_rows() {
        let input = "\u{feff}Province/State, Country/Region ,1/22/20\n,Afghanistan,0\n\n\"Hubei\",China\n";
        let table = read_csv_table(input.as_bytes(), "inline").expect("read csv");
        assert_eq!(table.headers, vec!["Province/State", "Country/Region", "1/22/20"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["Hubei", "China", ""]);
        assert_eq!(table.column_index("country/region"), Some(1));
        assert_eq!(table.cell(0, 2), "0");
        assert_eq!(table.cell(9, 0), "");
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = read_csv_table("".as_bytes(), "inline").expect("read csv");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}
