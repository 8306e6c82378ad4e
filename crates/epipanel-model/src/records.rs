//! Source-side record shapes: the wide cumulative matrix, its long projection,
//! and the long rate-source records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PanelError, Result};
use crate::keyed::Keyed;
use crate::metric::Metric;

/// Role of an identifier column in the wide layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Region,
    Country,
    Latitude,
    Longitude,
}

impl IdentifierKind {
    /// Classify a wide-table header, case-insensitively.
    ///
    /// Returns `None` for headers that are not identifier columns (dates).
    pub fn classify(header: &str) -> Option<Self> {
        let normalized = header.trim().to_ascii_lowercase().replace(' ', "_");
        match normalized.as_str() {
            "province/state" | "province_state" | "province" | "state" => Some(Self::Region),
            "country/region" | "country_region" | "country" => Some(Self::Country),
            "lat" | "latitude" => Some(Self::Latitude),
            "long" | "long_" | "lon" | "longitude" => Some(Self::Longitude),
            _ => None,
        }
    }
}

/// One geographic row of a wide table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideRow {
    /// Identifier cells in `WideSeriesTable::identifier_columns` order.
    pub identifiers: Vec<String>,
    /// One cumulative value per date column; `None` for an empty cell.
    pub values: Vec<Option<i64>>,
}

/// Wide cumulative-count table: identifier columns followed by one column per date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideSeriesTable {
    pub metric: Metric,
    pub identifier_columns: Vec<String>,
    /// Raw date column headers, in source order.
    pub date_headers: Vec<String>,
    pub rows: Vec<WideRow>,
    country_index: usize,
}

impl WideSeriesTable {
    /// Create an empty table, locating the country identifier column.
    pub fn new(
        metric: Metric,
        identifier_columns: Vec<String>,
        date_headers: Vec<String>,
    ) -> Result<Self> {
        let country_index = identifier_columns
            .iter()
            .position(|header| IdentifierKind::classify(header) == Some(IdentifierKind::Country))
            .ok_or_else(|| PanelError::MissingColumn {
                table: metric.to_string(),
                column: "Country/Region".to_string(),
            })?;
        Ok(Self {
            metric,
            identifier_columns,
            date_headers,
            rows: Vec::new(),
            country_index,
        })
    }

    /// Index of the country column within the identifier columns.
    pub fn country_index(&self) -> usize {
        self.country_index
    }

    /// Check that `row` has one cell per identifier column and per date column.
    ///
    /// `row_number` is 1-based and only used in the error.
    pub fn check_row(&self, row_number: usize, row: &WideRow) -> Result<()> {
        let ragged = |cells, expected, found| PanelError::RaggedRow {
            table: self.metric.to_string(),
            row: row_number,
            cells,
            expected,
            found,
        };
        if row.identifiers.len() != self.identifier_columns.len() {
            return Err(ragged(
                "identifier",
                self.identifier_columns.len(),
                row.identifiers.len(),
            ));
        }
        if row.values.len() != self.date_headers.len() {
            return Err(ragged("value", self.date_headers.len(), row.values.len()));
        }
        Ok(())
    }

    /// Append a row after checking its shape.
    pub fn push_row(&mut self, row: WideRow) -> Result<()> {
        self.check_row(self.rows.len() + 1, &row)?;
        self.rows.push(row);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A parsed date column: the calendar date and the header it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    pub header: String,
}

/// One (row, date column) cell of a wide table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRecord {
    /// 0-based index of the source row in its wide table.
    pub row: usize,
    pub country_key: String,
    /// All identifier cells of the source row, untouched.
    pub identifiers: Vec<String>,
    pub date: NaiveDate,
    pub metric: Metric,
    pub value: Option<i64>,
}

/// Country-level cumulative value after sub-national rows are summed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCount {
    pub country: String,
    pub date: NaiveDate,
    pub value: Option<i64>,
}

impl Keyed for CountryCount {
    fn country(&self) -> &str {
        &self.country
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Per-country-per-day record of the rate source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSourceRecord {
    pub location_key: String,
    pub date: NaiveDate,
    pub total_vaccinations: Option<i64>,
    pub people_fully_vaccinated: Option<i64>,
    pub population: Option<i64>,
    pub region_code: String,
}

impl Keyed for RateSourceRecord {
    fn country(&self) -> &str {
        &self.location_key
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_identifier_headers() {
        assert_eq!(
            IdentifierKind::classify("Province/State"),
            Some(IdentifierKind::Region)
        );
        assert_eq!(
            IdentifierKind::classify("country/region"),
            Some(IdentifierKind::Country)
        );
        assert_eq!(
            IdentifierKind::classify("Long_"),
            Some(IdentifierKind::Longitude)
        );
        assert_eq!(IdentifierKind::classify("1/22/20"), None);
    }

    #[test]
    fn wide_table_requires_country_column() {
        let err = WideSeriesTable::new(
            Metric::Cases,
            vec!["Province/State".to_string(), "Lat".to_string()],
            vec!["1/22/20".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, PanelError::MissingColumn { .. }));

        let table = WideSeriesTable::new(
            Metric::Cases,
            vec!["Province/State".to_string(), "Country/Region".to_string()],
            vec!["1/22/20".to_string()],
        )
        .expect("table");
        assert_eq!(table.country_index(), 1);
        assert!(table.is_empty());
    }

    #[test]
    fn push_row_rejects_ragged_rows() {
        let mut table = WideSeriesTable::new(
            Metric::Deaths,
            vec!["Province/State".to_string(), "Country/Region".to_string()],
            vec!["1/22/20".to_string(), "1/23/20".to_string(), "1/24/20".to_string()],
        )
        .expect("table");

        let err = table
            .push_row(WideRow {
                identifiers: vec![String::new(), "A".to_string()],
                values: vec![Some(1)],
            })
            .unwrap_err();
        assert!(matches!(
            err,
            PanelError::RaggedRow { row: 1, cells: "value", expected: 3, found: 1, .. }
        ));

        let err = table
            .push_row(WideRow {
                identifiers: vec!["A".to_string()],
                values: vec![Some(1), Some(2), Some(3)],
            })
            .unwrap_err();
        assert!(matches!(
            err,
            PanelError::RaggedRow { cells: "identifier", expected: 2, found: 1, .. }
        ));
        assert!(table.is_empty());

        table
            .push_row(WideRow {
                identifiers: vec![String::new(), "A".to_string()],
                values: vec![Some(1), None, Some(3)],
            })
            .expect("well-formed row");
        assert_eq!(table.rows.len(), 1);
    }
}
