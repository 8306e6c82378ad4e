use thiserror::Error;

/// Structural errors that abort a pipeline run.
///
/// Every later stage assumes a well-formed date axis and a non-empty identifier
/// set, so none of these are recoverable.
#[derive(Debug, Error)]
pub enum PanelError {
    /// A date column header (or rate-source date cell) is not a calendar date,
    /// or the dates are not strictly increasing.
    #[error("malformed schedule in {table}: {header:?} {reason}")]
    MalformedSchedule {
        table: String,
        header: String,
        reason: String,
    },

    /// A required source table has zero usable rows or date columns.
    #[error("empty table {table}: {reason}")]
    EmptyTable { table: String, reason: String },

    /// A required identifier column is absent.
    #[error("required column '{column}' not found in {table}")]
    MissingColumn { table: String, column: String },

    /// A count cell holds something other than a number.
    #[error("invalid value {value:?} in {table} row {row}, column '{column}'")]
    InvalidCell {
        table: String,
        row: usize,
        column: String,
        value: String,
    },

    /// A wide row whose cell count does not match the table's columns.
    #[error("row {row} of {table} has {found} {cells} cells, expected {expected}")]
    RaggedRow {
        table: String,
        row: usize,
        cells: &'static str,
        expected: usize,
        found: usize,
    },
}

impl PanelError {
    pub fn malformed_schedule(
        table: impl Into<String>,
        header: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedSchedule {
            table: table.into(),
            header: header.into(),
            reason: reason.into(),
        }
    }

    pub fn empty_table(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EmptyTable {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PanelError::malformed_schedule("cases", "Jan 22", "is not a date");
        assert_eq!(
            err.to_string(),
            "malformed schedule in cases: \"Jan 22\" is not a date"
        );

        let err = PanelError::empty_table("deaths", "no date columns");
        assert_eq!(err.to_string(), "empty table deaths: no date columns");

        let err = PanelError::RaggedRow {
            table: "cases".to_string(),
            row: 2,
            cells: "value",
            expected: 3,
            found: 1,
        };
        assert_eq!(err.to_string(), "row 2 of cases has 1 value cells, expected 3");
    }
}
