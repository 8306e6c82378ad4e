//! Error types for source acquisition and CSV loading.

use std::path::PathBuf;

use epipanel_model::PanelError;
use thiserror::Error;

/// Errors that can occur while fetching or parsing a source table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Network Errors ===
    /// HTTP request failed or returned a non-success status.
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the input.
    #[error("failed to parse CSV {source_name}: {message}")]
    CsvParse {
        source_name: String,
        message: String,
    },

    // === Table Shape Errors ===
    /// The parsed table violates a structural requirement.
    #[error(transparent)]
    Panel(#[from] PanelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/cases.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /data/cases.csv");
    }

    #[test]
    fn test_error_from_panel() {
        let err: IngestError = PanelError::empty_table("cases", "no rows").into();
        assert!(matches!(err, IngestError::Panel(PanelError::EmptyTable { .. })));
        assert_eq!(err.to_string(), "empty table cases: no rows");
    }
}
