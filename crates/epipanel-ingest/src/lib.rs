//! Source acquisition and loading for the epidemiological panel.
//!
//! This crate turns the two upstream source shapes into in-memory tables:
//!
//! - **Wide cumulative tables**: one column per date, loaded as
//!   [`WideSeriesTable`](epipanel_model::WideSeriesTable) with raw date headers
//! - **Rate source**: long per-country-per-day rows, loaded as
//!   [`RateSourceRecord`](epipanel_model::RateSourceRecord)
//! - **Sources**: local files or `http(s)` URLs, read fully before parsing
//!
//! # Example
//!
//! ```ignore
//! use epipanel_ingest::{SourceSet, load_sources};
//!
//! let sources = SourceSet::from_dir(Path::new("data"));
//! let loaded = load_sources(&sources)?;
//! ```

mod csv_table;
mod error;
mod numeric;
mod rate;
mod source;
mod wide;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv_table::{CsvTable, read_csv_table};
pub use numeric::{CountCell, parse_count};

// === Source Tables ===
pub use rate::{RATE_TABLE, rate_records_from_csv, read_rate_table};
pub use wide::{read_wide_table, wide_table_from_csv};

// === Acquisition ===
pub use source::{
    DEFAULT_CASES_URL, DEFAULT_DEATHS_URL, DEFAULT_RECOVERED_URL, DEFAULT_VACCINATIONS_URL,
    LoadedSources, SourceLocation, SourceSet, load_rate_table, load_sources, load_wide_table,
};
