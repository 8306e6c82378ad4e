//! Source locations and their acquisition.
//!
//! A source is either a local file or an `http(s)` URL. Both are read fully
//! into memory before parsing; the file handle or HTTP response is released
//! before this module returns, on success and on failure alike.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use epipanel_model::{Metric, RateSourceRecord, WideSeriesTable};
use reqwest::blocking::Client;
use tracing::{debug, info, info_span};

use crate::error::{IngestError, Result};
use crate::rate::read_rate_table;
use crate::wide::read_wide_table;

/// Upstream global confirmed-cases time series.
pub const DEFAULT_CASES_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";

/// Upstream global deaths time series.
pub const DEFAULT_DEATHS_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_deaths_global.csv";

/// Upstream global recoveries time series.
pub const DEFAULT_RECOVERED_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_recovered_global.csv";

/// Upstream per-country daily vaccination and population table.
pub const DEFAULT_VACCINATIONS_URL: &str =
    "https://raw.githubusercontent.com/owid/covid-19-data/master/public/data/owid-covid-data.csv";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Where a source table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl SourceLocation {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Read the whole source into memory.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::File(path) => read_file(path),
            Self::Url(url) => fetch_url(url),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

impl FromStr for SourceLocation {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("empty source location".to_string());
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(trimmed.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(trimmed)))
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: error,
            }
        }
    })
}

fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let fetch_error = |error: reqwest::Error| IngestError::Fetch {
        url: url.to_string(),
        message: error.to_string(),
    };
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(fetch_error)?;
    debug!(url, "fetching source");
    let response = client
        .get(url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(fetch_error)?;
    let bytes = response.bytes().map_err(fetch_error)?;
    debug!(url, bytes = bytes.len(), "source fetched");
    Ok(bytes.to_vec())
}

/// Locations of the four source tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub cases: SourceLocation,
    pub deaths: SourceLocation,
    pub recovered: SourceLocation,
    pub vaccinations: SourceLocation,
}

impl Default for SourceSet {
    fn default() -> Self {
        Self {
            cases: SourceLocation::url(DEFAULT_CASES_URL),
            deaths: SourceLocation::url(DEFAULT_DEATHS_URL),
            recovered: SourceLocation::url(DEFAULT_RECOVERED_URL),
            vaccinations: SourceLocation::url(DEFAULT_VACCINATIONS_URL),
        }
    }
}

impl SourceSet {
    /// Local files `<dir>/cases.csv`, `deaths.csv`, `recovered.csv`, `vaccinations.csv`.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            cases: SourceLocation::file(dir.join("cases.csv")),
            deaths: SourceLocation::file(dir.join("deaths.csv")),
            recovered: SourceLocation::file(dir.join("recovered.csv")),
            vaccinations: SourceLocation::file(dir.join("vaccinations.csv")),
        }
    }
}

/// All source tables, materialized.
#[derive(Debug, Clone)]
pub struct LoadedSources {
    pub cases: WideSeriesTable,
    pub deaths: WideSeriesTable,
    pub recovered: WideSeriesTable,
    pub rates: Vec<RateSourceRecord>,
}

/// Read one wide cumulative table.
pub fn load_wide_table(location: &SourceLocation, metric: Metric) -> Result<WideSeriesTable> {
    let bytes = location.read_bytes()?;
    read_wide_table(bytes.as_slice(), metric, &location.to_string())
}

/// Read the rate-source table.
pub fn load_rate_table(location: &SourceLocation) -> Result<Vec<RateSourceRecord>> {
    let bytes = location.read_bytes()?;
    read_rate_table(bytes.as_slice(), &location.to_string())
}

/// Acquire and parse every source; the first failure aborts.
pub fn load_sources(sources: &SourceSet) -> Result<LoadedSources> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let cases = load_wide_table(&sources.cases, Metric::Cases)?;
    let deaths = load_wide_table(&sources.deaths, Metric::Deaths)?;
    let recovered = load_wide_table(&sources.recovered, Metric::Recovered)?;
    let rates = load_rate_table(&sources.vaccinations)?;
    info!(
        cases_rows = cases.rows.len(),
        deaths_rows = deaths.rows.len(),
        recovered_rows = recovered.rows.len(),
        rate_rows = rates.len(),
        "sources loaded"
    );
    Ok(LoadedSources {
        cases,
        deaths,
        recovered,
        rates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locations() {
        assert_eq!(
            "https://example.org/a.csv".parse::<SourceLocation>(),
            Ok(SourceLocation::url("https://example.org/a.csv"))
        );
        assert_eq!(
            " data/cases.csv ".parse::<SourceLocation>(),
            Ok(SourceLocation::file("data/cases.csv"))
        );
        assert!("".parse::<SourceLocation>().is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = SourceLocation::file("/nonexistent/epipanel/cases.csv")
            .read_bytes()
            .unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
