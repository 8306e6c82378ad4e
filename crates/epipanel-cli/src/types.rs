use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use epipanel_ingest::SourceSet;
use epipanel_model::{Diagnostics, Panel};
use epipanel_output::OutputPaths;
use epipanel_transform::CountryAliasMap;

/// Everything `build` needs, independent of argument parsing.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub sources: SourceSet,
    /// Countries from the command line; empty defers to the config file.
    pub countries: Vec<String>,
    pub config: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct BuildResult {
    pub panel: Panel,
    pub diagnostics: Diagnostics,
    /// Alias table the panel was built with.
    pub aliases: CountryAliasMap,
    /// `None` on a dry run.
    pub outputs: Option<OutputPaths>,
    pub duration: Duration,
}

/// Per-country line of the build summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySummary {
    pub canonical: String,
    /// Cumulative-source spelling of `canonical`.
    pub source_name: String,
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub total_cases: Option<i64>,
    pub total_deaths: Option<i64>,
    pub vaccination_rate: Option<f64>,
    /// Rows whose vaccination rate is undefined.
    pub undefined_rates: usize,
}

impl BuildResult {
    /// One summary per selected country, in selection order.
    pub fn country_summaries(&self) -> Vec<CountrySummary> {
        self.panel
            .countries
            .iter()
            .map(|country| {
                let rows: Vec<_> = self.panel.country_rows(&country.canonical).collect();
                let last = rows.iter().max_by_key(|row| row.date);
                CountrySummary {
                    canonical: country.canonical.clone(),
                    source_name: self.aliases.display_name(&country.canonical).to_string(),
                    rows: rows.len(),
                    first_date: rows.iter().map(|row| row.date).min(),
                    last_date: last.map(|row| row.date),
                    total_cases: last.map(|row| row.total_cases),
                    total_deaths: last.map(|row| row.total_deaths),
                    vaccination_rate: last.and_then(|row| row.vaccination_rate),
                    undefined_rates: self.diagnostics.undefined_rate_rows(&country.canonical),
                }
            })
            .collect()
    }
}
