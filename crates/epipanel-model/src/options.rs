//! Configuration options for a pipeline run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Countries used when the caller supplies an empty selection.
pub const DEFAULT_COUNTRIES: [&str; 5] = [
    "United States",
    "India",
    "Brazil",
    "United Kingdom",
    "Germany",
];

/// Options controlling which countries end up in the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Requested countries, in output order. Either vocabulary is accepted.
    pub countries: Vec<String>,

    /// Fallback selection when `countries` is empty after trimming.
    pub default_countries: Vec<String>,

    /// Extra cumulative-source → rate-source name aliases.
    ///
    /// Entries override the built-in table on key collision.
    pub aliases: BTreeMap<String, String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            countries: Vec::new(),
            default_countries: DEFAULT_COUNTRIES.iter().map(|s| (*s).to_string()).collect(),
            aliases: BTreeMap::new(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// The selection to apply: trimmed `countries`, or the defaults when none remain.
    pub fn effective_selection(&self) -> Vec<String> {
        let requested = trimmed(&self.countries);
        if requested.is_empty() {
            trimmed(&self.default_countries)
        } else {
            requested
        }
    }

    /// Whether the run falls back to `default_countries`.
    pub fn uses_default_selection(&self) -> bool {
        trimmed(&self.countries).is_empty()
    }
}

fn trimmed(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
