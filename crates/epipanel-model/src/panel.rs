//! The merged per-country daily panel.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::keyed::{CountryDate, Keyed};

/// Column names of the flat panel, in output order.
pub const PANEL_COLUMNS: [&str; 13] = [
    "country",
    "date",
    "total_cases",
    "total_deaths",
    "total_recovered",
    "new_cases",
    "new_deaths",
    "death_rate",
    "total_vaccinations",
    "people_fully_vaccinated",
    "population",
    "vaccination_rate",
    "region_code",
];

/// Output of the join stage, before any fill rule has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    pub country: String,
    pub date: NaiveDate,
    pub total_cases: Option<i64>,
    pub total_deaths: Option<i64>,
    pub total_recovered: Option<i64>,
    pub total_vaccinations: Option<i64>,
    pub people_fully_vaccinated: Option<i64>,
    pub population: Option<i64>,
    pub region_code: Option<String>,
}

impl MergedRow {
    /// A cumulative-only row with every rate-source field unset.
    pub fn cumulative(
        country: impl Into<String>,
        date: NaiveDate,
        total_cases: Option<i64>,
        total_deaths: Option<i64>,
        total_recovered: Option<i64>,
    ) -> Self {
        Self {
            country: country.into(),
            date,
            total_cases,
            total_deaths,
            total_recovered,
            total_vaccinations: None,
            people_fully_vaccinated: None,
            population: None,
            region_code: None,
        }
    }
}

impl Keyed for MergedRow {
    fn country(&self) -> &str {
        &self.country
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// One (country, date) row of the final panel.
///
/// Field order matches [`PANEL_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRow {
    pub country: String,
    pub date: NaiveDate,
    pub total_cases: i64,
    pub total_deaths: i64,
    pub total_recovered: i64,
    pub new_cases: i64,
    pub new_deaths: i64,
    pub death_rate: f64,
    pub total_vaccinations: i64,
    pub people_fully_vaccinated: i64,
    pub population: Option<i64>,
    pub vaccination_rate: Option<f64>,
    pub region_code: Option<String>,
}

impl Keyed for PanelRow {
    fn country(&self) -> &str {
        &self.country
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A country the caller asked for, with the name it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCountry {
    /// Name as supplied by the caller (trimmed).
    pub requested: String,
    /// Canonical (rate-source vocabulary) name used as the join key.
    pub canonical: String,
}

/// The finished panel handed to rendering and reporting consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub rows: Vec<PanelRow>,
    pub countries: Vec<SelectedCountry>,
    pub max_date: Option<NaiveDate>,
}

impl Panel {
    pub fn new(rows: Vec<PanelRow>, countries: Vec<SelectedCountry>) -> Self {
        let max_date = rows.iter().map(|row| row.date).max();
        Self {
            rows,
            countries,
            max_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cross-section of rows dated at the panel's maximum date.
    pub fn latest(&self) -> Vec<&PanelRow> {
        let Some(max_date) = self.max_date else {
            return Vec::new();
        };
        self.rows.iter().filter(|row| row.date == max_date).collect()
    }

    /// Rows of one canonical country, in panel order.
    pub fn country_rows<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a PanelRow> {
        self.rows.iter().filter(move |row| row.country == country)
    }

    /// The set of `(country, date)` keys present in the panel.
    pub fn keys(&self) -> BTreeSet<CountryDate> {
        self.rows.iter().map(CountryDate::of).collect()
    }

    /// Canonical names of the selected countries, in selection order.
    pub fn canonical_countries(&self) -> Vec<&str> {
        self.countries
            .iter()
            .map(|country| country.canonical.as_str())
            .collect()
    }
}
