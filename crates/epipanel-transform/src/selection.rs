//! Country selection.

use std::collections::HashSet;

use tracing::{info, warn};

use epipanel_model::{
    DataQualityWarning, Diagnostics, Keyed, KeyedTable, PipelineOptions, SelectedCountry,
};

use crate::alias::CountryAliasMap;

/// Ordered, de-duplicated set of canonical countries to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    countries: Vec<SelectedCountry>,
}

impl Selection {
    /// Resolve requested names through `aliases`.
    ///
    /// Names are trimmed and blanks dropped; when two names resolve to the same
    /// canonical country only the first is kept.
    pub fn resolve<S: AsRef<str>>(requested: &[S], aliases: &CountryAliasMap) -> Self {
        let mut seen = HashSet::new();
        let mut countries = Vec::new();
        for name in requested {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let canonical = aliases.resolve(name);
            if seen.insert(canonical.to_string()) {
                countries.push(SelectedCountry {
                    requested: name.to_string(),
                    canonical: canonical.to_string(),
                });
            }
        }
        Self { countries }
    }

    /// The selection configured in `options`, falling back to its defaults.
    pub fn from_options(options: &PipelineOptions, aliases: &CountryAliasMap) -> Self {
        if options.uses_default_selection() {
            info!("no countries requested; using the default selection");
        }
        Self::resolve(&options.effective_selection(), aliases)
    }

    pub fn countries(&self) -> &[SelectedCountry] {
        &self.countries
    }

    pub fn into_countries(self) -> Vec<SelectedCountry> {
        self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.rank(canonical).is_some()
    }

    /// Position of a canonical country in the selection.
    pub fn rank(&self, canonical: &str) -> Option<usize> {
        self.countries
            .iter()
            .position(|country| country.canonical == canonical)
    }

    /// Keep only rows of selected countries.
    pub fn filter<T: Keyed>(&self, table: KeyedTable<T>) -> KeyedTable<T> {
        table.retain_countries(|country| self.contains(country))
    }

    /// Record a warning for every selected country with no rows in `rows`.
    ///
    /// Returns `false` when nothing at all matched.
    pub fn check_coverage<T: Keyed>(&self, rows: &[T], diagnostics: &mut Diagnostics) -> bool {
        let present: HashSet<&str> = rows.iter().map(Keyed::country).collect();
        for country in &self.countries {
            if !present.contains(country.canonical.as_str()) {
                let warning = DataQualityWarning::ZeroSelection {
                    requested: country.requested.clone(),
                    canonical: country.canonical.clone(),
                };
                warn!("{warning}");
                diagnostics.push(warning);
            }
        }
        if rows.is_empty() {
            let warning = DataQualityWarning::EmptySelection {
                requested: self.countries.len(),
            };
            warn!("{warning}");
            diagnostics.push(warning);
            return false;
        }
        true
    }
}
