//! Country name reconciliation between the cumulative and rate sources.
//!
//! The cumulative provider and the rate provider spell a handful of countries
//! differently. Cumulative keys are rewritten into the rate-source vocabulary
//! (the canonical names); names absent from the map are already canonical.

use std::collections::BTreeMap;

use epipanel_model::PipelineOptions;

/// Known divergences: cumulative-source key, rate-source key.
pub const BUILTIN_ALIASES: [(&str, &str); 10] = [
    ("US", "United States"),
    ("Korea, South", "South Korea"),
    ("Taiwan*", "Taiwan"),
    ("Burma", "Myanmar"),
    ("Cabo Verde", "Cape Verde"),
    ("Congo (Kinshasa)", "Democratic Republic of Congo"),
    ("Congo (Brazzaville)", "Congo"),
    ("Timor-Leste", "Timor"),
    ("West Bank and Gaza", "Palestine"),
    ("Holy See", "Vatican"),
];

/// Cumulative-source → rate-source name map with its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryAliasMap {
    forward: BTreeMap<String, String>,
    inverse: BTreeMap<String, String>,
}

impl Default for CountryAliasMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CountryAliasMap {
    /// A map with no aliases; every name resolves to itself.
    pub fn empty() -> Self {
        Self {
            forward: BTreeMap::new(),
            inverse: BTreeMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut map = Self::empty();
        for (source, canonical) in BUILTIN_ALIASES {
            map.insert(source, canonical);
        }
        map
    }

    /// Built-in table extended by the configured `[aliases]`.
    pub fn from_options(options: &PipelineOptions) -> Self {
        Self::builtin().with_overrides(&options.aliases)
    }

    /// Add entries on top of the current map; later entries win.
    #[must_use]
    pub fn with_overrides<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (source, canonical) in entries {
            self.insert(source.trim(), canonical.trim());
        }
        self
    }

    pub fn insert(&mut self, source: &str, canonical: &str) {
        if let Some(previous) = self
            .forward
            .insert(source.to_string(), canonical.to_string())
            && self.inverse.get(&previous).map(String::as_str) == Some(source)
        {
            self.inverse.remove(&previous);
        }
        self.inverse
            .insert(canonical.to_string(), source.to_string());
    }

    /// Rate-source name for a cumulative-source key.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.forward.get(key).map_or(key, String::as_str)
    }

    /// Cumulative-source spelling of a canonical name, for reports.
    pub fn display_name<'a>(&'a self, canonical: &'a str) -> &'a str {
        self.inverse.get(canonical).map_or(canonical, String::as_str)
    }

    /// Entries in source-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward
            .iter()
            .map(|(source, canonical)| (source.as_str(), canonical.as_str()))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
