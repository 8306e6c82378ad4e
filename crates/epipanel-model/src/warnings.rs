//! Non-fatal data-quality findings collected during a run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A data-quality issue that leaves a gap in the output but does not stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// A requested country matched no cumulative-count rows.
    ZeroSelection { requested: String, canonical: String },
    /// The whole selection matched no rows; the panel is empty.
    EmptySelection { requested: usize },
    /// Population was unset or non-positive, so `vaccination_rate` is unset.
    UndefinedRate { country: String, rows: usize },
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSelection {
                requested,
                canonical,
            } if requested == canonical => {
                write!(f, "no rows for selected country {requested:?}")
            }
            Self::ZeroSelection {
                requested,
                canonical,
            } => write!(
                f,
                "no rows for selected country {requested:?} (resolved to {canonical:?})"
            ),
            Self::EmptySelection { requested } => write!(
                f,
                "selection of {requested} countries matched no rows; panel is empty"
            ),
            Self::UndefinedRate { country, rows } => write!(
                f,
                "vaccination rate undefined for {country} on {rows} rows (population unset or non-positive)"
            ),
        }
    }
}

/// Ordered collection of warnings raised by the pipeline stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub warnings: Vec<DataQualityWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: DataQualityWarning) {
        self.warnings.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn zero_selections(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().filter_map(|warning| match warning {
            DataQualityWarning::ZeroSelection { requested, .. } => Some(requested.as_str()),
            _ => None,
        })
    }

    pub fn undefined_rate_rows(&self, country: &str) -> usize {
        self.warnings
            .iter()
            .map(|warning| match warning {
                DataQualityWarning::UndefinedRate { country: c, rows } if c == country => *rows,
                _ => 0,
            })
            .sum()
    }
}
