//! Cumulative metrics published by the wide-format source.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three cumulative series of the cumulative-count source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Cases,
    Deaths,
    Recovered,
}

impl Metric {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Deaths => "deaths",
            Self::Recovered => "recovered",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cases" | "confirmed" => Ok(Self::Cases),
            "deaths" => Ok(Self::Deaths),
            "recovered" | "recoveries" => Ok(Self::Recovered),
            other => Err(format!("unknown metric: {other}")),
        }
    }
}
