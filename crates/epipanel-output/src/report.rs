//! Diagnostics report written alongside the panel.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

use epipanel_model::{DataQualityWarning, Diagnostics, Panel, SelectedCountry};

use crate::common::ensure_parent_dir;

/// JSON payload of `diagnostics.json`.
#[derive(Debug, Serialize)]
pub struct DiagnosticsReport<'a> {
    pub generated_at: String,
    pub max_date: Option<NaiveDate>,
    pub row_count: usize,
    pub countries: &'a [SelectedCountry],
    pub warnings: Vec<WarningEntry<'a>>,
}

/// A warning with its human-readable message.
#[derive(Debug, Serialize)]
pub struct WarningEntry<'a> {
    #[serde(flatten)]
    pub warning: &'a DataQualityWarning,
    pub message: String,
}

impl<'a> DiagnosticsReport<'a> {
    pub fn new(panel: &'a Panel, diagnostics: &'a Diagnostics, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            max_date: panel.max_date,
            row_count: panel.rows.len(),
            countries: &panel.countries,
            warnings: diagnostics
                .warnings
                .iter()
                .map(|warning| WarningEntry {
                    warning,
                    message: warning.to_string(),
                })
                .collect(),
        }
    }
}

/// Write the diagnostics report as pretty JSON.
pub fn write_diagnostics_json(path: &Path, panel: &Panel, diagnostics: &Diagnostics) -> Result<()> {
    let report = DiagnosticsReport::new(panel, diagnostics, Utc::now());
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), warnings = report.warnings.len(), "diagnostics written");
    Ok(())
}
