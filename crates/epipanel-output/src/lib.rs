//! Output generation for the panel.
//!
//! - **panel_csv**: `panel.csv` and `latest.csv` snapshots via polars
//! - **report**: `diagnostics.json`

pub mod common;
pub mod panel_csv;
pub mod report;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, info_span};

use epipanel_model::{Diagnostics, Panel};

pub use common::{ensure_output_dir, ensure_parent_dir};
pub use panel_csv::{panel_frame, write_panel_csv};
pub use report::{DiagnosticsReport, WarningEntry, write_diagnostics_json};

/// Full panel file name.
pub const PANEL_FILE: &str = "panel.csv";
/// Latest cross-section file name.
pub const LATEST_FILE: &str = "latest.csv";
/// Diagnostics report file name.
pub const DIAGNOSTICS_FILE: &str = "diagnostics.json";

/// Paths of the files written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub panel: PathBuf,
    pub latest: PathBuf,
    pub diagnostics: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            panel: dir.join(PANEL_FILE),
            latest: dir.join(LATEST_FILE),
            diagnostics: dir.join(DIAGNOSTICS_FILE),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.panel, &self.latest, &self.diagnostics]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// Write the panel, its latest cross-section and the diagnostics report.
pub fn write_outputs(
    output_dir: &Path,
    panel: &Panel,
    diagnostics: &Diagnostics,
) -> Result<OutputPaths> {
    let span = info_span!("output", dir = %output_dir.display());
    let _guard = span.enter();
    let dir = ensure_output_dir(output_dir)?;
    let paths = OutputPaths::in_dir(&dir);
    write_panel_csv(&paths.panel, &panel.rows)?;
    write_panel_csv(&paths.latest, panel.latest())?;
    write_diagnostics_json(&paths.diagnostics, panel, diagnostics)?;
    info!(panel = %paths.panel.display(), rows = panel.rows.len(), "outputs written");
    Ok(paths)
}
