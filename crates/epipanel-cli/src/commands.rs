//! Subcommand implementations.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use epipanel_ingest::load_sources;
use epipanel_output::write_outputs;
use epipanel_transform::{CountryAliasMap, PipelineInput, PipelineOutput, run_pipeline};

use crate::config::{load_config, resolve_options};
use crate::types::{BuildRequest, BuildResult};

/// Load the sources, build the panel and write the output files.
pub fn run_build(request: &BuildRequest) -> Result<BuildResult> {
    let span = info_span!("build", output_dir = %request.output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let options = resolve_options(request.config.as_deref(), &request.countries)?;
    let loaded = load_sources(&request.sources).context("load sources")?;
    let input = PipelineInput {
        cases: loaded.cases,
        deaths: loaded.deaths,
        recovered: loaded.recovered,
        rates: loaded.rates,
    };
    let aliases = CountryAliasMap::from_options(&options);
    let PipelineOutput { panel, diagnostics } =
        run_pipeline(&input, &options).context("build panel")?;

    let outputs = if request.dry_run {
        info!("dry run: skipping output files");
        None
    } else {
        Some(write_outputs(&request.output_dir, &panel, &diagnostics).context("write outputs")?)
    };

    Ok(BuildResult {
        panel,
        diagnostics,
        aliases,
        outputs,
        duration: start.elapsed(),
    })
}

/// The alias table in effect for the given config file.
pub fn run_aliases(config: Option<&Path>) -> Result<CountryAliasMap> {
    let options = load_config(config)?;
    Ok(CountryAliasMap::from_options(&options))
}
