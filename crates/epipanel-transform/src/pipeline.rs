//! Panel construction pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Reshape**: Project each wide cumulative table into long records
//! 2. **Aggregate**: Resolve country aliases and sum provinces per country
//! 3. **Select**: Keep the requested countries
//! 4. **Merge**: Join cases, deaths, recoveries and the rate source
//! 5. **Fill**: Apply the missing-data policy
//! 6. **Derive**: Compute deltas and rates
//!
//! Every stage either succeeds completely or fails the run.

use std::time::Instant;

use tracing::{debug, info, info_span};

use epipanel_model::{
    CountryCount, Diagnostics, KeyedTable, Panel, PipelineOptions, RateSourceRecord, Result,
    WideSeriesTable,
};

use crate::aggregate::aggregate_by_country;
use crate::alias::CountryAliasMap;
use crate::derive::derive_metrics;
use crate::fill::apply_missing_data_policy;
use crate::merge::{join_rate_source, merge_cumulative};
use crate::reshape::reshape_wide;
use crate::selection::Selection;

/// Raw source tables, as loaded.
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub cases: WideSeriesTable,
    pub deaths: WideSeriesTable,
    pub recovered: WideSeriesTable,
    pub rates: Vec<RateSourceRecord>,
}

/// The finished panel and the warnings raised while building it.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub panel: Panel,
    pub diagnostics: Diagnostics,
}

/// Country-level cumulative tables.
#[derive(Debug, Clone)]
pub struct CountryTables {
    pub cases: KeyedTable<CountryCount>,
    pub deaths: KeyedTable<CountryCount>,
    pub recovered: KeyedTable<CountryCount>,
}

// ============================================================================
// Stages 1 and 2: Reshape and aggregate
// ============================================================================

/// Reshape the three wide tables and aggregate them per canonical country.
pub fn reshape_and_aggregate(
    input: &PipelineInput,
    aliases: &CountryAliasMap,
) -> Result<CountryTables> {
    Ok(CountryTables {
        cases: country_table(&input.cases, aliases)?,
        deaths: country_table(&input.deaths, aliases)?,
        recovered: country_table(&input.recovered, aliases)?,
    })
}

fn country_table(
    wide: &WideSeriesTable,
    aliases: &CountryAliasMap,
) -> Result<KeyedTable<CountryCount>> {
    let series = info_span!("reshape", metric = %wide.metric).in_scope(|| reshape_wide(wide))?;
    Ok(info_span!("aggregate", metric = %wide.metric)
        .in_scope(|| aggregate_by_country(&series.records, aliases)))
}

// ============================================================================
// Stage 3: Select
// ============================================================================

/// Restrict every table to the selected countries.
pub fn select(
    tables: CountryTables,
    rates: &[RateSourceRecord],
    selection: &Selection,
) -> (CountryTables, KeyedTable<RateSourceRecord>) {
    let span = info_span!("select", countries = selection.len());
    let _guard = span.enter();
    let selected = CountryTables {
        cases: selection.filter(tables.cases),
        deaths: selection.filter(tables.deaths),
        recovered: selection.filter(tables.recovered),
    };
    let rates: KeyedTable<RateSourceRecord> = rates
        .iter()
        .filter(|record| selection.contains(&record.location_key))
        .cloned()
        .collect();
    debug!(
        cases = selected.cases.len(),
        deaths = selected.deaths.len(),
        recovered = selected.recovered.len(),
        rates = rates.len(),
        "selection applied"
    );
    (selected, rates)
}

// ============================================================================
// Stages 4 to 6: Merge, fill, derive
// ============================================================================

/// Build the full panel from raw source tables.
pub fn run_pipeline(input: &PipelineInput, options: &PipelineOptions) -> Result<PipelineOutput> {
    let start = Instant::now();
    let aliases = CountryAliasMap::from_options(options);
    let selection = Selection::from_options(options, &aliases);
    let mut diagnostics = Diagnostics::new();

    let tables = reshape_and_aggregate(input, &aliases)?;
    let (tables, rates) = select(tables, &input.rates, &selection);

    let mut merged = {
        let span = info_span!("merge");
        let _guard = span.enter();
        let merged = merge_cumulative(&tables.cases, &tables.deaths, &tables.recovered);
        join_rate_source(merged, &rates)
    };
    merged.sort_by_key(|row| (selection.rank(&row.country), row.date));
    selection.check_coverage(&merged, &mut diagnostics);

    let mut rows = {
        let span = info_span!("fill");
        let _guard = span.enter();
        apply_missing_data_policy(merged)
    };
    {
        let span = info_span!("derive");
        let _guard = span.enter();
        derive_metrics(&mut rows, &mut diagnostics);
    }

    let panel = Panel::new(rows, selection.into_countries());
    info!(
        rows = panel.rows.len(),
        countries = ?panel.canonical_countries(),
        missing = ?diagnostics.zero_selections().collect::<Vec<_>>(),
        max_date = ?panel.max_date,
        warnings = diagnostics.len(),
        duration_ms = start.elapsed().as_millis(),
        "panel built"
    );
    Ok(PipelineOutput { panel, diagnostics })
}
