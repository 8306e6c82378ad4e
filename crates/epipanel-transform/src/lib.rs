//! Panel construction for the epidemiological time series.
//!
//! - **reshape**: wide cumulative tables to long records and back
//! - **alias**: cumulative-source to rate-source country names
//! - **aggregate**: province rows summed per canonical country
//! - **selection**: requested countries, in output order
//! - **merge**: `(country, date)` joins across the four sources
//! - **fill**: missing-data policy
//! - **derive**: daily deltas, death rate and vaccination rate
//! - **pipeline**: the stages above, in order

pub mod aggregate;
pub mod alias;
pub mod derive;
pub mod fill;
pub mod merge;
pub mod pipeline;
pub mod reshape;
pub mod selection;

pub use aggregate::aggregate_by_country;
pub use alias::{BUILTIN_ALIASES, CountryAliasMap};
pub use derive::{death_rate, derive_metrics, vaccination_rate};
pub use fill::apply_missing_data_policy;
pub use merge::{join_rate_source, merge_cumulative};
pub use pipeline::{
    CountryTables, PipelineInput, PipelineOutput, reshape_and_aggregate, run_pipeline, select,
};
pub use reshape::{ReshapedSeries, parse_schedule, reshape_wide, widen};
pub use selection::Selection;
