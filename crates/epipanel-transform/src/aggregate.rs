//! Country-level aggregation of reshaped records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use epipanel_model::{CountryCount, KeyedTable, LongRecord};

use crate::alias::CountryAliasMap;

/// Sum sub-national records into one value per (canonical country, date).
///
/// Country keys are resolved through `aliases` first. A sum over only unset
/// values stays unset.
pub fn aggregate_by_country(
    records: &[LongRecord],
    aliases: &CountryAliasMap,
) -> KeyedTable<CountryCount> {
    let mut totals: BTreeMap<(&str, NaiveDate), Option<i64>> = BTreeMap::new();
    for record in records {
        let key = (aliases.resolve(&record.country_key), record.date);
        let total = totals.entry(key).or_insert(None);
        *total = add_counts(*total, record.value);
    }
    let table: KeyedTable<CountryCount> = totals
        .into_iter()
        .map(|((country, date), value)| CountryCount {
            country: country.to_string(),
            date,
            value,
        })
        .collect();
    debug!(
        records = records.len(),
        country_dates = table.len(),
        "aggregated to country level"
    );
    table
}

fn add_counts(total: Option<i64>, value: Option<i64>) -> Option<i64> {
    match (total, value) {
        (None, None) => None,
        (Some(total), None) => Some(total),
        (None, Some(value)) => Some(value),
        (Some(total), Some(value)) => Some(total.saturating_add(value)),
    }
}
