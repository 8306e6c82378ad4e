//! Missing-data policy applied between merging and derivation.

use tracing::debug;

use epipanel_model::{MergedRow, PanelRow};

/// Counts of cells the policy touched, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FillReport {
    cumulative_filled: usize,
    vaccination_filled: usize,
    population_unset: usize,
}

/// Default unset counts to zero.
///
/// Population is left unset; it only gates `vaccination_rate`. Derived fields
/// start at zero and are written by [`crate::derive::derive_metrics`].
pub fn apply_missing_data_policy(rows: Vec<MergedRow>) -> Vec<PanelRow> {
    let mut report = FillReport::default();
    let filled: Vec<PanelRow> = rows
        .into_iter()
        .map(|row| fill_row(row, &mut report))
        .collect();
    debug!(
        rows = filled.len(),
        cumulative_filled = report.cumulative_filled,
        vaccination_filled = report.vaccination_filled,
        population_unset = report.population_unset,
        "missing-data policy applied"
    );
    filled
}

fn zero(value: Option<i64>, counter: &mut usize) -> i64 {
    value.unwrap_or_else(|| {
        *counter += 1;
        0
    })
}

fn fill_row(row: MergedRow, report: &mut FillReport) -> PanelRow {
    let total_cases = zero(row.total_cases, &mut report.cumulative_filled);
    let total_deaths = zero(row.total_deaths, &mut report.cumulative_filled);
    let total_recovered = zero(row.total_recovered, &mut report.cumulative_filled);
    let total_vaccinations = zero(row.total_vaccinations, &mut report.vaccination_filled);
    let people_fully_vaccinated = zero(row.people_fully_vaccinated, &mut report.vaccination_filled);
    if row.population.is_none() {
        report.population_unset += 1;
    }
    PanelRow {
        country: row.country,
        date: row.date,
        total_cases,
        total_deaths,
        total_recovered,
        new_cases: 0,
        new_deaths: 0,
        death_rate: 0.0,
        total_vaccinations,
        people_fully_vaccinated,
        population: row.population,
        vaccination_rate: None,
        region_code: row.region_code,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn unset_counts_become_zero() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let rows = apply_missing_data_policy(vec![MergedRow::cumulative(
            "A",
            date,
            None,
            Some(3),
            None,
        )]);

        let row = &rows[0];
        assert_eq!(row.total_cases, 0);
        assert_eq!(row.total_deaths, 3);
        assert_eq!(row.total_recovered, 0);
        assert_eq!(row.total_vaccinations, 0);
        assert_eq!(row.people_fully_vaccinated, 0);
        assert_eq!(row.population, None);
    }

    #[test]
    fn population_is_never_defaulted() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let mut merged = MergedRow::cumulative("A", date, Some(1), Some(1), Some(1));
        merged.population = Some(0);
        let rows = apply_missing_data_policy(vec![merged]);
        assert_eq!(rows[0].population, Some(0));
    }
}
