//! Derived metrics: daily deltas and rates.

use std::cmp::Ordering;

use tracing::warn;

use epipanel_model::{DataQualityWarning, Diagnostics, PanelRow};

/// Compute `new_cases`, `new_deaths`, `death_rate` and `vaccination_rate` in place.
///
/// Deltas are taken against the previous date of the same country, whatever
/// order `rows` is in; the earliest date of each country gets zero. Negative
/// deltas are kept. Rows whose rate cannot be computed are reported once per
/// country as [`DataQualityWarning::UndefinedRate`], in row order.
pub fn derive_metrics(rows: &mut [PanelRow], diagnostics: &mut Diagnostics) {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| by_country_then_date(&rows[a], &rows[b]));

    let mut previous: Option<usize> = None;
    for &idx in &order {
        let prior = previous
            .filter(|&prev| rows[prev].country == rows[idx].country)
            .map(|prev| (rows[prev].total_cases, rows[prev].total_deaths));
        let row = &mut rows[idx];
        (row.new_cases, row.new_deaths) = match prior {
            Some((cases, deaths)) => (
                row.total_cases.saturating_sub(cases),
                row.total_deaths.saturating_sub(deaths),
            ),
            None => (0, 0),
        };
        previous = Some(idx);
    }

    let mut undefined: Vec<(String, usize)> = Vec::new();
    for row in rows.iter_mut() {
        row.death_rate = death_rate(row.total_deaths, row.total_cases);
        row.vaccination_rate = vaccination_rate(row.people_fully_vaccinated, row.population);
        if row.vaccination_rate.is_none() {
            match undefined.iter_mut().find(|(country, _)| *country == row.country) {
                Some((_, count)) => *count += 1,
                None => undefined.push((row.country.clone(), 1)),
            }
        }
    }
    for (country, rows) in undefined {
        let warning = DataQualityWarning::UndefinedRate { country, rows };
        warn!("{warning}");
        diagnostics.push(warning);
    }
}

fn by_country_then_date(a: &PanelRow, b: &PanelRow) -> Ordering {
    a.country.cmp(&b.country).then(a.date.cmp(&b.date))
}

/// `deaths / cases`, with a zero denominator replaced by one.
pub fn death_rate(total_deaths: i64, total_cases: i64) -> f64 {
    let denominator = if total_cases == 0 { 1 } else { total_cases };
    total_deaths as f64 / denominator as f64
}

/// Percentage of the population fully vaccinated; unset unless population > 0.
pub fn vaccination_rate(people_fully_vaccinated: i64, population: Option<i64>) -> Option<f64> {
    match population {
        Some(population) if population > 0 => {
            Some(people_fully_vaccinated as f64 / population as f64 * 100.0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cases_keeps_deaths_as_rate() {
        assert_eq!(death_rate(3, 0), 3.0);
        assert_eq!(death_rate(0, 0), 0.0);
        assert_eq!(death_rate(1, 10), 0.1);
    }

    #[test]
    fn rate_needs_positive_population() {
        assert_eq!(vaccination_rate(10, Some(1000)), Some(1.0));
        assert_eq!(vaccination_rate(10, Some(0)), None);
        assert_eq!(vaccination_rate(10, Some(-5)), None);
        assert_eq!(vaccination_rate(10, None), None);
    }
}
