//! Joining the country-level tables into merged rows.
//!
//! Cases drive the row set: deaths are inner-joined, recoveries and the rate
//! source are left-joined, all on exact `(country, date)` equality.

use tracing::{debug, warn};

use epipanel_model::{CountryCount, KeyedTable, MergedRow, RateSourceRecord};

/// Cases ⋈ deaths, then ⟕ recovered.
pub fn merge_cumulative(
    cases: &KeyedTable<CountryCount>,
    deaths: &KeyedTable<CountryCount>,
    recovered: &KeyedTable<CountryCount>,
) -> Vec<MergedRow> {
    let mut merged = Vec::with_capacity(cases.len());
    let mut dropped = 0usize;
    for case in cases.rows() {
        let Some(death) = deaths.get(&case.country, case.date) else {
            dropped += 1;
            continue;
        };
        let recovery = recovered
            .get(&case.country, case.date)
            .and_then(|count| count.value);
        merged.push(MergedRow::cumulative(
            case.country.clone(),
            case.date,
            case.value,
            death.value,
            recovery,
        ));
    }
    if dropped > 0 {
        warn!(rows = dropped, "cases rows without matching deaths were dropped");
    }
    merged
}

/// Left-join rate-source fields onto `rows`; rows without coverage keep them unset.
pub fn join_rate_source(
    mut rows: Vec<MergedRow>,
    rates: &KeyedTable<RateSourceRecord>,
) -> Vec<MergedRow> {
    if rates.duplicate_keys() > 0 {
        warn!(
            duplicates = rates.duplicate_keys(),
            "rate source has duplicate (country, date) keys; first occurrence used"
        );
    }
    let mut covered = 0usize;
    for row in &mut rows {
        let Some(rate) = rates.get(&row.country, row.date) else {
            continue;
        };
        covered += 1;
        row.total_vaccinations = rate.total_vaccinations;
        row.people_fully_vaccinated = rate.people_fully_vaccinated;
        row.population = rate.population;
        row.region_code = Some(rate.region_code.clone()).filter(|code| !code.is_empty());
    }
    debug!(rows = rows.len(), covered, "rate source joined");
    rows
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, day).unwrap()
    }

    fn counts(rows: &[(&str, u32, Option<i64>)]) -> KeyedTable<CountryCount> {
        rows.iter()
            .map(|(country, day, value)| CountryCount {
                country: (*country).to_string(),
                date: date(*day),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn deaths_are_inner_joined() {
        let cases = counts(&[("A", 1, Some(10)), ("A", 2, Some(15)), ("B", 1, Some(3))]);
        let deaths = counts(&[("A", 1, Some(1)), ("A", 2, Some(2))]);
        let recovered = counts(&[("A", 2, Some(4))]);

        let merged = merge_cumulative(&cases, &deaths, &recovered);

        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|row| row.country == "A"));
        assert_eq!(merged[0].total_recovered, None);
        assert_eq!(merged[1].total_recovered, Some(4));
        assert_eq!(merged[1].total_deaths, Some(2));
    }

    #[test]
    fn rate_source_never_adds_rows() {
        let rows = vec![MergedRow::cumulative("A", date(1), Some(1), Some(0), None)];
        let rates: KeyedTable<RateSourceRecord> = vec![
            RateSourceRecord {
                location_key: "A".to_string(),
                date: date(1),
                total_vaccinations: Some(50),
                people_fully_vaccinated: Some(10),
                population: Some(100),
                region_code: "AAA".to_string(),
            },
            RateSourceRecord {
                location_key: "A".to_string(),
                date: date(2),
                total_vaccinations: Some(60),
                people_fully_vaccinated: Some(20),
                population: Some(100),
                region_code: String::new(),
            },
        ]
        .into_iter()
        .collect();

        let joined = join_rate_source(rows, &rates);

        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].people_fully_vaccinated, Some(10));
        assert_eq!(joined[0].population, Some(100));
        assert_eq!(joined[0].region_code.as_deref(), Some("AAA"));
    }
}
