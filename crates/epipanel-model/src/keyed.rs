//! Ordered row storage with a derived `(country, date)` lookup index.
//!
//! Joins in this workspace are explicit index lookups against a `KeyedTable`
//! rather than relational operators: the driving side is iterated in order and
//! each row looks its partner up by exact key equality.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A row that can be addressed by `(country, date)`.
pub trait Keyed {
    fn country(&self) -> &str;
    fn date(&self) -> NaiveDate;
}

/// Owned `(country, date)` join key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CountryDate {
    pub country: String,
    pub date: NaiveDate,
}

impl CountryDate {
    pub fn new(country: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            country: country.into(),
            date,
        }
    }

    pub fn of<T: Keyed>(row: &T) -> Self {
        Self::new(row.country(), row.date())
    }
}

/// Rows in insertion order plus a per-country, per-date position index.
///
/// When two rows share a key the first one stays addressable; later ones are
/// kept in `rows` but counted in [`KeyedTable::duplicate_keys`].
#[derive(Debug, Clone)]
pub struct KeyedTable<T> {
    rows: Vec<T>,
    index: BTreeMap<String, BTreeMap<NaiveDate, usize>>,
    duplicate_keys: usize,
}

impl<T: Keyed> Default for KeyedTable<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: BTreeMap::new(),
            duplicate_keys: 0,
        }
    }
}

impl<T: Keyed> KeyedTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: T) {
        let position = self.rows.len();
        let dates = self.index.entry(row.country().to_string()).or_default();
        if dates.contains_key(&row.date()) {
            self.duplicate_keys += 1;
        } else {
            dates.insert(row.date(), position);
        }
        self.rows.push(row);
    }

    pub fn get(&self, country: &str, date: NaiveDate) -> Option<&T> {
        self.index
            .get(country)
            .and_then(|dates| dates.get(&date))
            .map(|&position| &self.rows[position])
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn duplicate_keys(&self) -> usize {
        self.duplicate_keys
    }

    /// Keep only the rows whose country satisfies `keep`, rebuilding the index.
    pub fn retain_countries(self, mut keep: impl FnMut(&str) -> bool) -> Self {
        self.rows
            .into_iter()
            .filter(|row| keep(row.country()))
            .collect()
    }
}

impl<T: Keyed> FromIterator<T> for KeyedTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        for row in iter {
            table.push(row);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        country: String,
        date: NaiveDate,
        value: i64,
    }

    impl Keyed for Point {
        fn country(&self) -> &str {
            &self.country
        }

        fn date(&self) -> NaiveDate {
            self.date
        }
    }

    fn point(country: &str, day: u32, value: i64) -> Point {
        Point {
            country: country.to_string(),
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            value,
        }
    }

    #[test]
    fn lookup_by_country_and_date() {
        let table: KeyedTable<Point> =
            vec![point("A", 2, 20), point("A", 1, 10), point("B", 1, 5)]
                .into_iter()
                .collect();

        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(table.get("A", date).map(|p| p.value), Some(10));
        assert_eq!(table.get("B", date).map(|p| p.value), Some(5));
        assert!(table.get("C", date).is_none());
        assert_eq!(table.rows()[0].value, 20);
    }

    #[test]
    fn first_duplicate_wins() {
        let table: KeyedTable<Point> = vec![point("A", 1, 10), point("A", 1, 99)]
            .into_iter()
            .collect();
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(table.get("A", date).map(|p| p.value), Some(10));
        assert_eq!(table.duplicate_keys(), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn retain_rebuilds_index() {
        let table: KeyedTable<Point> = vec![point("A", 1, 10), point("B", 1, 5)]
            .into_iter()
            .collect();
        let kept = table.retain_countries(|country| country == "B");
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(kept.len(), 1);
        assert!(kept.get("A", date).is_none());
        assert_eq!(kept.get("B", date).map(|p| p.value), Some(5));
    }
}
