//! Wide-to-long reshaping of cumulative-count tables.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use epipanel_model::{
    LongRecord, Metric, PanelError, Result, ScheduleEntry, WideRow, WideSeriesTable,
    parse_calendar_date,
};

/// Long projection of a wide table, with the schedule it was read against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReshapedSeries {
    pub metric: Metric,
    pub identifier_columns: Vec<String>,
    pub schedule: Vec<ScheduleEntry>,
    /// One record per (row, date column), row-major.
    pub records: Vec<LongRecord>,
}

/// Parse date column headers into a strictly increasing schedule.
pub fn parse_schedule(metric: Metric, headers: &[String]) -> Result<Vec<ScheduleEntry>> {
    if headers.is_empty() {
        return Err(PanelError::empty_table(metric.as_str(), "no date columns"));
    }
    let mut schedule: Vec<ScheduleEntry> = Vec::with_capacity(headers.len());
    for header in headers {
        let date = parse_calendar_date(header).ok_or_else(|| {
            PanelError::malformed_schedule(metric.as_str(), header, "is not a calendar date")
        })?;
        if let Some(previous) = schedule.last()
            && previous.date >= date
        {
            return Err(PanelError::malformed_schedule(
                metric.as_str(),
                header,
                format!("does not follow {:?}", previous.header),
            ));
        }
        schedule.push(ScheduleEntry {
            date,
            header: header.clone(),
        });
    }
    Ok(schedule)
}

/// Project a wide table into one long record per (row, date column).
///
/// Identifier cells are carried over untouched; values are not checked for
/// monotonicity. Rows whose cell counts disagree with the table's columns are
/// rejected as `RaggedRow`.
pub fn reshape_wide(table: &WideSeriesTable) -> Result<ReshapedSeries> {
    let schedule = parse_schedule(table.metric, &table.date_headers)?;
    let country_index = table.country_index();
    let mut records = Vec::with_capacity(table.rows.len() * schedule.len());
    for (row_idx, row) in table.rows.iter().enumerate() {
        table.check_row(row_idx + 1, row)?;
        let country_key = &row.identifiers[country_index];
        for (entry, value) in schedule.iter().zip(&row.values) {
            records.push(LongRecord {
                row: row_idx,
                country_key: country_key.clone(),
                identifiers: row.identifiers.clone(),
                date: entry.date,
                metric: table.metric,
                value: *value,
            });
        }
    }
    debug!(
        metric = %table.metric,
        rows = table.rows.len(),
        dates = schedule.len(),
        records = records.len(),
        "reshape complete"
    );
    Ok(ReshapedSeries {
        metric: table.metric,
        identifier_columns: table.identifier_columns.clone(),
        schedule,
        records,
    })
}

/// Rebuild the wide table from a reshaped series.
///
/// Rows are keyed by their source row index in first-seen order, so rows with
/// identical identifiers stay distinct. Dates absent from a row become empty
/// cells. Records dated outside the schedule are dropped.
pub fn widen(series: &ReshapedSeries) -> Result<WideSeriesTable> {
    let headers = series
        .schedule
        .iter()
        .map(|entry| entry.header.clone())
        .collect();
    let mut table = WideSeriesTable::new(series.metric, series.identifier_columns.clone(), headers)?;
    let positions: HashMap<NaiveDate, usize> = series
        .schedule
        .iter()
        .enumerate()
        .map(|(idx, entry)| (entry.date, idx))
        .collect();

    let mut rows: Vec<WideRow> = Vec::new();
    let mut row_index: HashMap<usize, usize> = HashMap::new();
    for record in &series.records {
        let Some(&position) = positions.get(&record.date) else {
            continue;
        };
        let idx = *row_index.entry(record.row).or_insert_with(|| {
            rows.push(WideRow {
                identifiers: record.identifiers.clone(),
                values: vec![None; series.schedule.len()],
            });
            rows.len() - 1
        });
        rows[idx].values[position] = record.value;
    }
    for row in rows {
        table.push_row(row)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn schedule_parses_native_headers() {
        let schedule = parse_schedule(Metric::Cases, &headers(&["1/22/20", "1/23/20"])).unwrap();
        assert_eq!(schedule[0].date, NaiveDate::from_ymd_opt(2020, 1, 22).unwrap());
        assert_eq!(schedule[1].header, "1/23/20");
    }

    #[test]
    fn schedule_rejects_unparseable_header() {
        let err = parse_schedule(Metric::Deaths, &headers(&["1/22/20", "Jan 23"])).unwrap_err();
        match err {
            PanelError::MalformedSchedule { table, header, .. } => {
                assert_eq!(table, "deaths");
                assert_eq!(header, "Jan 23");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn schedule_rejects_out_of_order_dates() {
        let err = parse_schedule(Metric::Cases, &headers(&["1/23/20", "1/22/20"])).unwrap_err();
        assert!(matches!(err, PanelError::MalformedSchedule { .. }));

        let err = parse_schedule(Metric::Cases, &headers(&["1/22/20", "2020-01-22"])).unwrap_err();
        assert!(matches!(err, PanelError::MalformedSchedule { .. }));
    }

    #[test]
    fn schedule_requires_a_date_column() {
        let err = parse_schedule(Metric::Recovered, &[]).unwrap_err();
        assert!(matches!(err, PanelError::EmptyTable { .. }));
    }
}
