//! Loading of the long-format rate source (vaccinations and population).

use std::io::Read;

use epipanel_model::{PanelError, RateSourceRecord, parse_calendar_date};
use tracing::{debug, warn};

use crate::csv_table::{CsvTable, read_csv_table};
use crate::error::Result;
use crate::numeric::{CountCell, parse_count};

/// Name used for the rate source in errors and logs.
pub const RATE_TABLE: &str = "vaccinations";

const LOCATION: &str = "location";
const DATE: &str = "date";
const TOTAL_VACCINATIONS: &str = "total_vaccinations";
const PEOPLE_FULLY_VACCINATED: &str = "people_fully_vaccinated";
const POPULATION: &str = "population";
/// Region code column names, in preference order.
const REGION_CODE: [&str; 2] = ["region_code", "iso_code"];

/// Read the rate-source CSV into records.
pub fn read_rate_table<R: Read>(reader: R, source_name: &str) -> Result<Vec<RateSourceRecord>> {
    let table = read_csv_table(reader, source_name)?;
    rate_records_from_csv(&table)
}

/// Convert a raw rate-source CSV into records.
///
/// `location` and `date` are required. Missing numeric columns are treated as
/// entirely unset; a missing region code column yields empty codes.
pub fn rate_records_from_csv(table: &CsvTable) -> Result<Vec<RateSourceRecord>> {
    let required = |name: &str| {
        table.column_index(name).ok_or_else(|| PanelError::MissingColumn {
            table: RATE_TABLE.to_string(),
            column: name.to_string(),
        })
    };
    let location_idx = required(LOCATION)?;
    let date_idx = required(DATE)?;
    let total_idx = table.column_index(TOTAL_VACCINATIONS);
    let fully_idx = table.column_index(PEOPLE_FULLY_VACCINATED);
    let population_idx = table.column_index(POPULATION);
    let region_idx = REGION_CODE
        .iter()
        .find_map(|name| table.column_index(name));

    for (name, idx) in [
        (TOTAL_VACCINATIONS, total_idx),
        (PEOPLE_FULLY_VACCINATED, fully_idx),
        (POPULATION, population_idx),
    ] {
        if idx.is_none() {
            warn!(column = name, "rate source column missing; treating as unset");
        }
    }

    let mut records = Vec::with_capacity(table.rows.len());
    for row in 0..table.rows.len() {
        let location = table.cell(row, location_idx);
        if location.is_empty() {
            continue;
        }
        let raw_date = table.cell(row, date_idx);
        let date = parse_calendar_date(raw_date).ok_or_else(|| {
            PanelError::malformed_schedule(
                RATE_TABLE,
                raw_date,
                format!("in row {} is not a calendar date", row + 1),
            )
        })?;
        let count = |idx: Option<usize>, column: &str| -> Result<Option<i64>> {
            let Some(idx) = idx else {
                return Ok(None);
            };
            match parse_count(table.cell(row, idx)) {
                CountCell::Unset => Ok(None),
                CountCell::Value(value) => Ok(Some(value)),
                CountCell::Invalid => Err(PanelError::InvalidCell {
                    table: RATE_TABLE.to_string(),
                    row: row + 1,
                    column: column.to_string(),
                    value: table.cell(row, idx).to_string(),
                }
                .into()),
            }
        };
        records.push(RateSourceRecord {
            location_key: location.to_string(),
            date,
            total_vaccinations: count(total_idx, TOTAL_VACCINATIONS)?,
            people_fully_vaccinated: count(fully_idx, PEOPLE_FULLY_VACCINATED)?,
            population: count(population_idx, POPULATION)?,
            region_code: region_idx
                .map(|idx| table.cell(row, idx).to_string())
                .unwrap_or_default(),
        });
    }

    if records.is_empty() {
        return Err(PanelError::empty_table(RATE_TABLE, "no rows").into());
    }
    debug!(rows = records.len(), "rate source loaded");
    Ok(records)
}
