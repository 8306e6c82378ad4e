//! Flat CSV snapshots of the panel.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, SerWriter, Series};
use tracing::debug;

use epipanel_model::PanelRow;

use crate::common::ensure_parent_dir;

/// Build a frame with one column per panel field, in panel column order.
///
/// Dates become ISO `YYYY-MM-DD` strings; unset values become nulls.
pub fn panel_frame<'a, I>(rows: I) -> Result<DataFrame>
where
    I: IntoIterator<Item = &'a PanelRow>,
{
    let rows: Vec<&PanelRow> = rows.into_iter().collect();
    let columns: Vec<Column> = vec![
        Series::new(
            "country".into(),
            rows.iter()
                .map(|row| row.country.clone())
                .collect::<Vec<String>>(),
        )
        .into_column(),
        Series::new(
            "date".into(),
            rows.iter()
                .map(|row| row.date.format("%Y-%m-%d").to_string())
                .collect::<Vec<String>>(),
        )
        .into_column(),
        Series::new(
            "total_cases".into(),
            rows.iter().map(|row| row.total_cases).collect::<Vec<i64>>(),
        )
        .into_column(),
        Series::new(
            "total_deaths".into(),
            rows.iter().map(|row| row.total_deaths).collect::<Vec<i64>>(),
        )
        .into_column(),
        Series::new(
            "total_recovered".into(),
            rows.iter().map(|row| row.total_recovered).collect::<Vec<i64>>(),
        )
        .into_column(),
        Series::new(
            "new_cases".into(),
            rows.iter().map(|row| row.new_cases).collect::<Vec<i64>>(),
        )
        .into_column(),
        Series::new(
            "new_deaths".into(),
            rows.iter().map(|row| row.new_deaths).collect::<Vec<i64>>(),
        )
        .into_column(),
        Series::new(
            "death_rate".into(),
            rows.iter().map(|row| row.death_rate).collect::<Vec<f64>>(),
        )
        .into_column(),
        Series::new(
            "total_vaccinations".into(),
            rows.iter()
                .map(|row| row.total_vaccinations)
                .collect::<Vec<i64>>(),
        )
        .into_column(),
        Series::new(
            "people_fully_vaccinated".into(),
            rows.iter()
                .map(|row| row.people_fully_vaccinated)
                .collect::<Vec<i64>>(),
        )
        .into_column(),
        Series::new(
            "population".into(),
            rows.iter().map(|row| row.population).collect::<Vec<Option<i64>>>(),
        )
        .into_column(),
        Series::new(
            "vaccination_rate".into(),
            rows.iter()
                .map(|row| row.vaccination_rate)
                .collect::<Vec<Option<f64>>>(),
        )
        .into_column(),
        Series::new(
            "region_code".into(),
            rows.iter()
                .map(|row| row.region_code.clone())
                .collect::<Vec<Option<String>>>(),
        )
        .into_column(),
    ];
    DataFrame::new(columns).context("build panel frame")
}

/// Write `rows` as CSV with a header row; nulls are written as empty cells.
pub fn write_panel_csv<'a, I>(path: &Path, rows: I) -> Result<()>
where
    I: IntoIterator<Item = &'a PanelRow>,
{
    let mut frame = panel_frame(rows)?;
    ensure_parent_dir(path)?;
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), rows = frame.height(), "panel csv written");
    Ok(())
}
