//! Tests for panel model types.

use chrono::NaiveDate;

use epipanel_model::{
    DataQualityWarning, Diagnostics, PANEL_COLUMNS, Panel, PanelRow, PipelineOptions,
    SelectedCountry,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
}

fn row(country: &str, day: u32) -> PanelRow {
    PanelRow {
        country: country.to_string(),
        date: date(day),
        total_cases: 0,
        total_deaths: 0,
        total_recovered: 0,
        new_cases: 0,
        new_deaths: 0,
        death_rate: 0.0,
        total_vaccinations: 0,
        people_fully_vaccinated: 0,
        population: None,
        vaccination_rate: None,
        region_code: None,
    }
}

fn selected(name: &str) -> SelectedCountry {
    SelectedCountry {
        requested: name.to_string(),
        canonical: name.to_string(),
    }
}

#[test]
fn panel_tracks_max_date_and_latest() {
    let panel = Panel::new(
        vec![row("A", 1), row("A", 3), row("B", 2), row("B", 3)],
        vec![selected("A"), selected("B")],
    );

    assert_eq!(panel.max_date, Some(date(3)));
    let latest: Vec<&str> = panel
        .latest()
        .into_iter()
        .map(|row| row.country.as_str())
        .collect();
    assert_eq!(latest, vec!["A", "B"]);
    assert_eq!(panel.canonical_countries(), vec!["A", "B"]);
    assert_eq!(panel.country_rows("B").count(), 2);
}

#[test]
fn empty_panel_has_no_latest() {
    let panel = Panel::new(Vec::new(), vec![selected("Nowhere")]);
    assert!(panel.is_empty());
    assert!(panel.max_date.is_none());
    assert!(panel.latest().is_empty());
}

#[test]
fn panel_columns_follow_row_field_order() {
    let json = serde_json::to_value(row("A", 1)).expect("serialize row");
    let object = json.as_object().expect("row object");
    assert_eq!(object.len(), PANEL_COLUMNS.len());
    for column in PANEL_COLUMNS {
        assert!(object.contains_key(column), "missing {column}");
    }
}

#[test]
fn empty_selection_falls_back_to_defaults() {
    let options = PipelineOptions::new().with_countries(["  ", ""]);
    assert!(options.uses_default_selection());
    assert_eq!(options.effective_selection(), options.default_countries);

    let options = PipelineOptions::new().with_countries([" India ", "Brazil"]);
    assert!(!options.uses_default_selection());
    assert_eq!(options.effective_selection(), vec!["India", "Brazil"]);
}

#[test]
fn options_deserialize_with_defaults() {
    let options: PipelineOptions =
        serde_json::from_str(r#"{"countries": ["US"]}"#).expect("deserialize options");
    assert_eq!(options.countries, vec!["US"]);
    assert_eq!(options.default_countries.len(), 5);
    assert!(options.aliases.is_empty());
}

#[test]
fn diagnostics_queries() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(DataQualityWarning::ZeroSelection {
        requested: "Atlantis".to_string(),
        canonical: "Atlantis".to_string(),
    });
    diagnostics.push(DataQualityWarning::UndefinedRate {
        country: "A".to_string(),
        rows: 4,
    });

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.zero_selections().collect::<Vec<_>>(), vec!["Atlantis"]);
    assert_eq!(diagnostics.undefined_rate_rows("A"), 4);
    assert_eq!(diagnostics.undefined_rate_rows("B"), 0);
    assert_eq!(
        diagnostics.warnings[0].to_string(),
        "no rows for selected country \"Atlantis\""
    );
}
