pub mod dates;
pub mod error;
pub mod keyed;
pub mod metric;
pub mod options;
pub mod panel;
pub mod records;
pub mod warnings;

pub use dates::parse_calendar_date;
pub use error::{PanelError, Result};
pub use keyed::{CountryDate, Keyed, KeyedTable};
pub use metric::Metric;
pub use options::{DEFAULT_COUNTRIES, PipelineOptions};
pub use panel::{MergedRow, PANEL_COLUMNS, Panel, PanelRow, SelectedCountry};
pub use records::{
    CountryCount, IdentifierKind, LongRecord, RateSourceRecord, ScheduleEntry, WideRow,
    WideSeriesTable,
};
pub use warnings::{DataQualityWarning, Diagnostics};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_serializes() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(DataQualityWarning::UndefinedRate {
            country: "A".to_string(),
            rows: 2,
        });
        let json = serde_json::to_string(&diagnostics).expect("serialize diagnostics");
        let round: Diagnostics = serde_json::from_str(&json).expect("deserialize diagnostics");
        assert_eq!(round, diagnostics);
        assert!(json.contains("\"kind\":\"undefined_rate\""));
    }
}
