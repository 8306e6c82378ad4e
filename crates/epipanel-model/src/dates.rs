//! Calendar date parsing for schedule headers and rate-source cells.

use chrono::NaiveDate;

/// ISO 8601 extended date, used by the rate source.
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parse a complete calendar date, returning `None` when no format matches.
///
/// The cumulative-count provider labels its columns `M/D/YY`; `M/D/YYYY` and
/// ISO dates are accepted as well.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(year) = trimmed.rsplit_once('/').map(|(_, year)| year) {
        // `%y` would read "2020" as a bad two-digit year; pick by width.
        let format = if year.len() == 2 { "%m/%d/%y" } else { "%m/%d/%Y" };
        return NaiveDate::parse_from_str(trimmed, format).ok();
    }
    NaiveDate::parse_from_str(trimmed, ISO_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_short_us_headers() {
        assert_eq!(parse_calendar_date("1/22/20"), Some(ymd(2020, 1, 22)));
        assert_eq!(parse_calendar_date("12/3/21"), Some(ymd(2021, 12, 3)));
    }

    #[test]
    fn parses_long_us_and_iso() {
        assert_eq!(parse_calendar_date("1/22/2020"), Some(ymd(2020, 1, 22)));
        assert_eq!(parse_calendar_date(" 2021-02-28 "), Some(ymd(2021, 2, 28)));
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("Lat"), None);
        assert_eq!(parse_calendar_date("2/30/21"), None);
        assert_eq!(parse_calendar_date("2021-13-01"), None);
    }
}
