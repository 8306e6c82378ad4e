//! Count cell parsing.

/// Outcome of parsing a count cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCell {
    /// Empty cell; the value is unknown.
    Unset,
    Value(i64),
    /// Non-numeric content.
    Invalid,
}

/// Parse a count cell.
///
/// Handles:
/// - Integers: "123", "-4"
/// - Float text as written by the rate source: "1234.0" (truncated)
/// - Thousands separators: "1,234"
/// - Whitespace: "  12  "
pub fn parse_count(value: &str) -> CountCell {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return CountCell::Unset;
    }
    let cleaned = trimmed.replace([',', '\u{a0}'], "");
    if let Ok(parsed) = cleaned.parse::<i64>() {
        return CountCell::Value(parsed);
    }
    match cleaned.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => CountCell::Value(parsed.trunc() as i64),
        // NaN marks a missing value in some exports
        Ok(parsed) if parsed.is_nan() => CountCell::Unset,
        _ => CountCell::Invalid,
    }
}
