// Number parsing and formatting shared by the CSV loader and the dashboard.
use anyhow::{anyhow, Result};
use std::str::FromStr;

use crate::models::CellValue;

/// Text that spreadsheet exports use for "no value". Read as zero, like a blank cell.
pub const MISSING_MARKERS: [&str; 25] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    "inf", "-inf", "+inf", "Inf", "-Inf", "Infinity", "-Infinity",
];

/// Separators used by a locale when writing numbers, e.g. `1.234,56` in French sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub thousand_separator: Option<char>,
}

impl NumberFormat {
    pub const POINT: NumberFormat = NumberFormat { decimal_separator: '.', thousand_separator: None };

    pub fn new(decimal_separator: char, thousand_separator: Option<char>) -> Self {
        Self { decimal_separator, thousand_separator }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::POINT
    }
}

/// Parses a decimal written with the given separators into `f64`.
/// Spaces (including non-breaking ones) are ignored.
pub fn parse_decimal(s: &str, format: NumberFormat) -> Result<f64> {
    let mut normalized = String::with_capacity(s.len());
    for ch in s.trim().chars() {
        if Some(ch) == format.thousand_separator || ch == ' ' || ch == '\u{a0}' {
            continue;
        }
        if ch == format.decimal_separator {
            normalized.push('.');
        } else {
            normalized.push(ch);
        }
    }
    let value = f64::from_str(&normalized).map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))?;
    if !value.is_finite() {
        return Err(anyhow!("Failed to parse decimal '{}': not a finite number", s));
    }
    Ok(value)
}

pub fn is_missing_marker(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed)
}

/// Reads one text cell: missing markers become zero, numbers are parsed with
/// `format`, anything else stays text.
pub fn text_to_cell(s: &str, format: NumberFormat) -> CellValue {
    if is_missing_marker(s) {
        return CellValue::Number(0.0);
    }
    let trimmed = s.trim();
    match parse_decimal(trimmed, format) {
        Ok(v) => CellValue::Number(v),
        Err(_) => CellValue::Text(trimmed.to_string()),
    }
}

/// Renders an indicator value for the results table; `None` is "not computable".
pub fn format_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.decimals$}", v, decimals = decimals),
        _ => "N/C".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRENCH: NumberFormat = NumberFormat { decimal_separator: ',', thousand_separator: Some('.') };

    #[test]
    fn test_parse_decimal_point() {
        assert_eq!(parse_decimal("123.45", NumberFormat::POINT).unwrap(), 123.45);
        assert_eq!(parse_decimal(" -50 ", NumberFormat::POINT).unwrap(), -50.0);
    }

    #[test]
    fn test_parse_decimal_comma_with_thousands() {
        assert_eq!(parse_decimal("1.234,56", FRENCH).unwrap(), 1234.56);
        assert_eq!(parse_decimal("600.822.115,84", FRENCH).unwrap(), 600822115.84);
    }

    #[test]
    fn test_parse_decimal_with_spaces() {
        let format = NumberFormat::new(',', None);
        assert_eq!(parse_decimal("1 234,5", format).unwrap(), 1234.5);
        assert_eq!(parse_decimal("1\u{a0}000", format).unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_decimal_invalid() {
        assert!(parse_decimal("abc", NumberFormat::POINT).is_err());
        assert!(parse_decimal("", NumberFormat::POINT).is_err());
    }

    #[test]
    fn test_parse_decimal_rejects_non_finite() {
        assert!(parse_decimal("NaN", NumberFormat::POINT).is_err());
        assert!(parse_decimal("inf", NumberFormat::POINT).is_err());
        assert!(parse_decimal("-infinity", NumberFormat::POINT).is_err());
    }

    #[test]
    fn test_missing_markers_read_as_zero() {
        for marker in ["", "  ", "NaN", "nan", "NA", "N/A", "n/a", "NULL", "None", "#N/A", "inf", "-inf"] {
            assert_eq!(text_to_cell(marker, NumberFormat::POINT), CellValue::Number(0.0), "marker {:?}", marker);
        }
        assert_eq!(text_to_cell(" 12.5 ", NumberFormat::POINT), CellValue::Number(12.5));
        assert_eq!(text_to_cell("abc", NumberFormat::POINT), CellValue::Text("abc".into()));
        assert_eq!(text_to_cell("1.234,5", NumberFormat::new(',', Some('.'))), CellValue::Number(1234.5));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(46.570645), 2), "46.57");
        assert_eq!(format_value(None, 2), "N/C");
        assert_eq!(format_value(Some(f64::NAN), 2), "N/C");
    }
}
