use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::translations;

/// A single cell of a loaded sheet. Missing cells are stored as `Number(0.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("column '{0}' not found")]
    Missing(String),

    #[error("column '{column}' holds non-numeric value '{value}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
}

/// Rows are successive periods in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ProjectTable {
    /// Builds a table, padding short rows with zeros so every row has one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Number(0.0));
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.column_index(name).is_some())
    }

    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, ColumnError> {
        let cells = self
            .column(name)
            .ok_or_else(|| ColumnError::Missing(name.to_string()))?;
        cells
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.as_number().ok_or_else(|| ColumnError::NonNumeric {
                    column: name.to_string(),
                    row: row + 1,
                    value: cell.to_string(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorGroup {
    Financial,
    Economic,
}

impl IndicatorGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorGroup::Financial => "financial",
            IndicatorGroup::Economic => "economic",
        }
    }
}

impl fmt::Display for IndicatorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorGroup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "financial" => Ok(IndicatorGroup::Financial),
            "economic" => Ok(IndicatorGroup::Economic),
            other => Err(anyhow::anyhow!("Unknown indicator group '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorCode {
    Vanf,
    Trif,
    Drc,
    Vane,
    Trie,
    Rca,
}

impl IndicatorCode {
    /// Display order of the label table and the chart legend.
    pub const ALL: [IndicatorCode; 6] = [
        IndicatorCode::Vanf,
        IndicatorCode::Trif,
        IndicatorCode::Drc,
        IndicatorCode::Vane,
        IndicatorCode::Trie,
        IndicatorCode::Rca,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorCode::Vanf => "VANF",
            IndicatorCode::Trif => "TRIF",
            IndicatorCode::Drc => "DRC",
            IndicatorCode::Vane => "VANE",
            IndicatorCode::Trie => "TRIE",
            IndicatorCode::Rca => "RCA",
        }
    }

    pub fn group(&self) -> IndicatorGroup {
        match self {
            IndicatorCode::Vanf | IndicatorCode::Trif | IndicatorCode::Drc => {
                IndicatorGroup::Financial
            }
            IndicatorCode::Vane | IndicatorCode::Trie | IndicatorCode::Rca => {
                IndicatorGroup::Economic
            }
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        translations::label(*self, language)
    }
}

impl fmt::Display for IndicatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndicatorCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown indicator code '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            other => Err(anyhow::anyhow!(
                "Unsupported language '{}'. Use 'fr' or 'en'.",
                other
            )),
        }
    }
}

/// One row of the results table. `value` is `None` when the indicator could not be
/// determined (an IRR without a root, for instance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub code: IndicatorCode,
    pub label: String,
    pub value: Option<f64>,
}

impl IndicatorResult {
    pub fn new(code: IndicatorCode, value: Option<f64>, language: Language) -> Self {
        Self {
            code,
            label: code.label(language).to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationFailure {
    pub group: IndicatorGroup,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub indicators: Vec<IndicatorResult>,
    pub failures: Vec<EvaluationFailure>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Re-labels every indicator without touching the values.
    pub fn relabel(&mut self, language: Language) {
        for indicator in &mut self.indicators {
            indicator.label = indicator.code.label(language).to_string();
        }
    }

    /// Indicators that carry a value, in result order.
    pub fn plottable(&self) -> impl Iterator<Item = (&IndicatorResult, f64)> {
        self.indicators
            .iter()
            .filter_map(|ind| ind.value.filter(|v| v.is_finite()).map(|v| (ind, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ProjectTable {
        ProjectTable::new(
            vec!["Year".into(), "Revenues".into(), "Note".into()],
            vec![
                vec![CellValue::Number(2024.0), CellValue::Number(100.0), CellValue::Text("a".into())],
                vec![CellValue::Number(2025.0)],
            ],
        )
    }

    #[test]
    fn test_short_rows_are_padded_with_zero() {
        let table = sample_table();
        assert_eq!(table.rows[1].len(), 3);
        assert_eq!(table.rows[1][1], CellValue::Number(0.0));
        assert_eq!(table.rows[1][2], CellValue::Number(0.0));
    }

    #[test]
    fn test_numeric_column() {
        let table = sample_table();
        assert_eq!(table.numeric_column("Revenues").unwrap(), vec![100.0, 0.0]);
        assert_eq!(
            table.numeric_column("Costs"),
            Err(ColumnError::Missing("Costs".to_string()))
        );
        let err = table.numeric_column("Note").unwrap_err();
        assert_eq!(
            err,
            ColumnError::NonNumeric { column: "Note".into(), row: 1, value: "a".into() }
        );
    }

    #[test]
    fn test_has_columns() {
        let table = sample_table();
        assert!(table.has_columns(&["Year", "Revenues"]));
        assert!(!table.has_columns(&["Year", "Total_Costs"]));
        assert!(table.has_columns(&[]));
    }

    #[test]
    fn test_code_and_language_parsing() {
        assert_eq!("TRIE".parse::<IndicatorCode>().unwrap(), IndicatorCode::Trie);
        assert!("NPV".parse::<IndicatorCode>().is_err());
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::Fr);
    }

    #[test]
    fn test_relabel_keeps_values() {
        let mut set = ResultSet {
            indicators: vec![
                IndicatorResult::new(IndicatorCode::Vanf, Some(12.5), Language::Fr),
                IndicatorResult::new(IndicatorCode::Trif, None, Language::Fr),
            ],
            failures: vec![],
        };
        set.relabel(Language::En);
        assert_eq!(set.indicators[0].label, "Financial Net Present Value");
        assert_eq!(set.indicators[0].value, Some(12.5));
        assert_eq!(set.indicators[1].value, None);
        assert_eq!(set.plottable().count(), 1);
    }

    #[test]
    fn test_group_of_code() {
        assert_eq!(IndicatorCode::Drc.group(), IndicatorGroup::Financial);
        assert_eq!(IndicatorCode::Rca.group(), IndicatorGroup::Economic);
        assert_eq!("economic".parse::<IndicatorGroup>().unwrap(), IndicatorGroup::Economic);
    }
}
