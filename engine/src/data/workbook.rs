// Workbook loading: every sheet of a spreadsheet file becomes a ProjectTable.
use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use shared::models::{CellValue, ProjectTable};
use shared::utils::{text_to_cell, NumberFormat};
use std::path::Path;

use super::csv_parser::load_csv_sheet;
use crate::config::DataSettings;

pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Named sheets in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<(String, ProjectTable)>,
}

impl Workbook {
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&ProjectTable> {
        self.sheets.iter().find(|(n, _)| n == name).map(|(_, table)| table)
    }
}

/// Loads a workbook, choosing the reader from the file extension.
pub fn load_workbook(path: &Path, settings: &DataSettings) -> Result<Workbook> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if extension == "csv" {
        let sheet_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Sheet1")
            .to_string();
        let table = load_csv_sheet(path, settings)?;
        return Ok(Workbook { sheets: vec![(sheet_name, table)] });
    }

    if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        return load_spreadsheet(path);
    }

    Err(anyhow!(
        "Unsupported file type '{}' for '{}'. Expected one of: {}, csv",
        extension,
        path.display(),
        WORKBOOK_EXTENSIONS.join(", ")
    ))
}

fn load_spreadsheet(path: &Path) -> Result<Workbook> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook '{}'", path.display()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("Failed to read sheet '{}'", name))?;
        let mut rows = range.rows();
        let columns = match rows.next() {
            Some(header) => header_names(header),
            None => Vec::new(),
        };
        let data = rows.map(|row| row.iter().map(cell_value).collect()).collect();
        tracing::debug!(sheet = %name, columns = columns.len(), "Sheet loaded");
        sheets.push((name, ProjectTable::new(columns, data)));
    }
    Ok(Workbook { sheets })
}

// Empty header cells are named after their position, as spreadsheet tools do.
fn header_names(header: &[Data]) -> Vec<String> {
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell {
            Data::Empty => format!("Unnamed: {}", idx),
            Data::String(s) if s.trim().is_empty() => format!("Unnamed: {}", idx),
            Data::String(s) => s.trim().to_string(),
            Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
            other => other.to_string(),
        })
        .collect()
}

/// Converts a spreadsheet cell. Empty and error cells become zero.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Number(if *b { 1.0 } else { 0.0 }),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::String(s) => text_cell(s),
        Data::Empty | Data::Error(_) => CellValue::Number(0.0),
        other => CellValue::Text(other.to_string()),
    }
}

/// Text cells that hold a plain number are read as numbers; blank text and
/// missing markers such as "n/a" count as zero.
pub fn text_cell(s: &str) -> CellValue {
    text_to_cell(s, NumberFormat::POINT)
}
