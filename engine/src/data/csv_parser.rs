// CSV sheets: one table per file, numbers written with configurable separators.
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use shared::models::{CellValue, ProjectTable};
use shared::utils::{text_to_cell, NumberFormat};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::DataSettings;

pub fn load_csv_sheet(path: &Path, settings: &DataSettings) -> Result<ProjectTable> {
    let delimiter = settings.delimiter()?;
    let format = settings.number_format()?;
    let file = File::open(path).with_context(|| format!("Failed to open CSV file '{}'", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true) // Short rows are padded with zeros.
        .from_reader(BufReader::new(file));

    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(anyhow!("CSV file '{}' has no header row", path.display()));
    }
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            let h = h.trim().trim_start_matches('\u{feff}');
            if h.is_empty() { format!("Unnamed: {}", idx) } else { h.to_string() }
        })
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Error reading CSV record at line {}", idx + 2))?;
        if record.len() > columns.len() {
            return Err(anyhow!(
                "CSV record at line {} has {} fields but the header has {}",
                idx + 2,
                record.len(),
                columns.len()
            ));
        }
        rows.push(record.iter().map(|field| csv_cell(field, format)).collect());
    }
    tracing::debug!(path = %path.display(), columns = columns.len(), rows = rows.len(), "CSV sheet loaded");
    Ok(ProjectTable::new(columns, rows))
}

fn csv_cell(field: &str, format: NumberFormat) -> CellValue {
    text_to_cell(field, format)
}
