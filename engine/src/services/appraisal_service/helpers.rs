// Conversions between domain models and the generated protobuf types.
use shared::models::{CellValue, EvaluationFailure, IndicatorResult, ProjectTable, ResultSet};

use crate::services::{
    cell, EvaluationResponse, ProtoCell, ProtoEvaluationFailure, ProtoIndicatorValue, ProtoRow,
    SheetChunk,
};

pub fn to_proto_cell(value: &CellValue) -> ProtoCell {
    let kind = match value {
        CellValue::Number(v) => cell::Kind::Number(*v),
        CellValue::Text(s) => cell::Kind::Text(s.clone()),
    };
    ProtoCell { kind: Some(kind) }
}

pub fn from_proto_cell(proto: &ProtoCell) -> CellValue {
    match &proto.kind {
        Some(cell::Kind::Number(v)) => CellValue::Number(*v),
        Some(cell::Kind::Text(s)) => CellValue::Text(s.clone()),
        None => CellValue::Number(0.0),
    }
}

/// Splits a table into preview chunks of at most `chunk_rows` rows. An empty table
/// still yields one chunk so the receiver learns the column names.
pub fn to_sheet_chunks(table: &ProjectTable, chunk_rows: usize) -> Vec<SheetChunk> {
    let chunk_rows = chunk_rows.max(1);
    if table.rows.is_empty() {
        return vec![SheetChunk { columns: table.columns.clone(), rows: vec![] }];
    }
    table
        .rows
        .chunks(chunk_rows)
        .map(|rows| SheetChunk {
            columns: table.columns.clone(),
            rows: rows
                .iter()
                .map(|row| ProtoRow { cells: row.iter().map(to_proto_cell).collect() })
                .collect(),
        })
        .collect()
}

/// Reassembles streamed chunks into a table. Columns are taken from the first chunk.
pub fn from_sheet_chunks(chunks: &[SheetChunk]) -> ProjectTable {
    let columns = chunks.first().map(|c| c.columns.clone()).unwrap_or_default();
    let rows = chunks
        .iter()
        .flat_map(|chunk| chunk.rows.iter())
        .map(|row| row.cells.iter().map(from_proto_cell).collect())
        .collect();
    ProjectTable::new(columns, rows)
}

pub fn to_proto_indicator(result: &IndicatorResult) -> ProtoIndicatorValue {
    ProtoIndicatorValue {
        code: result.code.as_str().to_string(),
        label: result.label.clone(),
        value: result.value,
    }
}

pub fn to_proto_failure(failure: &EvaluationFailure) -> ProtoEvaluationFailure {
    ProtoEvaluationFailure {
        group: failure.group.as_str().to_string(),
        message: failure.message.clone(),
    }
}

pub fn to_evaluation_response(result_set: &ResultSet) -> EvaluationResponse {
    EvaluationResponse {
        indicators: result_set.indicators.iter().map(to_proto_indicator).collect(),
        failures: result_set.failures.iter().map(to_proto_failure).collect(),
    }
}
