// Models and helpers used on both sides of the gRPC boundary.
pub mod models;
pub mod translations;
pub mod utils;

pub use models::{
    CellValue, ColumnError, EvaluationFailure, IndicatorCode, IndicatorGroup, IndicatorResult,
    Language, ProjectTable, ResultSet,
};
