use shared::models::{ColumnError, IndicatorGroup};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Workbook error: {0}")]
    WorkbookError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    // Loader and config errors not classified above
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Classifies a loader error by its root cause. The context chain is kept in the
    /// message so the user sees which file and sheet failed.
    pub fn from_load_error(err: anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            return EngineError::IoError {
                source: std::io::Error::new(io.kind(), message),
            };
        }
        match err.downcast::<csv::Error>() {
            Ok(source) => EngineError::CsvSystemError { source },
            Err(_) => EngineError::WorkbookError(message),
        }
    }
}

/// Why one indicator group could not be computed. Returned as a value so the
/// caller decides how to display it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("column '{column}' holds non-numeric value '{value}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("total of 'Corrected_Costs' is zero, the adjusted capital yield is undefined")]
    ZeroCorrectedCosts,

    #[error("{group} evaluation produced a non-finite {what}")]
    NonFinite {
        group: IndicatorGroup,
        what: &'static str,
    },
}

impl From<ColumnError> for EvaluationError {
    fn from(err: ColumnError) -> Self {
        match err {
            ColumnError::Missing(column) => EvaluationError::MissingColumn(column),
            ColumnError::NonNumeric { column, row, value } => {
                EvaluationError::NonNumeric { column, row, value }
            }
        }
    }
}

impl From<EngineError> for tonic::Status {
    fn from(err: EngineError) -> Self {
        tracing::error!("Mapping EngineError to tonic::Status: {:?}", err);
        match err {
            EngineError::ConfigError(msg) => tonic::Status::invalid_argument(format!("Configuration error: {}", msg)),
            EngineError::WorkbookError(msg) => tonic::Status::invalid_argument(format!("Workbook error: {}", msg)),
            EngineError::CsvSystemError { source } => tonic::Status::invalid_argument(format!("CSV parsing system error: {}", source)),
            EngineError::IoError { source } => tonic::Status::internal(format!("I/O error: {}", source)),
            EngineError::SessionError(msg) => {
                if msg.to_lowercase().contains("not found") {
                    tonic::Status::not_found(msg)
                } else {
                    tonic::Status::internal(format!("Session error: {}", msg))
                }
            }
            EngineError::ProcessingError(msg) => tonic::Status::internal(format!("Processing error: {}", msg)),
            EngineError::AnyhowError(source) => tonic::Status::internal(format!("An internal error occurred: {:#}", source)),
        }
    }
}
