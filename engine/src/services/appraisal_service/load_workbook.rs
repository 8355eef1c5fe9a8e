// Handler for the LoadWorkbook RPC
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use crate::config::DataSettings;
use crate::data::{load_workbook, SessionStore};
use crate::error::EngineError;
use crate::services::{LoadWorkbookRequest, LoadWorkbookResponse};

pub async fn handle_load_workbook(
    req_payload: LoadWorkbookRequest,
    session_store: Arc<RwLock<SessionStore>>,
    data_settings: DataSettings,
) -> Result<Response<LoadWorkbookResponse>, Status> {
    if req_payload.file_path.trim().is_empty() {
        return Err(EngineError::ConfigError("file_path must not be empty".to_string()).into());
    }
    let path = PathBuf::from(&req_payload.file_path);

    // Parsing is blocking file I/O; keep it off the async workers.
    let workbook = tokio::task::spawn_blocking(move || load_workbook(&path, &data_settings))
        .await
        .map_err(|e| EngineError::ProcessingError(format!("Workbook loader task failed: {}", e)))?
        .map_err(EngineError::from_load_error)?;

    let session_id = if req_payload.session_id.is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        req_payload.session_id
    };
    let sheet_names = workbook.sheet_names();

    let mut store = session_store.write().await;
    store.insert(&session_id, workbook, chrono::Utc::now());
    drop(store);

    tracing::info!(session = %session_id, sheets = sheet_names.len(), path = %req_payload.file_path, "Workbook loaded");
    Ok(Response::new(LoadWorkbookResponse {
        success: true,
        message: format!("Loaded {} sheet(s) from {}", sheet_names.len(), req_payload.file_path),
        session_id,
        sheet_names,
    }))
}
