// Handler for the GetSheet RPC
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Response, Status};

use super::helpers::to_sheet_chunks;
use crate::data::SessionStore;
use crate::services::{SheetChunk, SheetRequest};

pub async fn handle_get_sheet(
    req_payload: SheetRequest,
    session_store: Arc<RwLock<SessionStore>>,
    chunk_rows: usize,
) -> Result<Response<ReceiverStream<Result<SheetChunk, Status>>>, Status> {
    tracing::debug!(session = %req_payload.session_id, sheet = %req_payload.sheet_name, "Handling GetSheetRequest in dedicated handler");

    let mut store = session_store.write().await;
    let table = store.table(&req_payload.session_id, &req_payload.sheet_name, chrono::Utc::now());
    drop(store); // Explicitly drop lock after data retrieval
    let table = table?;

    let chunks = to_sheet_chunks(&table, chunk_rows);
    let (tx, rx) = mpsc::channel(4);
    let sheet_for_log = req_payload.sheet_name.clone();

    tokio::spawn(async move {
        let count = chunks.len();
        for chunk in chunks {
            if let Err(e) = tx.send(Ok(chunk)).await {
                tracing::error!(error = ?e, sheet = %sheet_for_log, "Failed to send sheet chunk to stream (handler)");
                return;
            }
        }
        tracing::debug!(sheet = %sheet_for_log, chunks = count, "Sheet streamed (handler)");
    });

    Ok(Response::new(ReceiverStream::new(rx)))
}
