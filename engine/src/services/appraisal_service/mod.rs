// engine/src/services/appraisal_service/mod.rs
// The AppraisalEngine service: owns the session store and the settings, and
// dispatches each RPC to its handler module.

use super::{
    AppraisalEngine, EvaluationRequest, EvaluationResponse, LoadWorkbookRequest,
    LoadWorkbookResponse, SheetChunk, SheetRequest,
};
use crate::config::EngineSettings;
use crate::data::SessionStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

pub mod evaluate;
pub mod get_sheet;
pub mod helpers;
pub mod load_workbook;

pub struct MyAppraisalEngine {
    session_store: Arc<RwLock<SessionStore>>,
    settings: EngineSettings,
}

impl MyAppraisalEngine {
    pub fn new(session_store: Arc<RwLock<SessionStore>>, settings: EngineSettings) -> Self {
        MyAppraisalEngine { session_store, settings }
    }
}

#[tonic::async_trait]
impl AppraisalEngine for MyAppraisalEngine {
    async fn load_workbook(&self, request: Request<LoadWorkbookRequest>) -> Result<Response<LoadWorkbookResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            path = %req_payload.file_path,
            session = %req_payload.session_id,
            "Received LoadWorkbookRequest, dispatching to handler."
        );
        load_workbook::handle_load_workbook(req_payload, self.session_store.clone(), self.settings.data.clone()).await
    }

    type GetSheetStream = ReceiverStream<Result<SheetChunk, Status>>;
    async fn get_sheet(&self, request: Request<SheetRequest>) -> Result<Response<Self::GetSheetStream>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            session = %req_payload.session_id,
            sheet = %req_payload.sheet_name,
            "Received GetSheetRequest, dispatching to handler."
        );
        get_sheet::handle_get_sheet(req_payload, self.session_store.clone(), self.settings.preview_chunk_rows).await
    }

    async fn evaluate(&self, request: Request<EvaluationRequest>) -> Result<Response<EvaluationResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            session = %req_payload.session_id,
            sheet = %req_payload.sheet_name,
            discount_rate_percent = req_payload.discount_rate_percent,
            language = %req_payload.language,
            "Received EvaluationRequest, dispatching to handler."
        );
        evaluate::handle_evaluate(req_payload, self.session_store.clone()).await
    }
}
