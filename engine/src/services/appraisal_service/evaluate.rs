// Handler for the Evaluate RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers::to_evaluation_response;
use crate::data::SessionStore;
use crate::error::EngineError;
use crate::indicators::appraise;
use crate::models::DiscountRate;
use crate::services::{EvaluationRequest, EvaluationResponse};
use shared::models::Language;

pub async fn handle_evaluate(
    req_payload: EvaluationRequest,
    session_store: Arc<RwLock<SessionStore>>,
) -> Result<Response<EvaluationResponse>, Status> {
    let rate = DiscountRate::from_percent(req_payload.discount_rate_percent)?;
    let language: Language = req_payload
        .language
        .parse()
        .map_err(|e: anyhow::Error| EngineError::ConfigError(e.to_string()))?;

    let mut store = session_store.write().await;
    let table = store.table(&req_payload.session_id, &req_payload.sheet_name, chrono::Utc::now());
    drop(store);
    let table = table?;

    let result_set = appraise(&table, rate).into_result_set(language);
    for failure in &result_set.failures {
        tracing::warn!(group = %failure.group, message = %failure.message, "Evaluation failed for group");
    }
    tracing::info!(
        session = %req_payload.session_id,
        sheet = %req_payload.sheet_name,
        rate = rate.value(),
        indicators = result_set.indicators.len(),
        failures = result_set.failures.len(),
        "Evaluation completed"
    );

    Ok(Response::new(to_evaluation_response(&result_set)))
}
