// Dashboard actions. Each one connects to the engine, runs one request and
// writes the outcome into the app state signal.
use dioxus::prelude::*;

use super::engine_client::EngineClient;
use crate::state::app_state::AppState;

pub async fn load_workbook(mut state: Signal<AppState>, endpoint: String, file_path: String) {
    state.write().busy = true;
    let session_id = state.read().session_id.clone();
    tracing::info!(path = %file_path, "Loading workbook");

    let outcome = async {
        let mut client = EngineClient::connect(&endpoint).await?;
        let loaded = client.load_workbook(file_path.clone(), session_id).await?;
        let preview = match loaded.sheet_names.first() {
            Some(sheet) => Some(client.get_sheet(loaded.session_id.clone(), sheet.clone()).await?),
            None => None,
        };
        Ok::<_, anyhow::Error>((loaded, preview))
    }
    .await;

    let mut s = state.write();
    match outcome {
        Ok((loaded, preview)) => {
            tracing::info!(session = %loaded.session_id, sheets = loaded.sheet_names.len(), "Workbook loaded");
            s.workbook_loaded(file_path, loaded);
            s.preview = preview;
        }
        Err(e) => {
            tracing::error!(error = %e, "Workbook load failed");
            s.load_failed(format!("{:#}", e));
        }
    }
    s.busy = false;
}

pub async fn select_sheet(mut state: Signal<AppState>, endpoint: String, sheet: String) {
    state.write().select_sheet(sheet.clone());
    let session_id = state.read().session_id.clone();
    if session_id.is_empty() {
        return;
    }

    let outcome = async {
        let mut client = EngineClient::connect(&endpoint).await?;
        client.get_sheet(session_id, sheet.clone()).await
    }
    .await;

    let mut s = state.write();
    match outcome {
        // The user may have picked another sheet meanwhile.
        Ok(table) if s.selected_sheet.as_deref() == Some(sheet.as_str()) => s.preview = Some(table),
        Ok(_) => {}
        Err(e) => {
            tracing::error!(sheet = %sheet, error = %e, "Sheet preview failed");
            s.request_failed(format!("{:#}", e));
        }
    }
}

pub async fn evaluate(mut state: Signal<AppState>, endpoint: String) {
    let (session_id, sheet, rate, language) = {
        let s = state.read();
        if !s.can_evaluate() {
            return;
        }
        (s.session_id.clone(), s.selected_sheet.clone().unwrap_or_default(), s.discount_rate_percent, s.language)
    };
    state.write().busy = true;
    tracing::info!(session = %session_id, sheet = %sheet, rate, %language, "Requesting evaluation");

    let outcome = async {
        let mut client = EngineClient::connect(&endpoint).await?;
        client.evaluate(session_id, sheet, rate, language).await
    }
    .await;

    let mut s = state.write();
    match outcome {
        Ok(mut result_set) => {
            tracing::info!(indicators = result_set.indicators.len(), failures = result_set.failures.len(), "Evaluation received");
            // Labels follow the language selected now, not at request time.
            result_set.relabel(s.language);
            s.evaluation_done(result_set);
        }
        Err(e) => {
            tracing::error!(error = %e, "Evaluation request failed");
            s.request_failed(format!("{:#}", e));
        }
    }
    s.busy = false;
}
