// gRPC client for the AppraisalEngine service
use anyhow::{anyhow, Context, Result};
use engine::services::appraisal_service::helpers::from_sheet_chunks;
use engine::services::{
    AppraisalEngineClient, EvaluationRequest, EvaluationResponse, LoadWorkbookRequest,
    SheetRequest,
};
use shared::models::{
    EvaluationFailure, IndicatorCode, IndicatorGroup, IndicatorResult, Language, ProjectTable,
    ResultSet,
};
use tonic::transport::{Channel, Endpoint};

/// Outcome of a successful LoadWorkbook call.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedWorkbook {
    pub session_id: String,
    pub sheet_names: Vec<String>,
    pub message: String,
}

#[derive(Clone)]
pub struct EngineClient {
    client: AppraisalEngineClient<Channel>,
}

impl EngineClient {
    pub async fn connect(endpoint: &str) -> Result<Self> {
        let channel = Endpoint::from_shared(endpoint.to_string())
            .with_context(|| format!("Invalid engine endpoint '{}'", endpoint))?
            .connect()
            .await
            .with_context(|| format!("Could not reach the engine at {}", endpoint))?;
        tracing::debug!(endpoint, "Connected to engine");
        Ok(Self { client: AppraisalEngineClient::new(channel) })
    }

    /// Loads a workbook into `session_id`, or into a new session when it is empty.
    pub async fn load_workbook(&mut self, file_path: String, session_id: String) -> Result<LoadedWorkbook> {
        let request = tonic::Request::new(LoadWorkbookRequest { file_path, session_id });
        let response = self
            .client
            .load_workbook(request)
            .await
            .map_err(|status| anyhow!("{}", status.message()))?
            .into_inner();
        if !response.success {
            return Err(anyhow!(response.message));
        }
        Ok(LoadedWorkbook {
            session_id: response.session_id,
            sheet_names: response.sheet_names,
            message: response.message,
        })
    }

    pub async fn get_sheet(&mut self, session_id: String, sheet_name: String) -> Result<ProjectTable> {
        let request = tonic::Request::new(SheetRequest { session_id, sheet_name });
        let mut stream = self
            .client
            .get_sheet(request)
            .await
            .map_err(|status| anyhow!("{}", status.message()))?
            .into_inner();
        let mut chunks = Vec::new();
        while let Some(chunk) = stream.message().await.map_err(|status| anyhow!("{}", status.message()))? {
            chunks.push(chunk);
        }
        Ok(from_sheet_chunks(&chunks))
    }

    pub async fn evaluate(
        &mut self,
        session_id: String,
        sheet_name: String,
        discount_rate_percent: f64,
        language: Language,
    ) -> Result<ResultSet> {
        let request = tonic::Request::new(EvaluationRequest {
            session_id,
            sheet_name,
            discount_rate_percent,
            language: language.as_str().to_string(),
        });
        let response = self
            .client
            .evaluate(request)
            .await
            .map_err(|status| anyhow!("{}", status.message()))?
            .into_inner();
        to_result_set(response)
    }
}

/// Converts the wire response back into domain results.
pub fn to_result_set(response: EvaluationResponse) -> Result<ResultSet> {
    let indicators = response
        .indicators
        .into_iter()
        .map(|ind| {
            let code: IndicatorCode = ind.code.parse()?;
            Ok(IndicatorResult { code, label: ind.label, value: ind.value })
        })
        .collect::<Result<Vec<_>>>()?;
    let failures = response
        .failures
        .into_iter()
        .map(|f| {
            let group: IndicatorGroup = f.group.parse()?;
            Ok(EvaluationFailure { group, message: f.message })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ResultSet { indicators, failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::services::{ProtoEvaluationFailure, ProtoIndicatorValue};

    #[test]
    fn test_to_result_set() {
        let response = EvaluationResponse {
            indicators: vec![
                ProtoIndicatorValue { code: "VANF".into(), label: "Financial Net Present Value".into(), value: Some(46.5) },
                ProtoIndicatorValue { code: "TRIF".into(), label: "Financial Internal Rate of Return".into(), value: None },
            ],
            failures: vec![ProtoEvaluationFailure { group: "economic".into(), message: "boom".into() }],
        };
        let result_set = to_result_set(response).unwrap();
        assert_eq!(result_set.indicators[0].code, IndicatorCode::Vanf);
        assert_eq!(result_set.indicators[0].value, Some(46.5));
        assert_eq!(result_set.indicators[1].value, None);
        assert_eq!(result_set.failures[0].group, IndicatorGroup::Economic);
        assert_eq!(result_set.failures[0].message, "boom");
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let response = EvaluationResponse {
            indicators: vec![ProtoIndicatorValue { code: "XYZ".into(), label: String::new(), value: Some(1.0) }],
            failures: vec![],
        };
        assert!(to_result_set(response).is_err());
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_endpoint() {
        assert!(EngineClient::connect("not a uri").await.is_err());
    }
}
