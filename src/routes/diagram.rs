//! Diagram generation route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::llm::types::LlmError;
use crate::services::diagram::{self, DiagramError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct DiagramResponse {
    pub mermaid_code: String,
    pub explanation: Option<String>,
}

/// Error body matching the wire contract: a human-readable detail string.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// `POST /generate-er-diagram` — natural-language description in, Mermaid out.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<DiagramResponse>, (StatusCode, Json<ErrorBody>)> {
    let Some(llm) = state.llm.as_ref() else {
        tracing::error!("diagram requested but LLM client is not available");
        return Err(diagram_error_to_response(&DiagramError::NotConfigured));
    };

    let diagram = diagram::generate(llm, &body.prompt)
        .await
        .map_err(|e| diagram_error_to_response(&e))?;

    Ok(Json(DiagramResponse { mermaid_code: diagram.mermaid_code, explanation: diagram.explanation }))
}

pub(crate) fn diagram_error_to_response(err: &DiagramError) -> (StatusCode, Json<ErrorBody>) {
    let (status, detail) = match err {
        DiagramError::EmptyDescription => (StatusCode::BAD_REQUEST, "Prompt cannot be empty.".to_string()),
        DiagramError::NotConfigured => (
            StatusCode::SERVICE_UNAVAILABLE,
            "AI service is unavailable due to configuration error.".to_string(),
        ),
        DiagramError::Llm(llm_err) => (llm_error_status(llm_err), format!("AI service error: {llm_err}")),
        DiagramError::EmptyCompletion => {
            (StatusCode::INTERNAL_SERVER_ERROR, "AI service returned an empty response.".to_string())
        }
    };
    (status, Json(ErrorBody { detail }))
}

fn llm_error_status(err: &LlmError) -> StatusCode {
    match err {
        LlmError::ApiRequest(_) | LlmError::ApiResponse { .. } => StatusCode::SERVICE_UNAVAILABLE,
        LlmError::ConfigParse(_) | LlmError::MissingApiKey { .. } | LlmError::HttpClientBuild(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        LlmError::ApiParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "diagram_test.rs"]
mod tests;
