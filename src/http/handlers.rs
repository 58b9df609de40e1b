//! `/predict` handler and its error mapping.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::backend::BackendError;
use crate::http::models::{ApiResponse, PromptRequest};
use crate::http::request::request_id;
use crate::http::server::AppState;

/// Everything that can make `/predict` fail, rendered as plain text.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("prompt is required")]
    MissingPrompt,

    #[error("model error: {0}")]
    Model(#[from] BackendError),
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::InvalidBody(_) | PredictError::MissingPrompt => StatusCode::BAD_REQUEST,
            PredictError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Validate the prompt, forward it to the backend, and wrap the generated text.
pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse>, PredictError> {
    let request_id = request_id(&headers);

    let request: PromptRequest = serde_json::from_slice(&body).inspect_err(|e| {
        tracing::debug!(request_id = %request_id, error = %e, "Rejected undecodable request body");
    })?;

    if request.prompt.is_empty() {
        tracing::debug!(request_id = %request_id, "Rejected request without prompt");
        return Err(PredictError::MissingPrompt);
    }

    tracing::debug!(
        request_id = %request_id,
        model = %state.model,
        prompt_len = request.prompt.len(),
        max_tokens = request.max_tokens,
        temperature = request.temperature,
        "Forwarding prompt to backend"
    );

    let generated = state
        .backend
        .generate(&state.model, &request)
        .await
        .inspect_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Backend generation failed");
        })?;

    tracing::debug!(request_id = %request_id, generated_len = generated.len(), "Generation complete");

    Ok(Json(ApiResponse { generated }))
}
