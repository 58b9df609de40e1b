//! Generation backend HTTP client.
//!
//! # Responsibilities
//! - Translate a prompt request into the backend generate schema
//! - Issue exactly one POST per call, bounded by the configured timeout
//! - Surface non-200 statuses with their raw body for diagnostics
//! - Decode the single JSON reply into generated text

use std::error::Error as _;
use std::time::Duration;

use reqwest::StatusCode;

use crate::backend::types::{BackendError, BackendResult, GenerateRequest, GenerateResponse};
use crate::config::BackendConfig;
use crate::http::models::PromptRequest;

/// Client for the local generation service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl BackendClient {
    /// Create a new backend client.
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let timeout = config.timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(error_chain(&e)))?;

        tracing::info!(
            url = %config.url,
            timeout_secs = config.timeout_secs,
            "Backend client initialized"
        );

        Ok(Self {
            http,
            url: config.url.clone(),
            timeout,
        })
    }

    /// Pure field mapping from the public schema to the backend schema.
    pub fn translate(model: &str, request: &PromptRequest) -> GenerateRequest {
        GenerateRequest::from_prompt(model, request)
    }

    /// Run one generation and return the produced text.
    pub async fn generate(&self, model: &str, request: &PromptRequest) -> BackendResult<String> {
        let body = Self::translate(model, request);

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            // A failed body read is reported as an empty body.
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.map_transport(e))?;
        let decoded: GenerateResponse = serde_json::from_slice(&bytes)?;

        Ok(decoded.response)
    }

    fn map_transport(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout(self.timeout.as_secs())
        } else {
            BackendError::Transport(error_chain(&e))
        }
    }
}

/// Render an error with all of its sources, joined by ": ".
fn error_chain(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
