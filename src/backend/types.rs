//! Backend generation schema and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::models::{null_as_default, PromptRequest};

/// Sampling options nested inside a generate request.
///
/// Zero values are left out so the backend applies its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Mirrors `max_tokens`.
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub num_predict: u32,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub temperature: f64,
}

fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

/// Body sent to the backend's generate endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always false: the response is decoded as a single JSON object.
    pub stream: bool,
    pub options: GenerationOptions,
}

impl GenerateRequest {
    /// Map an inbound prompt request onto the backend schema.
    pub fn from_prompt(model: &str, request: &PromptRequest) -> Self {
        Self {
            model: model.to_string(),
            prompt: request.prompt.clone(),
            stream: false,
            options: GenerationOptions {
                num_predict: request.max_tokens,
                temperature: request.temperature,
            },
        }
    }
}

/// Backend reply; every field other than `response` is ignored.
///
/// A missing or null `response` decodes as empty text.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: String,
}

/// Errors that can occur while calling the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The call did not complete within the configured timeout.
    #[error("backend request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection, DNS or other transport failure, with its cause chain.
    #[error("{0}")]
    Transport(String),

    /// Backend answered with a status other than 200.
    #[error("backend error: status={status} body={body}")]
    Status { status: u16, body: String },

    /// 200 response whose body is not a generate response.
    #[error("invalid backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_copies_fields() {
        let request = PromptRequest {
            prompt: "Tell a joke".into(),
            max_tokens: 200,
            temperature: 0.7,
        };

        let generate = GenerateRequest::from_prompt("qwen3:4b", &request);
        assert_eq!(generate.model, "qwen3:4b");
        assert_eq!(generate.prompt, "Tell a joke");
        assert!(!generate.stream);
        assert_eq!(generate.options.num_predict, 200);
        assert_eq!(generate.options.temperature, 0.7);
    }

    #[test]
    fn test_zero_options_are_omitted() {
        let request = PromptRequest {
            prompt: "hi".into(),
            ..Default::default()
        };

        let value = serde_json::to_value(GenerateRequest::from_prompt("m", &request)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "m",
                "prompt": "hi",
                "stream": false,
                "options": {}
            })
        );
    }

    #[test]
    fn test_only_set_options_are_serialized() {
        let request = PromptRequest {
            prompt: "hi".into(),
            max_tokens: 50,
            ..Default::default()
        };

        let value = serde_json::to_value(GenerateRequest::from_prompt("m", &request)).unwrap();
        assert_eq!(value["options"], serde_json::json!({ "num_predict": 50 }));
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"model":"qwen3:4b","created_at":"2025-01-01T00:00:00Z","response":"hello","done":true}"#,
        )
        .unwrap();
        assert_eq!(resp.response, "hello");
    }

    #[test]
    fn test_missing_or_null_response_is_empty() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert_eq!(resp.response, "");

        let resp: GenerateResponse = serde_json::from_str(r#"{"response":null}"#).unwrap();
        assert_eq!(resp.response, "");
    }

    #[test]
    fn test_error_display() {
        let err = BackendError::Status {
            status: 503,
            body: "overloaded".into(),
        };
        assert_eq!(err.to_string(), "backend error: status=503 body=overloaded");

        let err = BackendError::Timeout(60);
        assert_eq!(err.to_string(), "backend request timed out after 60 seconds");
    }
}
