//! Wire types for the public `/predict` endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// Inbound prompt request.
///
/// A missing or null field decodes as its zero value, so an absent `prompt`
/// reaches the handler as empty and gets a dedicated message instead of a
/// generic decode error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PromptRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,
    /// Maximum tokens to generate; 0 leaves the choice to the backend.
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_tokens: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature: f64,
}

/// Deserialize `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Successful `/predict` response body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiResponse {
    pub generated: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default_to_zero() {
        let req: PromptRequest = serde_json::from_str(r#"{"prompt":"hi"}"#).unwrap();
        assert_eq!(req.prompt, "hi");
        assert_eq!(req.max_tokens, 0);
        assert_eq!(req.temperature, 0.0);
    }

    #[test]
    fn test_missing_prompt_is_empty() {
        let req: PromptRequest = serde_json::from_str(r#"{"max_tokens":10}"#).unwrap();
        assert!(req.prompt.is_empty());
    }

    #[test]
    fn test_null_fields_are_zero() {
        let req: PromptRequest =
            serde_json::from_str(r#"{"prompt":null,"max_tokens":null,"temperature":null}"#).unwrap();
        assert_eq!(req, PromptRequest::default());
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        assert!(serde_json::from_str::<PromptRequest>(r#"{"prompt":"hi","max_tokens":"ten"}"#).is_err());
        assert!(serde_json::from_str::<PromptRequest>(r#"{"prompt":"hi","max_tokens":-1}"#).is_err());
    }

    #[test]
    fn test_response_shape() {
        let body = serde_json::to_string(&ApiResponse { generated: "hello".into() }).unwrap();
        assert_eq!(body, r#"{"generated":"hello"}"#);
    }
}
