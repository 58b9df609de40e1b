//! Configuration validation.
//!
//! Serde handles syntax; this module checks values: addresses parse, the
//! backend URL is usable, timeouts and limits are non-zero. All errors are
//! collected rather than stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("backend.url '{url}' is invalid: {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("backend.model must not be empty")]
    EmptyModel,

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match url::Url::parse(&config.backend.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidBackendUrl {
            url: config.backend.url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidBackendUrl {
            url: config.backend.url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.backend.model.trim().is_empty() {
        errors.push(ValidationError::EmptyModel);
    }

    let non_zero = [
        ("backend.timeout_secs", config.backend.timeout_secs as usize),
        ("timeouts.read_secs", config.timeouts.read_secs as usize),
        ("timeouts.write_secs", config.timeouts.write_secs as usize),
        ("security.max_body_size", config.security.max_body_size),
    ];
    for (field, value) in non_zero {
        if value == 0 {
            errors.push(ValidationError::ZeroValue(field));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
