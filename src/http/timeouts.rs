//! Per-request read and write deadlines.
//!
//! # Responsibilities
//! - Read timeout: the full request body must arrive within `read_secs`
//! - Write timeout: the full response body must be produced within `write_secs`
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities around body buffering
//! - The backend call sits between the two deadlines and is bounded by the
//!   backend client's own timeout instead
//! - Bodies on this service are small JSON documents, so buffering is fine
//! - Handler responses are already in memory, so the write deadline only
//!   fires for streamed bodies; it guards any such body added later

use axum::{
    body::{self, Body},
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use tokio::time::timeout;

use crate::config::TimeoutConfig;
use crate::http::request::request_id;

/// Buffer the request body, rejecting requests that arrive too slowly.
pub async fn read_timeout(
    State(config): State<TimeoutConfig>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    match timeout(config.read(), body::to_bytes(body, usize::MAX)).await {
        Ok(Ok(bytes)) => next.run(Request::from_parts(parts, Body::from(bytes))).await,
        Ok(Err(e)) if exceeds_limit(&e) => {
            (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response()
        }
        Ok(Err(e)) => {
            tracing::debug!(request_id = %request_id(&parts.headers), error = %e, "Failed to read request body");
            (StatusCode::BAD_REQUEST, format!("invalid request body: {}", e)).into_response()
        }
        Err(_) => {
            tracing::warn!(
                request_id = %request_id(&parts.headers),
                read_secs = config.read_secs,
                "Request body read timed out"
            );
            (StatusCode::REQUEST_TIMEOUT, "request body read timed out").into_response()
        }
    }
}

/// Whether a body error came from the body size limit layer.
fn exceeds_limit(e: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(e);
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

/// Buffer the response body, failing the request if it is not ready in time.
pub async fn write_timeout(
    State(config): State<TimeoutConfig>,
    request: Request,
    next: Next,
) -> Response {
    let id = request_id(request.headers()).to_string();
    let response = next.run(request).await;
    let (parts, body) = response.into_parts();

    match timeout(config.write(), body::to_bytes(body, usize::MAX)).await {
        Ok(Ok(bytes)) => Response::from_parts(parts, Body::from(bytes)),
        Ok(Err(e)) => {
            tracing::error!(request_id = %id, error = %e, "Failed to produce response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(_) => {
            tracing::error!(request_id = %id, write_secs = config.write_secs, "Response write timed out");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
