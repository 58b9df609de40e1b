//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the `/predict` handler
//! - Wire up middleware (request ID, tracing, body limit, read/write deadlines)
//! - Build the shared backend client once and inject it through state
//! - Serve on a listener until the shutdown signal fires

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::post,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::backend::{BackendClient, BackendResult};
use crate::config::ProxyConfig;
use crate::http::handlers::predict;
use crate::http::request::MakeRequestUuidV4;
use crate::http::timeouts::{read_timeout, write_timeout};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub model: Arc<str>,
}

/// HTTP server for the predict proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> BackendResult<Self> {
        let state = AppState {
            backend: BackendClient::new(&config.backend)?,
            model: Arc::from(config.backend.model.as_str()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/predict", post(predict))
            .with_state(state)
            .layer(middleware::from_fn_with_state(config.timeouts.clone(), write_timeout))
            .layer(middleware::from_fn_with_state(config.timeouts.clone(), read_timeout))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            model = %self.config.backend.model,
            backend = %self.config.backend.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a clone of the router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
