//! Predict Proxy Library
//!
//! Accepts prompts on `POST /predict`, forwards them to a local generation
//! backend and returns the generated text as JSON.

pub mod backend;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use backend::BackendClient;
pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
