//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (add request ID)
//!     → timeouts.rs (buffer body under the read deadline)
//!     → handlers.rs (decode, validate, call backend)
//!     → timeouts.rs (buffer response under the write deadline)
//!     → Send to client
//! ```

pub mod handlers;
pub mod models;
pub mod request;
pub mod server;
pub mod timeouts;

pub use handlers::PredictError;
pub use models::{ApiResponse, PromptRequest};
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
