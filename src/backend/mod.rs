//! Generation backend subsystem.
//!
//! # Data Flow
//! ```text
//! PromptRequest (validated by the HTTP front)
//!     → types.rs (map onto GenerateRequest, stream=false)
//!     → client.rs (single POST with whole-call timeout)
//!     → status check → GenerateResponse → generated text
//! ```
//!
//! # Design Decisions
//! - One outbound call per request; failures are returned, never retried
//! - One shared reqwest client per process (pooling delegated to reqwest)
//! - Error text is the diagnostic detail surfaced to the caller

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{BackendError, BackendResult, GenerateRequest, GenerateResponse, GenerationOptions};
