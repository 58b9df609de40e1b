//! Observability subsystem.
//!
//! Structured logs only: startup, configuration, per-request debug events
//! keyed by request ID, and backend failures. Prompt text is never logged.

pub mod logging;

pub use logging::init_logging;
