//! # Observability
//!
//! Observability modules for the reconciler boundary.
//!
//! - `logging`: tracing subscriber setup and log levels

pub mod logging;

// Re-export for convenience
pub use logging::*;
