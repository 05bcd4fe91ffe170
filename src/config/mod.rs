//! # Configuration
//!
//! Runtime settings loaded from environment variables.
//!
//! - `memo`: hashing cost and logging settings

pub mod memo;

pub use memo::{ConfigError, LogFormat, MemoConfig};
