//! # Logging Configuration
//!
//! Tracing subscriber setup for binaries embedding the adapter.
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to this
//! crate only.

use crate::config::{LogFormat, MemoConfig};
use anyhow::Result;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Log level configuration
///
/// Log levels follow standard hierarchy: DEBUG includes INFO and WARN, WARN includes ERROR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

impl LogLevel {
    /// Get the tracing level equivalent
    #[must_use]
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Default filter directive when `RUST_LOG` is unset
#[must_use]
pub fn default_directive(config: &MemoConfig) -> String {
    let level = LogLevel::from_str(&config.log_level)
        .unwrap_or_default()
        .to_tracing_level()
        .to_string()
        .to_lowercase();
    format!("secret_memo={level},smemo={level}")
}

/// Install the global tracing subscriber, writing to stderr.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &MemoConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let result = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}
