//! # Memo Configuration
//!
//! Hashing and logging settings loaded from environment variables.

use crate::constants::{
    DEFAULT_HASH_COST, DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_MAX_VERIFY_COST,
    MAX_HASH_COST, MIN_HASH_COST,
};
use crate::gate::ChangeGate;
use crate::memo::SecretMemo;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}', expected text or json")),
        }
    }
}

/// Hashing and logging configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct MemoConfig {
    /// bcrypt work factor for new digests (`SECRET_MEMO_COST`)
    /// Existing digests keep the cost they were created with
    pub hash_cost: u32,
    /// Highest cost a recorded digest may carry (`SECRET_MEMO_MAX_VERIFY_COST`)
    /// Digests above it are treated as malformed and replaced
    pub max_verify_cost: u32,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    /// Used when `RUST_LOG` is not set
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: LogFormat,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            hash_cost: DEFAULT_HASH_COST,
            max_verify_cost: DEFAULT_MAX_VERIFY_COST,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl MemoConfig {
    /// Load configuration from environment variables with defaults
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for values that are set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            hash_cost: env_var_or_default("SECRET_MEMO_COST", DEFAULT_HASH_COST)?,
            max_verify_cost: env_var_or_default(
                "SECRET_MEMO_MAX_VERIFY_COST",
                DEFAULT_MAX_VERIFY_COST,
            )?,
            log_level: env_var_or_default_str("LOG_LEVEL", DEFAULT_LOG_LEVEL),
            log_format: env_var_or_default(
                "LOG_FORMAT",
                LogFormat::from_str(DEFAULT_LOG_FORMAT).unwrap_or_default(),
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that both costs are ones bcrypt accepts
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` when a cost is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, cost) in [
            ("SECRET_MEMO_COST", self.hash_cost),
            ("SECRET_MEMO_MAX_VERIFY_COST", self.max_verify_cost),
        ] {
            if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&cost) {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: cost.to_string(),
                    reason: format!("must be between {MIN_HASH_COST} and {MAX_HASH_COST}"),
                });
            }
        }
        Ok(())
    }

    /// Build a change gate using the configured costs
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` when a cost is out of range.
    pub fn change_gate(&self) -> Result<ChangeGate, ConfigError> {
        let memo = SecretMemo::new(self.hash_cost).map_err(|e| ConfigError::InvalidValue {
            key: "SECRET_MEMO_COST",
            value: self.hash_cost.to_string(),
            reason: e.to_string(),
        })?;
        let memo = memo
            .with_max_verify_cost(self.max_verify_cost)
            .map_err(|e| ConfigError::InvalidValue {
                key: "SECRET_MEMO_MAX_VERIFY_COST",
                value: self.max_verify_cost.to_string(),
                reason: e.to_string(),
            })?;
        Ok(ChangeGate::new(memo))
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                key,
                value: value.clone(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MemoConfig::default();
        assert_eq!(config.hash_cost, DEFAULT_HASH_COST);
        assert_eq!(config.log_level, "INFO");
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_cost() {
        let config = MemoConfig {
            hash_cost: 40,
            ..MemoConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.change_gate().is_err());
    }

    #[test]
    fn test_change_gate_uses_cost() {
        let config = MemoConfig {
            hash_cost: MIN_HASH_COST,
            ..MemoConfig::default()
        };
        let gate = config.change_gate().unwrap();
        assert_eq!(gate.memo().cost(), MIN_HASH_COST);
        assert_eq!(gate.memo().max_verify_cost(), DEFAULT_MAX_VERIFY_COST);
    }

    #[test]
    fn test_validate_rejects_out_of_range_verify_ceiling() {
        let config = MemoConfig {
            max_verify_cost: 32,
            ..MemoConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SECRET_MEMO_MAX_VERIFY_COST"));
        assert!(config.change_gate().is_err());
    }
}
