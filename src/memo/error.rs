//! # Memo Errors
//!
//! Error taxonomy for hashing and verifying secret digests.

use thiserror::Error;

/// Coarse classification of a [`MemoError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The hashing primitive could not process the input or generate a salt
    HashingFailed,
    /// A stored digest could not be decoded
    MalformedDigest,
    /// The configured work factor is outside the range bcrypt supports
    InvalidCost,
}

impl ErrorKind {
    /// Get human-readable string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::HashingFailed => "hashing-failed",
            ErrorKind::MalformedDigest => "malformed-digest",
            ErrorKind::InvalidCost => "invalid-cost",
        }
    }
}

#[derive(Debug, Error)]
pub enum MemoError {
    #[error("Secret hashing failed: {reason}")]
    HashingFailed { reason: String },

    #[error("Stored digest is malformed: {reason}")]
    MalformedDigest { reason: String },

    #[error("Hash cost {cost} is outside the supported range {min}..={max}")]
    InvalidCost { cost: u32, min: u32, max: u32 },
}

impl MemoError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            MemoError::HashingFailed { .. } => ErrorKind::HashingFailed,
            MemoError::MalformedDigest { .. } => ErrorKind::MalformedDigest,
            MemoError::InvalidCost { .. } => ErrorKind::InvalidCost,
        }
    }

    pub(crate) fn hashing(reason: impl Into<String>) -> Self {
        MemoError::HashingFailed {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        MemoError::MalformedDigest {
            reason: reason.into(),
        }
    }
}
