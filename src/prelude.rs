//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ## Usage
//!
//! ```rust
//! use secret_memo::prelude::*;
//! ```

// Core comparator and decision policy
pub use crate::gate::{ChangeDecision, ChangeGate, ChangeReason};
pub use crate::memo::{ErrorKind, MemoError, SecretDigest, SecretMemo, SecretValue};

// Reconciler integration
pub use crate::adapter::{
    hash_key, memo_schema, suppress_case_diff, AdapterError, FlattenOutcome,
    InMemoryResourceData, ResourceData, SecretDiffSuppressor,
};

// Config types
pub use crate::config::{LogFormat, MemoConfig};
