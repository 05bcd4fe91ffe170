//! Secret Memo Library
//!
//! Detects whether a write-only secret changed between reconciliation passes
//! without keeping the secret in durable state. Only a salted bcrypt digest is
//! persisted, under a companion `<attr>_hash` attribute.
//!
//! ## Quick Start
//!
//! ```rust
//! use secret_memo::prelude::*;
//!
//! let gate = ChangeGate::new(SecretMemo::new(4).unwrap());
//! let first = gate.evaluate(&SecretValue::new("s3cr3t"), &SecretDigest::empty());
//! assert!(first.is_changed());
//!
//! let stored = first.digest_to_persist().unwrap().clone();
//! let second = gate.evaluate(&SecretValue::new("s3cr3t"), &stored);
//! assert!(!second.is_changed());
//! ```

pub mod adapter;
pub mod config;
pub mod constants;
pub mod gate;
pub mod memo;
pub mod observability;
pub mod prelude;
