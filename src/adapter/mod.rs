//! # Reconciler Adapter
//!
//! Thin glue between a declarative-state reconciler and the [`ChangeGate`].
//!
//! - `diff`: diff-suppression hooks and the flatten step that persists digests
//! - `schema`: companion `<attr>_hash` attribute descriptors
//! - `memory`: in-memory [`ResourceData`] backed by JSON documents
//! - `plan`: plan and flatten steps for a whole resource
//!
//! Logging happens here, at the reconciler boundary. Plaintext values and
//! digests are never logged.
//!
//! [`ChangeGate`]: crate::gate::ChangeGate

pub mod diff;
pub mod memory;
pub mod plan;
pub mod schema;

pub use diff::{suppress_case_diff, FlattenOutcome, SecretDiffSuppressor};
pub use memory::InMemoryResourceData;
pub use plan::{plan_resource, AttributePlan, PlanAction};
pub use schema::{memo_schema, AttributeKind, MemoAttributeSchema};

use crate::constants::HASH_KEY_SUFFIX;
use crate::memo::MemoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Failed to hash secret attribute '{attribute}': {source}")]
    Hashing {
        attribute: String,
        #[source]
        source: MemoError,
    },
}

impl AdapterError {
    /// Attribute the error belongs to
    #[must_use]
    pub fn attribute(&self) -> &str {
        match self {
            AdapterError::Hashing { attribute, .. } => attribute,
        }
    }
}

/// View of one resource's attributes as the reconciler sees them.
///
/// `get_str` returns the planned value of an attribute: the declared value for
/// caller-supplied attributes, the recorded value for computed ones such as
/// `<attr>_hash`.
pub trait ResourceData {
    fn get_str(&self, key: &str) -> Option<String>;

    fn set_str(&mut self, key: &str, value: String);

    /// Whether the reconciler plans to update `key`
    fn has_change(&self, key: &str) -> bool;
}

/// Name of the state attribute that carries the digest for `secret_key`
#[must_use]
pub fn hash_key(secret_key: &str) -> String {
    format!("{secret_key}{HASH_KEY_SUFFIX}")
}
