//! # Companion Attribute Schema
//!
//! Every secret-bearing attribute `X` needs a companion attribute `X_hash` in
//! the hosting schema to carry its digest between reconciliation passes.

use super::hash_key;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
}

/// Schema definition for a `<attr>_hash` attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoAttributeSchema {
    pub kind: AttributeKind,
    /// Set by the provider, never by the caller
    pub computed: bool,
    pub sensitive: bool,
    pub default: Option<String>,
    pub description: String,
}

/// Build the companion schema entry for `secret_key`.
///
/// Returns the companion attribute name together with its definition.
#[must_use]
pub fn memo_schema(secret_key: &str) -> (String, MemoAttributeSchema) {
    let schema = MemoAttributeSchema {
        kind: AttributeKind::String,
        computed: true,
        sensitive: true,
        default: None,
        description: format!("A bcrypted hash of the attribute '{secret_key}'"),
    };
    (hash_key(secret_key), schema)
}
