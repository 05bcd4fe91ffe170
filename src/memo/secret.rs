//! # Secret Types
//!
//! Wrapper types for plaintext secrets and their persisted digests.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Plaintext secret supplied by a caller's declared configuration.
///
/// - Zeroized on drop
/// - Debug and Display output shows `[REDACTED]` instead of the actual value
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretValue(String);

impl SecretValue {
    /// Create a new secret from a string value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the secret value for use.
    ///
    /// Only the hashing primitive should need this.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Length in bytes of the plaintext
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Salted one-way digest of a [`SecretValue`], safe to keep in durable state.
///
/// The encoding carries its own salt and cost factor, so two digests of the same
/// value differ. Digests are checked with [`crate::memo::SecretMemo::verify`],
/// never compared with `==` to decide whether a secret changed.
/// An empty digest means the secret was never hashed.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretDigest(String);

impl SecretDigest {
    /// Digest that stands for "no prior value"
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Wrap a digest read back from persisted resource state.
    ///
    /// The value is not validated here; a corrupted or foreign string surfaces
    /// as a malformed digest on verification.
    pub fn from_state(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub(crate) fn from_hashed(value: String) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Scheme and cost header (`$2b$12$`), if the digest has one
    /// Work factor recorded in the digest header, when it parses
    #[must_use]
    pub fn cost(&self) -> Option<u32> {
        self.header()?.split('$').nth(2)?.parse().ok()
    }

    fn header(&self) -> Option<&str> {
        let mut dollars = self.0.match_indices('$').map(|(i, _)| i);
        let third = dollars.nth(2)?;
        self.0.get(..=third)
    }
}

impl fmt::Debug for SecretDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_empty(), self.header()) {
            (true, _) => f.write_str("SecretDigest(<empty>)"),
            (false, Some(header)) => write!(f, "SecretDigest({header}...)"),
            (false, None) => f.write_str("SecretDigest(<unrecognized>)"),
        }
    }
}
