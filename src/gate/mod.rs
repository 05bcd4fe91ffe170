//! # Change Gate
//!
//! Decides whether a secret-bearing attribute must be treated as changed during
//! reconciliation, and which digest should be persisted for it.
//!
//! The policy fails toward change: a missing, corrupted, or foreign digest, or a
//! hashing failure, always reports the attribute as changed. Re-applying an
//! unchanged secret is cheap; skipping a real rotation is not.

use crate::memo::{ErrorKind, MemoError, SecretDigest, SecretMemo, SecretValue};
use serde::Serialize;

/// Why an attribute was reported as changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeReason {
    /// No digest was recorded in state
    NoPriorDigest,
    /// The recorded digest could not be decoded and was treated as absent
    MalformedDigest,
    /// The candidate does not match the recorded digest
    ValueChanged,
}

impl ChangeReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeReason::NoPriorDigest => "no-prior-digest",
            ChangeReason::MalformedDigest => "malformed-digest",
            ChangeReason::ValueChanged => "value-changed",
        }
    }
}

/// Outcome of one [`ChangeGate::evaluate`] call
#[derive(Debug)]
pub enum ChangeDecision {
    /// Candidate matches the stored digest; keep the stored digest as is
    Unchanged { digest: SecretDigest },
    /// Candidate differs (or nothing usable was stored); persist `digest`
    Changed {
        digest: SecretDigest,
        reason: ChangeReason,
    },
    /// No digest could be produced. The attribute is still reported as changed
    /// and the prior digest must be left in place.
    HashingFailed { error: MemoError },
}

impl ChangeDecision {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        !matches!(self, ChangeDecision::Unchanged { .. })
    }

    /// Digest that represents the candidate after this decision, if any
    #[must_use]
    pub fn new_digest(&self) -> Option<&SecretDigest> {
        match self {
            ChangeDecision::Unchanged { digest } | ChangeDecision::Changed { digest, .. } => {
                Some(digest)
            }
            ChangeDecision::HashingFailed { .. } => None,
        }
    }

    /// Digest the reconciler must write back into state.
    ///
    /// Only set when a rehash happened; `Unchanged` keeps the stored digest and
    /// `HashingFailed` has nothing valid to write.
    #[must_use]
    pub fn digest_to_persist(&self) -> Option<&SecretDigest> {
        match self {
            ChangeDecision::Changed { digest, .. } => Some(digest),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&MemoError> {
        match self {
            ChangeDecision::HashingFailed { error } => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<ChangeReason> {
        match self {
            ChangeDecision::Changed { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Consume the decision, returning the error if hashing failed
    pub fn into_result(self) -> Result<ChangeDecision, MemoError> {
        match self {
            ChangeDecision::HashingFailed { error } => Err(error),
            other => Ok(other),
        }
    }
}

/// Change decision policy for one secret-bearing attribute.
///
/// Holds only an immutable [`SecretMemo`], so a single gate can be shared across
/// threads and evaluated concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeGate {
    memo: SecretMemo,
}

impl ChangeGate {
    #[must_use]
    pub fn new(memo: SecretMemo) -> Self {
        Self { memo }
    }

    #[must_use]
    pub fn memo(&self) -> &SecretMemo {
        &self.memo
    }

    /// Compare `candidate` against the digest recorded in state.
    pub fn evaluate(&self, candidate: &SecretValue, stored: &SecretDigest) -> ChangeDecision {
        if stored.is_empty() {
            return self.rehash(candidate, ChangeReason::NoPriorDigest);
        }

        match self.memo.verify(candidate, stored) {
            Ok(true) => ChangeDecision::Unchanged {
                digest: stored.clone(),
            },
            Ok(false) => self.rehash(candidate, ChangeReason::ValueChanged),
            Err(e) if e.kind() == ErrorKind::MalformedDigest => {
                self.rehash(candidate, ChangeReason::MalformedDigest)
            }
            Err(error) => ChangeDecision::HashingFailed { error },
        }
    }

    fn rehash(&self, candidate: &SecretValue, reason: ChangeReason) -> ChangeDecision {
        match self.memo.hash(candidate) {
            Ok(digest) => ChangeDecision::Changed { digest, reason },
            Err(error) => ChangeDecision::HashingFailed { error },
        }
    }
}
