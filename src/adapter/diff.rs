//! # Diff Suppression
//!
//! Hooks a reconciler calls while planning, and the flatten step it calls after
//! applying, for attributes that carry write-only secrets.

use super::{hash_key, AdapterError, ResourceData};
use crate::gate::{ChangeDecision, ChangeGate, ChangeReason};
use crate::memo::{SecretDigest, SecretValue};
use tracing::{debug, info, warn};

/// Result of [`SecretDiffSuppressor::flatten_secret`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenOutcome {
    /// The attribute was not planned for update
    Skipped,
    /// The stored digest still matches the declared value
    Retained,
    /// A fresh digest was written to the companion attribute
    Updated(ChangeReason),
}

/// Diff-suppression hooks backed by a [`ChangeGate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretDiffSuppressor {
    gate: ChangeGate,
}

impl SecretDiffSuppressor {
    #[must_use]
    pub fn new(gate: ChangeGate) -> Self {
        Self { gate }
    }

    #[must_use]
    pub fn gate(&self) -> &ChangeGate {
        &self.gate
    }

    /// Evaluate `new` against the digest recorded under `<key>_hash`.
    ///
    /// This is the single bcrypt pass of a planning step. A `Changed` decision
    /// already carries the digest to persist, so hand it to
    /// [`persist_decision`](Self::persist_decision) rather than flattening again.
    #[must_use]
    pub fn evaluate_secret<D>(&self, key: &str, new: &SecretValue, data: &D) -> ChangeDecision
    where
        D: ResourceData + ?Sized,
    {
        let memo_key = hash_key(key);
        let stored = SecretDigest::from_state(data.get_str(&memo_key).unwrap_or_default());

        let decision = self.gate.evaluate(new, &stored);
        debug!(
            attribute = key,
            memo_key = %memo_key,
            changed = decision.is_changed(),
            reason = decision.reason().map(|r| r.as_str()),
            "Evaluated secret diff"
        );
        decision
    }

    /// Returns `Ok(true)` when the declared value `new` matches the digest
    /// recorded under `<key>_hash`, meaning the reconciler may ignore the diff.
    ///
    /// # Errors
    /// Returns `AdapterError::Hashing` when no digest could be computed. The
    /// caller must treat the attribute as changed.
    pub fn suppress_secret_diff<D>(
        &self,
        key: &str,
        new: &SecretValue,
        data: &D,
    ) -> Result<bool, AdapterError>
    where
        D: ResourceData + ?Sized,
    {
        match self.evaluate_secret(key, new, data) {
            ChangeDecision::HashingFailed { error } => {
                warn!(
                    attribute = key,
                    "Change forced: secret hashing failed: {}",
                    error
                );
                Err(AdapterError::Hashing {
                    attribute: key.to_string(),
                    source: error,
                })
            }
            decision => Ok(!decision.is_changed()),
        }
    }

    /// Write the outcome of an earlier [`evaluate_secret`](Self::evaluate_secret)
    /// for `key` without hashing again.
    ///
    /// The digest stored under `<key>_hash` is exactly the one the decision
    /// carries. `Unchanged` leaves state alone.
    ///
    /// # Errors
    /// Returns `AdapterError::Hashing` for a `HashingFailed` decision; the prior
    /// digest is left in place.
    pub fn persist_decision<D>(
        &self,
        data: &mut D,
        key: &str,
        decision: ChangeDecision,
    ) -> Result<FlattenOutcome, AdapterError>
    where
        D: ResourceData + ?Sized,
    {
        let memo_key = hash_key(key);
        match decision {
            ChangeDecision::Unchanged { .. } => {
                debug!(attribute = key, "Stored secret digest still matches");
                Ok(FlattenOutcome::Retained)
            }
            ChangeDecision::Changed { digest, reason } => {
                data.set_str(&memo_key, digest.into_string());
                info!(
                    attribute = key,
                    memo_key = %memo_key,
                    reason = reason.as_str(),
                    "Secret attribute updated, stored new digest"
                );
                Ok(FlattenOutcome::Updated(reason))
            }
            ChangeDecision::HashingFailed { error } => {
                warn!(
                    attribute = key,
                    memo_key = %memo_key,
                    "Keeping prior digest: secret hashing failed: {}",
                    error
                );
                Err(AdapterError::Hashing {
                    attribute: key.to_string(),
                    source: error,
                })
            }
        }
    }

    /// Store the digest of the declared value of `key` under `<key>_hash`.
    ///
    /// Nothing is written when the attribute is not planned for update or when
    /// the recorded digest still matches.
    ///
    /// # Errors
    /// Returns `AdapterError::Hashing` when hashing fails; the prior digest is
    /// left in place.
    pub fn flatten_secret<D>(&self, data: &mut D, key: &str) -> Result<FlattenOutcome, AdapterError>
    where
        D: ResourceData + ?Sized,
    {
        if !data.has_change(key) {
            debug!(attribute = key, "Secret attribute didn't get updated");
            return Ok(FlattenOutcome::Skipped);
        }

        let new_secret = SecretValue::new(data.get_str(key).unwrap_or_default());
        let decision = self.evaluate_secret(key, &new_secret, &*data);
        self.persist_decision(data, key, decision)
    }
}

/// Suppress diffs that only differ by letter case
#[must_use]
pub fn suppress_case_diff(old: &str, new: &str) -> bool {
    old.to_lowercase() == new.to_lowercase()
}
