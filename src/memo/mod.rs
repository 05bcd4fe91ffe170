//! # Secret Memo
//!
//! One-way hashing and verification of secret values.
//!
//! Digests are bcrypt strings that embed their own salt and cost factor, so
//! they can be kept in resource state and checked against a candidate on a
//! later reconciliation pass without ever storing the plaintext.
//! Nothing here performs I/O or holds shared mutable state.

pub mod error;
pub mod secret;

pub use error::{ErrorKind, MemoError};
pub use secret::{SecretDigest, SecretValue};

use crate::constants::{
    DEFAULT_HASH_COST, DEFAULT_MAX_VERIFY_COST, MAX_HASH_COST, MAX_SECRET_BYTES, MIN_HASH_COST,
};

/// Salted adaptive hasher with a fixed work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretMemo {
    cost: u32,
    /// Recorded digests above this cost are not verified
    max_verify_cost: u32,
}

impl Default for SecretMemo {
    fn default() -> Self {
        Self {
            cost: DEFAULT_HASH_COST,
            max_verify_cost: DEFAULT_MAX_VERIFY_COST.max(DEFAULT_HASH_COST),
        }
    }
}

impl SecretMemo {
    /// Create a hasher with the given bcrypt cost.
    ///
    /// # Errors
    /// Returns `MemoError::InvalidCost` when `cost` is outside `4..=31`.
    pub fn new(cost: u32) -> Result<Self, MemoError> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&cost) {
            return Err(MemoError::InvalidCost {
                cost,
                min: MIN_HASH_COST,
                max: MAX_HASH_COST,
            });
        }
        Ok(Self {
            cost,
            max_verify_cost: DEFAULT_MAX_VERIFY_COST.max(cost),
        })
    }

    /// Set the highest digest cost `verify` will run.
    ///
    /// The ceiling never drops below this hasher's own cost, so digests it
    /// produced always verify.
    ///
    /// # Errors
    /// Returns `MemoError::InvalidCost` when `ceiling` is outside `4..=31`.
    pub fn with_max_verify_cost(self, ceiling: u32) -> Result<Self, MemoError> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&ceiling) {
            return Err(MemoError::InvalidCost {
                cost: ceiling,
                min: MIN_HASH_COST,
                max: MAX_HASH_COST,
            });
        }
        Ok(Self {
            max_verify_cost: ceiling.max(self.cost),
            ..self
        })
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    #[must_use]
    pub fn max_verify_cost(&self) -> u32 {
        self.max_verify_cost
    }

    /// Compute a fresh salted digest of `value`.
    ///
    /// Every call draws a new salt, so hashing the same value twice yields two
    /// different digests that both verify against it.
    ///
    /// # Errors
    /// Returns `MemoError::HashingFailed` if the value is longer than bcrypt's
    /// input limit or the primitive cannot generate a salt.
    pub fn hash(&self, value: &SecretValue) -> Result<SecretDigest, MemoError> {
        if value.len() > MAX_SECRET_BYTES {
            return Err(MemoError::hashing(format!(
                "value is {} bytes, limit is {MAX_SECRET_BYTES}",
                value.len()
            )));
        }

        bcrypt::hash(value.expose(), self.cost)
            .map(SecretDigest::from_hashed)
            .map_err(|e| MemoError::hashing(e.to_string()))
    }

    /// Check whether `candidate` is the value `digest` was computed from.
    ///
    /// Uses the salt and cost recorded in the digest, not this hasher's cost.
    /// The byte comparison is constant-time inside the bcrypt crate.
    ///
    /// # Errors
    /// Returns `MemoError::MalformedDigest` if `digest` is empty, not a bcrypt
    /// encoding, or records a cost above [`max_verify_cost`](Self::max_verify_cost).
    pub fn verify(&self, candidate: &SecretValue, digest: &SecretDigest) -> Result<bool, MemoError> {
        if digest.is_empty() {
            return Err(MemoError::malformed("digest is empty"));
        }
        if let Some(cost) = digest.cost() {
            if cost > self.max_verify_cost {
                return Err(MemoError::malformed(format!(
                    "digest cost {cost} is above the verify ceiling {}",
                    self.max_verify_cost
                )));
            }
        }

        // Verification only parses the digest, so every failure is a decoding failure.
        let matches = bcrypt::verify(candidate.expose(), digest.as_str())
            .map_err(|e| MemoError::malformed(e.to_string()))?;

        // Digests only ever come from values within the limit, and bcrypt ignores
        // trailing bytes, so a longer candidate is a different value.
        Ok(matches && candidate.len() <= MAX_SECRET_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memo() -> SecretMemo {
        SecretMemo::new(MIN_HASH_COST).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let memo = memo();
        let value = SecretValue::new("s3cr3t");
        let digest = memo.hash(&value).unwrap();
        assert!(memo.verify(&value, &digest).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let memo = memo();
        let value = SecretValue::new("s3cr3t");
        let first = memo.hash(&value).unwrap();
        let second = memo.hash(&value).unwrap();
        assert_ne!(first.as_str(), second.as_str());
        assert!(memo.verify(&value, &first).unwrap());
        assert!(memo.verify(&value, &second).unwrap());
    }

    #[test]
    fn test_empty_value_is_legal() {
        let memo = memo();
        let empty = SecretValue::new("");
        let digest = memo.hash(&empty).unwrap();
        assert!(memo.verify(&empty, &digest).unwrap());
        assert!(!memo.verify(&SecretValue::new("x"), &digest).unwrap());
    }

    #[test]
    fn test_digest_embeds_cost() {
        let digest = memo().hash(&SecretValue::new("v")).unwrap();
        assert!(digest.as_str().starts_with("$2b$04$"));
    }

    #[test]
    fn test_verify_uses_digest_cost() {
        let weak = SecretMemo::new(4).unwrap();
        let stronger = SecretMemo::new(5).unwrap();
        let value = SecretValue::new("rotated");
        let digest = weak.hash(&value).unwrap();
        assert!(stronger.verify(&value, &digest).unwrap());
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert_eq!(
            SecretMemo::new(3).unwrap_err().kind(),
            ErrorKind::InvalidCost
        );
        assert_eq!(
            SecretMemo::new(32).unwrap_err().kind(),
            ErrorKind::InvalidCost
        );
        assert_eq!(SecretMemo::default().cost(), DEFAULT_HASH_COST);
    }

    #[test]
    fn test_oversized_value_fails_hashing() {
        let value = SecretValue::new("a".repeat(MAX_SECRET_BYTES + 1));
        let err = memo().hash(&value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HashingFailed);
    }

    #[test]
    fn test_max_length_value_hashes() {
        let memo = memo();
        let value = SecretValue::new("a".repeat(MAX_SECRET_BYTES));
        let digest = memo.hash(&value).unwrap();
        assert!(memo.verify(&value, &digest).unwrap());
    }

    #[test]
    fn test_oversized_candidate_never_matches() {
        let memo = memo();
        let stored = SecretValue::new("a".repeat(MAX_SECRET_BYTES));
        let digest = memo.hash(&stored).unwrap();
        let longer = SecretValue::new("a".repeat(MAX_SECRET_BYTES + 8));
        assert!(!memo.verify(&longer, &digest).unwrap());
    }

    #[test]
    fn test_verify_malformed_digest() {
        let memo = memo();
        let value = SecretValue::new("s3cr3t");
        for bad in ["not-a-valid-digest", "$2b$", "$2b$99$abc", "$zz$04$xyz"] {
            let err = memo
                .verify(&value, &SecretDigest::from_state(bad))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedDigest, "digest {bad:?}");
        }
    }

    #[test]
    fn test_verify_rejects_cost_above_ceiling() {
        let memo = memo();
        let tampered = SecretDigest::from_state(format!("$2b$31${}", "a".repeat(53)));

        let started = std::time::Instant::now();
        let err = memo.verify(&SecretValue::new("s3cr3t"), &tampered).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDigest);
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_max_verify_cost() {
        assert_eq!(memo().max_verify_cost(), DEFAULT_MAX_VERIFY_COST);
        assert_eq!(SecretMemo::new(20).unwrap().max_verify_cost(), 20);

        let strict = memo().with_max_verify_cost(MIN_HASH_COST).unwrap();
        let five = SecretMemo::new(5).unwrap();
        let value = SecretValue::new("v");
        let digest = five.hash(&value).unwrap();
        assert_eq!(
            strict.verify(&value, &digest).unwrap_err().kind(),
            ErrorKind::MalformedDigest
        );

        // Never below the hasher's own cost
        assert_eq!(five.with_max_verify_cost(4).unwrap().max_verify_cost(), 5);
        assert!(memo().with_max_verify_cost(32).is_err());
    }

    #[test]
    fn test_verify_empty_digest_is_malformed() {
        let err = memo()
            .verify(&SecretValue::new("v"), &SecretDigest::empty())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDigest);
    }
}
