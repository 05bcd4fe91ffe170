//! # Change Gate Tests
//!
//! End-to-end checks of the hashing and change decision behaviour.
//!
//! These tests verify:
//! - Hash/verify round trips, salting and mismatches
//! - Decisions for empty, matching, different and malformed digests
//! - Hashing failures force a change without a digest
//! - A full rotate cycle across reconciliation passes

mod common;

use common::test_gate;
use pretty_assertions::assert_eq;
use secret_memo::constants::MAX_SECRET_BYTES;
use secret_memo::gate::ChangeReason;
use secret_memo::memo::{ErrorKind, SecretDigest, SecretValue};

#[test]
fn test_hash_verifies_for_many_values() {
    let memo = *test_gate().memo();
    for value in ["a", "s3cr3t", "with spaces", "ünïcödé", "line\nbreak", "tab\tvalue"] {
        let value = SecretValue::new(value);
        let digest = memo.hash(&value).unwrap();
        assert!(memo.verify(&value, &digest).unwrap(), "value {value:?}");
    }
}

#[test]
fn test_distinct_values_do_not_verify() {
    let memo = *test_gate().memo();
    for i in 0..32 {
        let v1 = SecretValue::new(format!("secret-{i}"));
        let v2 = SecretValue::new(format!("secret-{i}-rotated"));
        let digest = memo.hash(&v1).unwrap();
        assert!(
            !memo.verify(&v2, &digest).unwrap(),
            "pair {i} should not verify"
        );
    }
}

#[test]
fn test_rehash_yields_new_digest_that_still_verifies() {
    let memo = *test_gate().memo();
    let value = SecretValue::new("s3cr3t");
    let first = memo.hash(&value).unwrap();
    let second = memo.hash(&value).unwrap();
    assert_ne!(first, second);
    assert!(memo.verify(&value, &first).unwrap());
    assert!(memo.verify(&value, &second).unwrap());
}

#[test]
fn test_evaluate_empty_digest() {
    let gate = test_gate();
    for value in ["", "s3cr3t"] {
        let value = SecretValue::new(value);
        let decision = gate.evaluate(&value, &SecretDigest::empty());
        assert!(decision.is_changed());
        let digest = decision.new_digest().unwrap();
        assert!(!digest.is_empty());
        assert!(gate.memo().verify(&value, digest).unwrap());
    }
}

#[test]
fn test_evaluate_matching_digest_keeps_it() {
    let gate = test_gate();
    let value = SecretValue::new("s3cr3t");
    let stored = gate.memo().hash(&value).unwrap();
    let decision = gate.evaluate(&value, &stored);
    assert!(!decision.is_changed());
    assert_eq!(decision.new_digest(), Some(&stored));
    assert_eq!(decision.digest_to_persist(), None);
}

#[test]
fn test_evaluate_different_value() {
    let gate = test_gate();
    let v1 = SecretValue::new("old-value");
    let v2 = SecretValue::new("new-value");
    let stored = gate.memo().hash(&v1).unwrap();
    let decision = gate.evaluate(&v2, &stored);
    assert!(decision.is_changed());
    assert_eq!(decision.reason(), Some(ChangeReason::ValueChanged));
    let digest = decision.digest_to_persist().unwrap();
    assert!(gate.memo().verify(&v2, digest).unwrap());
    assert!(!gate.memo().verify(&v1, digest).unwrap());
}

#[test]
fn test_evaluate_malformed_digest_is_not_an_error() {
    let gate = test_gate();
    let value = SecretValue::new("s3cr3t");
    let decision = gate.evaluate(&value, &SecretDigest::from_state("not-a-valid-digest"));
    assert!(decision.is_changed());
    assert!(decision.error().is_none());
    assert_eq!(decision.reason(), Some(ChangeReason::MalformedDigest));
}

#[test]
fn test_evaluate_rehashes_digest_with_excessive_cost() {
    let gate = test_gate();
    let value = SecretValue::new("s3cr3t");
    let tampered = SecretDigest::from_state(format!("$2b$31${}", "b".repeat(53)));

    let decision = gate.evaluate(&value, &tampered);
    assert_eq!(decision.reason(), Some(ChangeReason::MalformedDigest));
    let digest = decision.digest_to_persist().unwrap();
    assert_eq!(digest.cost(), Some(gate.memo().cost()));
    assert!(gate.memo().verify(&value, digest).unwrap());
}

#[test]
fn test_evaluate_hashing_failure() {
    let gate = test_gate();
    let value = SecretValue::new("k".repeat(MAX_SECRET_BYTES + 1));
    let stored = gate.memo().hash(&SecretValue::new("previous")).unwrap();

    for digest in [SecretDigest::empty(), stored] {
        let decision = gate.evaluate(&value, &digest);
        assert!(decision.is_changed());
        assert_eq!(decision.digest_to_persist(), None);
        assert_eq!(decision.error().map(|e| e.kind()), Some(ErrorKind::HashingFailed));
    }
}

#[test]
fn test_rotation_across_passes() {
    let gate = test_gate();

    // First apply: nothing stored yet
    let first = gate.evaluate(&SecretValue::new("s3cr3t"), &SecretDigest::empty());
    assert!(first.is_changed());
    let stored = first.digest_to_persist().unwrap().clone();
    assert!(gate
        .memo()
        .verify(&SecretValue::new("s3cr3t"), &stored)
        .unwrap());

    // Next pass with the same value
    let second = gate.evaluate(&SecretValue::new("s3cr3t"), &stored);
    assert!(!second.is_changed());

    // Rotation
    let third = gate.evaluate(&SecretValue::new("new-s3cr3t"), &stored);
    assert!(third.is_changed());
    let rotated = third.digest_to_persist().unwrap();
    assert_ne!(rotated, &stored);
    assert!(gate
        .memo()
        .verify(&SecretValue::new("new-s3cr3t"), rotated)
        .unwrap());
}

#[tokio::test]
async fn test_concurrent_evaluation_shares_one_gate() {
    let gate = test_gate();
    let mut handles = Vec::new();
    for i in 0..8 {
        handles.push(tokio::task::spawn_blocking(move || {
            let value = SecretValue::new(format!("field-{i}"));
            let first = gate.evaluate(&value, &SecretDigest::empty());
            let stored = first.digest_to_persist().cloned().unwrap();
            let again = gate.evaluate(&value, &stored);
            (first.is_changed(), again.is_changed())
        }));
    }

    for handle in handles {
        let (first, again) = handle.await.unwrap();
        assert!(first);
        assert!(!again);
    }
}
