//! Common test utilities
//!
//! Provides a fast change gate and one-time tracing setup shared by the
//! integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use secret_memo::adapter::SecretDiffSuppressor;
use secret_memo::constants::MIN_HASH_COST;
use secret_memo::gate::ChangeGate;
use secret_memo::memo::SecretMemo;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("secret_memo=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Gate using the lowest bcrypt cost so tests stay fast
pub fn test_gate() -> ChangeGate {
    ChangeGate::new(SecretMemo::new(MIN_HASH_COST).expect("minimum cost is valid"))
}

pub fn test_suppressor() -> SecretDiffSuppressor {
    SecretDiffSuppressor::new(test_gate())
}
