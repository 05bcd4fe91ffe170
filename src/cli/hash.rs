//! # Hash and Verify Commands
//!
//! Commands to mint a digest and to check a secret against one.

use anyhow::{Context, Result};
use secret_memo::config::MemoConfig;
use secret_memo::memo::{SecretDigest, SecretValue};

/// Print a fresh digest of `secret`
pub fn hash_command(config: &MemoConfig, secret: &SecretValue) -> Result<()> {
    let gate = config.change_gate()?;
    let digest = gate
        .memo()
        .hash(secret)
        .context("Failed to hash secret")?;
    println!("{}", digest.as_str());
    Ok(())
}

/// Check `secret` against `digest`, printing the result
pub fn verify_command(config: &MemoConfig, secret: &SecretValue, digest: &str) -> Result<bool> {
    let gate = config.change_gate()?;
    let matches = gate
        .memo()
        .verify(secret, &SecretDigest::from_state(digest))
        .context("Failed to verify secret")?;
    println!("{}", if matches { "match" } else { "mismatch" });
    Ok(matches)
}
