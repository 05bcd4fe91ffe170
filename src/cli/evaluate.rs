//! # Evaluate Command
//!
//! Command to print the change decision for one secret.

use anyhow::Result;
use secret_memo::config::MemoConfig;
use secret_memo::gate::ChangeReason;
use secret_memo::memo::{ErrorKind, SecretDigest, SecretValue};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DecisionReport<'a> {
    changed: bool,
    reason: Option<ChangeReason>,
    digest_to_persist: Option<&'a str>,
    error: Option<ErrorKind>,
    error_message: Option<String>,
}

/// Evaluate `secret` against `digest` and print the decision as JSON
pub fn evaluate_command(config: &MemoConfig, secret: &SecretValue, digest: &str) -> Result<()> {
    println!("{}", decision_report(config, secret, digest)?);
    Ok(())
}

/// Pretty JSON report of the change decision. Never contains the secret.
fn decision_report(config: &MemoConfig, secret: &SecretValue, digest: &str) -> Result<String> {
    let gate = config.change_gate()?;
    let decision = gate.evaluate(secret, &SecretDigest::from_state(digest));

    let report = DecisionReport {
        changed: decision.is_changed(),
        reason: decision.reason(),
        digest_to_persist: decision.digest_to_persist().map(SecretDigest::as_str),
        error: decision.error().map(secret_memo::memo::MemoError::kind),
        error_message: decision.error().map(ToString::to_string),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
