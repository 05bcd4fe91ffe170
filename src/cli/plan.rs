//! # Plan Command
//!
//! Command to plan one resource from a declared-values file and a state file.

use anyhow::{Context, Result};
use secret_memo::adapter::{plan_resource, InMemoryResourceData, PlanAction, SecretDiffSuppressor};
use secret_memo::config::MemoConfig;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug)]
pub struct PlanRequest {
    pub declared_path: PathBuf,
    pub state_path: PathBuf,
    pub secrets: Vec<String>,
    pub case_insensitive: Vec<String>,
    pub dry_run: bool,
}

/// Plan the resource and save its state. Returns the number of secret
/// attributes whose digest could not be computed.
pub fn plan_command(config: &MemoConfig, request: &PlanRequest) -> Result<usize> {
    let suppressor = SecretDiffSuppressor::new(config.change_gate()?);
    let mut data = InMemoryResourceData::load(&request.declared_path, &request.state_path)
        .context("Failed to load resource")?;

    let plans = plan_resource(
        &suppressor,
        &mut data,
        &request.secrets,
        &request.case_insensitive,
    );

    let mut failed = 0;
    println!("{:<30} {:<10} {:<20}", "ATTRIBUTE", "ACTION", "REASON");
    println!("{}", "-".repeat(60));
    for plan in &plans {
        let (action, reason) = match &plan.action {
            PlanAction::NoChange => ("keep", "-".to_string()),
            PlanAction::Update { reason, .. } => (
                "update",
                reason.map_or_else(|| "value-changed".to_string(), |r| r.as_str().to_string()),
            ),
            PlanAction::Failed { error: e } => {
                failed += 1;
                error!("{}", e);
                ("update", "hashing-failed".to_string())
            }
        };
        println!("{:<30} {:<10} {:<20}", plan.attribute, action, reason);
    }

    let changes = plans.iter().filter(|p| p.is_change()).count();
    if request.dry_run {
        info!("Dry run: {} attribute(s) would change, state not written", changes);
        return Ok(failed);
    }

    data.save_state(&request.state_path)?;
    info!(
        "Planned {} attribute(s), {} changed, state written to {}",
        plans.len(),
        changes,
        request.state_path.display()
    );
    Ok(failed)
}
