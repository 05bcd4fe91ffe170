//! # Resource Plan
//!
//! Runs the plan and flatten steps for one resource held in an
//! [`InMemoryResourceData`], the way a reconciler would call the hooks.

use super::{suppress_case_diff, AdapterError, FlattenOutcome, InMemoryResourceData};
use super::{ResourceData, SecretDiffSuppressor};
use crate::gate::ChangeReason;
use crate::memo::{SecretDigest, SecretValue};

#[derive(Debug)]
pub enum PlanAction {
    NoChange,
    /// Attribute is applied. Secret attributes carry the reason and the
    /// digest that was written under `<attr>_hash`.
    Update {
        reason: Option<ChangeReason>,
        digest: Option<SecretDigest>,
    },
    /// Attribute is applied but no digest could be stored
    Failed { error: AdapterError },
}

#[derive(Debug)]
pub struct AttributePlan {
    pub attribute: String,
    pub action: PlanAction,
}

impl AttributePlan {
    #[must_use]
    pub fn is_change(&self) -> bool {
        !matches!(self.action, PlanAction::NoChange)
    }
}

/// Plan every listed attribute of one resource.
///
/// Secret attributes are compared through their stored digests and get a new
/// digest written on change. Case-insensitive attributes are compared ignoring
/// letter case and copied into state on change.
pub fn plan_resource(
    suppressor: &SecretDiffSuppressor,
    data: &mut InMemoryResourceData,
    secrets: &[String],
    case_insensitive: &[String],
) -> Vec<AttributePlan> {
    let mut plans = Vec::with_capacity(secrets.len() + case_insensitive.len());

    for key in secrets {
        let action = plan_secret(suppressor, data, key);
        plans.push(AttributePlan {
            attribute: key.clone(),
            action,
        });
    }

    for key in case_insensitive {
        let recorded = data.state().get(key).cloned();
        let action = match (data.get_str(key), recorded) {
            (None, None) => PlanAction::NoChange,
            (Some(declared), Some(recorded)) if suppress_case_diff(&recorded, &declared) => {
                PlanAction::NoChange
            }
            (declared, _) => {
                data.set_str(key, declared.unwrap_or_default());
                PlanAction::Update {
                    reason: None,
                    digest: None,
                }
            }
        };
        plans.push(AttributePlan {
            attribute: key.clone(),
            action,
        });
    }

    plans
}

fn plan_secret(
    suppressor: &SecretDiffSuppressor,
    data: &mut InMemoryResourceData,
    key: &str,
) -> PlanAction {
    // An undeclared secret means it was cleared
    let candidate = SecretValue::new(data.get_str(key).unwrap_or_default());

    let decision = suppressor.evaluate_secret(key, &candidate, &*data);
    if !decision.is_changed() {
        return PlanAction::NoChange;
    }
    data.mark_changed(key);

    let digest = decision.digest_to_persist().cloned();
    match suppressor.persist_decision(data, key, decision) {
        Ok(FlattenOutcome::Updated(reason)) => PlanAction::Update {
            reason: Some(reason),
            digest,
        },
        Ok(FlattenOutcome::Skipped | FlattenOutcome::Retained) => PlanAction::NoChange,
        Err(error) => PlanAction::Failed { error },
    }
}
