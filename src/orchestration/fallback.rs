//! Fallback chain over candidate settlement plans.
//!
//! The chain is data: an ordered slice of fully independent plans. Each
//! attempt submits one complete plan and waits for its terminal outcome;
//! a rejection advances to the next candidate, acceptance ends the run, and
//! exhaustion produces an aggregate failure carrying every attempt's reason.
//! A rejected plan leaves no partial state behind (the balance-zeroing
//! invariant makes plans atomic), so re-submission of a fresh candidate is
//! always safe.

use std::fmt;

use alloy_primitives::{B256, U256};
use tracing::{debug, warn};

use crate::chain::{ChainError, PlanOutcome, PlanSubmitter};
use crate::plan::ActionPlan;

/// One rejected attempt: which plan, and why the counterparty refused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub plan: String,
    pub reason: String,
}

/// Terminal failure after every candidate plan was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRejection {
    pub attempts: Vec<AttemptFailure>,
}

impl fmt::Display for PlanRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "all {} candidate plans rejected:", self.attempts.len())?;
        for (i, attempt) in self.attempts.iter().enumerate() {
            write!(f, " [{}] {}: {};", i + 1, attempt.plan, attempt.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for PlanRejection {}

/// Result of a successful run: which plan landed and its transaction hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedPlan {
    pub plan: String,
    pub tx_hash: B256,
}

/// Walks the candidate list in order, stopping at the first accepted plan.
///
/// Transport errors are not rejections: they abort the run immediately and
/// propagate, because the plan's fate on-chain is unknown and blind
/// re-submission could double-apply it.
pub async fn run_fallback_chain<S: PlanSubmitter + ?Sized>(
    submitter: &S,
    candidates: &[ActionPlan],
    deadline: U256,
) -> Result<AcceptedPlan, FallbackError> {
    let mut attempts = Vec::with_capacity(candidates.len());

    for plan in candidates {
        debug!("Submitting plan '{}' ({} actions)", plan.label, plan.actions.len());
        let outcome = submitter
            .modify_liquidities(plan.unlock_data(), deadline)
            .await?;

        match outcome {
            PlanOutcome::Accepted { tx_hash } => {
                debug!("Plan '{}' accepted: {}", plan.label, tx_hash);
                return Ok(AcceptedPlan { plan: plan.label.to_string(), tx_hash });
            }
            PlanOutcome::Rejected { reason } => {
                warn!("Plan '{}' rejected: {}", plan.label, reason);
                attempts.push(AttemptFailure { plan: plan.label.to_string(), reason });
            }
        }
    }

    Err(FallbackError::Exhausted(PlanRejection { attempts }))
}

#[derive(Debug, thiserror::Error)]
pub enum FallbackError {
    #[error(transparent)]
    Exhausted(PlanRejection),
    #[error(transparent)]
    Chain(#[from] ChainError),
}
