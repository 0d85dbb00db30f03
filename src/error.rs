use thiserror::Error;

use crate::chain::ChainError;
use crate::config::ConfigError;
use crate::math::MathError;
use crate::orchestration::fallback::PlanRejection;

/// Crate-level error taxonomy.
///
/// `Validation` and `InsufficientAmount` are preflight failures raised before
/// anything is submitted. `StateRead` is surfaced immediately with no stale
/// fallback. `Submission` is a transport failure while a plan was in flight,
/// where the plan's on-chain fate is unknown. `PlanRejected` is only produced
/// after the settlement fallback chain is exhausted and carries every
/// attempt's rejection reason.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("State read error: {0}")]
    StateRead(#[from] ChainError),

    #[error("Plan submission error: {0}")]
    Submission(ChainError),

    #[error("Insufficient amounts: plan needs {required} of {currency} but only {available} is available after headroom")]
    InsufficientAmount {
        currency: String,
        required: String,
        available: String,
    },

    #[error(transparent)]
    PlanRejected(#[from] PlanRejection),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Math error: {0}")]
    Math(#[from] MathError),
}
