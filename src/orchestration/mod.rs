pub mod fallback;
pub mod operator;

pub use fallback::{run_fallback_chain, AcceptedPlan, AttemptFailure, FallbackError, PlanRejection};
pub use operator::{IncreaseOutcome, PositionOperator};
