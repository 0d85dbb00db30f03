pub mod chain;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod math;
pub mod orchestration;
pub mod plan;

pub use chain::{ChainError, MockChain, PlanOutcome, PlanSubmitter, PoolReader, RpcPoolReader};
pub use config::NetworkConfig;
pub use domain::{
    classify_range, PackedPositionInfo, PoolId, PoolKey, PoolState, Position, RangeStatus,
};
pub use engine::{compute_range, RangeReport};
pub use error::AppError;
pub use orchestration::{IncreaseOutcome, PositionOperator};
pub use plan::{increase_candidates, Action, ActionPlan, IncreaseIntent};
