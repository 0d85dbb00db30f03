//! Chain access boundary: read traits for pool/position state and the write
//! trait for submitting settlement plans. Signing, nonce sequencing, and
//! custody live behind [`PlanSubmitter`] upstream of this crate.

use std::fmt;

use alloy_primitives::{Bytes, B256, U256};
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{PackedPositionInfo, PoolId, PoolKey, PoolState};

pub mod mock;
pub mod rpc;

pub use mock::MockChain;
pub use rpc::RpcPoolReader;

/// Read access to pool and position state. Every call is a blocking
/// (awaited) point-in-time read; results must never be treated as
/// authoritative past the read instant.
#[async_trait]
pub trait PoolReader: Send + Sync + fmt::Debug {
    /// Price snapshot for a pool.
    async fn get_slot0(&self, pool_id: PoolId) -> Result<PoolState, ChainError>;

    /// Pool key and packed position info for a position token.
    async fn get_pool_and_position_info(
        &self,
        token_id: U256,
    ) -> Result<(PoolKey, PackedPositionInfo), ChainError>;

    /// Current liquidity magnitude of a position.
    async fn get_position_liquidity(&self, token_id: U256) -> Result<u128, ChainError>;
}

/// Terminal outcome of one submitted plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    Accepted { tx_hash: B256 },
    Rejected { reason: String },
}

/// Write access: submits one plan payload and waits for its terminal
/// outcome. Implementations own signing and sequencing; callers must not
/// share one submitter across concurrent operations, since the underlying
/// account can only carry one in-flight transaction without external nonce
/// coordination.
#[async_trait]
pub trait PlanSubmitter: Send + Sync + fmt::Debug {
    async fn modify_liquidities(
        &self,
        unlock_data: Bytes,
        deadline: U256,
    ) -> Result<PlanOutcome, ChainError>;
}

/// Error type for chain reads and submissions.
#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("Rate limited")]
    RateLimited,
}
