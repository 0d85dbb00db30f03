//! Mock chain for testing without network calls. Implements both the reader
//! and the submitter; submission outcomes are scripted per attempt.

use std::collections::HashMap;
use std::sync::Mutex;

use alloy_primitives::{Bytes, B256, U256};
use async_trait::async_trait;

use super::{ChainError, PlanOutcome, PlanSubmitter, PoolReader};
use crate::domain::{PackedPositionInfo, PoolId, PoolKey, PoolState};

/// Mock chain returning predefined state and scripted plan outcomes.
#[derive(Debug, Default)]
pub struct MockChain {
    slot0: HashMap<PoolId, PoolState>,
    positions: HashMap<U256, (PoolKey, PackedPositionInfo)>,
    liquidity: HashMap<U256, u128>,
    /// Outcomes popped front-to-back, one per submission; an empty queue
    /// accepts with a zero hash.
    outcomes: Mutex<Vec<PlanOutcome>>,
    /// Every submitted payload, for test inspection.
    submitted: Mutex<Vec<(Bytes, U256)>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price snapshot returned for a pool.
    pub fn with_slot0(mut self, pool_id: PoolId, state: PoolState) -> Self {
        self.slot0.insert(pool_id, state);
        self
    }

    /// Register a position's pool key and packed info.
    pub fn with_position(
        mut self,
        token_id: U256,
        pool_key: PoolKey,
        info: PackedPositionInfo,
    ) -> Self {
        self.positions.insert(token_id, (pool_key, info));
        self
    }

    /// Set a position's current liquidity.
    pub fn with_liquidity(mut self, token_id: U256, liquidity: u128) -> Self {
        self.liquidity.insert(token_id, liquidity);
        self
    }

    /// Script the outcome of the next submission (FIFO).
    pub fn with_outcome(self, outcome: PlanOutcome) -> Self {
        self.outcomes.lock().unwrap().push(outcome);
        self
    }

    /// All payloads submitted so far, in order.
    pub fn submissions(&self) -> Vec<(Bytes, U256)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl PoolReader for MockChain {
    async fn get_slot0(&self, pool_id: PoolId) -> Result<PoolState, ChainError> {
        self.slot0
            .get(&pool_id)
            .copied()
            .ok_or_else(|| ChainError::Rpc(format!("unknown pool {}", pool_id)))
    }

    async fn get_pool_and_position_info(
        &self,
        token_id: U256,
    ) -> Result<(PoolKey, PackedPositionInfo), ChainError> {
        self.positions
            .get(&token_id)
            .cloned()
            .ok_or_else(|| ChainError::Rpc(format!("unknown token {}", token_id)))
    }

    async fn get_position_liquidity(&self, token_id: U256) -> Result<u128, ChainError> {
        self.liquidity
            .get(&token_id)
            .copied()
            .ok_or_else(|| ChainError::Rpc(format!("unknown token {}", token_id)))
    }
}

#[async_trait]
impl PlanSubmitter for MockChain {
    async fn modify_liquidities(
        &self,
        unlock_data: Bytes,
        deadline: U256,
    ) -> Result<PlanOutcome, ChainError> {
        self.submitted.lock().unwrap().push((unlock_data, deadline));
        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            Ok(PlanOutcome::Accepted { tx_hash: B256::ZERO })
        } else {
            Ok(outcomes.remove(0))
        }
    }
}
