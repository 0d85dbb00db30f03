//! Position operation orchestrator: the thin coordinator between state
//! reads, liquidity math, plan building, and submission. Holds no state
//! between invocations; every operation is one strictly sequential
//! read-compute-submit-wait cycle.

use std::sync::Arc;

use alloy_primitives::{Bytes, B256, U256};
use tracing::{debug, info, warn};

use crate::chain::{PlanSubmitter, PoolReader};
use crate::domain::{classify_range, Position, RangeStatus};
use crate::error::AppError;
use crate::math::{amounts_for_liquidity, liquidity_for_amounts, sqrt_price_x96_at_tick};
use crate::orchestration::fallback::{run_fallback_chain, AcceptedPlan, FallbackError};
use crate::plan::{increase_candidates, IncreaseIntent};

/// Result of a completed increase operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncreaseOutcome {
    pub tx_hash: B256,
    /// Label of the candidate plan that was accepted.
    pub plan: String,
    /// Liquidity added by the accepted plan.
    pub liquidity: U256,
    pub status: RangeStatus,
}

pub struct PositionOperator<R: PoolReader, S: PlanSubmitter> {
    reader: Arc<R>,
    submitter: Arc<S>,
}

impl<R: PoolReader, S: PlanSubmitter> PositionOperator<R, S> {
    pub fn new(reader: Arc<R>, submitter: Arc<S>) -> Self {
        Self { reader, submitter }
    }

    /// Reads a position and classifies it against the live price.
    pub async fn position_status(
        &self,
        token_id: U256,
    ) -> Result<(Position, RangeStatus), AppError> {
        let (pool_key, packed) = self.reader.get_pool_and_position_info(token_id).await?;
        let info = packed.decode();
        let liquidity = self.reader.get_position_liquidity(token_id).await?;
        let state = self.reader.get_slot0(pool_key.id()).await?;

        let position = Position {
            token_id,
            pool_key,
            tick_lower: info.tick_lower,
            tick_upper: info.tick_upper,
            liquidity,
            salt: info.salt,
        };
        let status = classify_range(info.tick_lower, info.tick_upper, state.tick);
        Ok((position, status))
    }

    /// Adds as much liquidity as `amount0`/`amount1` allow to an existing
    /// position, walking the settlement fallback chain until a plan lands.
    ///
    /// Amount maxima carry a 50% overshoot headroom over the supplied
    /// amounts to tolerate price movement between calculation and
    /// acceptance.
    pub async fn increase_liquidity(
        &self,
        token_id: U256,
        amount0: U256,
        amount1: U256,
        deadline: U256,
    ) -> Result<IncreaseOutcome, AppError> {
        let (pool_key, packed) = self.reader.get_pool_and_position_info(token_id).await?;
        let info = packed.decode();
        let spacing = pool_key.tick_spacing();

        if info.tick_lower >= info.tick_upper {
            return Err(AppError::Validation(format!(
                "tickLower {} must be below tickUpper {}",
                info.tick_lower, info.tick_upper
            )));
        }
        if info.tick_lower % spacing != 0 {
            return Err(AppError::Validation(format!(
                "tickLower {} must be a multiple of tickSpacing {}",
                info.tick_lower, spacing
            )));
        }
        if info.tick_upper % spacing != 0 {
            return Err(AppError::Validation(format!(
                "tickUpper {} must be a multiple of tickSpacing {}",
                info.tick_upper, spacing
            )));
        }

        let state = self.reader.get_slot0(pool_key.id()).await?;
        let status = classify_range(info.tick_lower, info.tick_upper, state.tick);
        if status == RangeStatus::OutOfRange {
            warn!(
                "position {} is out of range (tick {} outside [{}, {})); deposit will be one-sided",
                token_id, state.tick, info.tick_lower, info.tick_upper
            );
        }
        if pool_key.has_hooks() {
            debug!(
                "pool for token {} has hooks at {}; some settlement primitives may be refused",
                token_id, pool_key.hooks
            );
        }

        let sqrt_lower = sqrt_price_x96_at_tick(info.tick_lower)?;
        let sqrt_upper = sqrt_price_x96_at_tick(info.tick_upper)?;
        let liquidity = liquidity_for_amounts(
            state.sqrt_price_x96,
            sqrt_lower,
            sqrt_upper,
            amount0,
            amount1,
        )?;
        if liquidity.is_zero() {
            return Err(AppError::InsufficientAmount {
                currency: format!("{}/{}", pool_key.currency0, pool_key.currency1),
                required: "> 0 deployable liquidity".to_string(),
                available: format!("amount0={}, amount1={}", amount0, amount1),
            });
        }

        let amount0_max = with_headroom(amount0)?;
        let amount1_max = with_headroom(amount1)?;

        // Preflight against the headroomed maxima before anything is signed.
        let (need0, need1) =
            amounts_for_liquidity(state.sqrt_price_x96, sqrt_lower, sqrt_upper, liquidity)?;
        if need0 > U256::from(amount0_max) {
            return Err(AppError::InsufficientAmount {
                currency: pool_key.currency0.to_string(),
                required: need0.to_string(),
                available: amount0_max.to_string(),
            });
        }
        if need1 > U256::from(amount1_max) {
            return Err(AppError::InsufficientAmount {
                currency: pool_key.currency1.to_string(),
                required: need1.to_string(),
                available: amount1_max.to_string(),
            });
        }

        debug!(
            "increase token {}: liquidity {} (need {}/{}, max {}/{})",
            token_id, liquidity, need0, need1, amount0_max, amount1_max
        );

        let intent = IncreaseIntent {
            token_id,
            liquidity,
            amount0_max,
            amount1_max,
            currency0: pool_key.currency0,
            currency1: pool_key.currency1,
            hook_data: Bytes::new(),
        };
        let candidates = increase_candidates(&intent);

        let AcceptedPlan { plan, tx_hash } =
            run_fallback_chain(&*self.submitter, &candidates, deadline)
                .await
                .map_err(|e| match e {
                    FallbackError::Exhausted(rejection) => AppError::PlanRejected(rejection),
                    FallbackError::Chain(chain) => AppError::Submission(chain),
                })?;

        info!("increase for token {} accepted via '{}': {}", token_id, plan, tx_hash);

        Ok(IncreaseOutcome { tx_hash, plan, liquidity, status })
    }
}

/// Supplied amount plus the 50% overshoot cap, clamped into `uint128`.
fn with_headroom(amount: U256) -> Result<u128, AppError> {
    let max = amount
        .checked_add(amount / U256::from(2))
        .ok_or_else(|| {
            AppError::Validation(format!("amount {} overflows with headroom", amount))
        })?;
    u128::try_from(max).map_err(|_| {
        AppError::Validation(format!("amount {} exceeds uint128 after headroom", amount))
    })
}
