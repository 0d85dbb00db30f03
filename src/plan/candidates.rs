//! Candidate plan lists per liquidity intent.
//!
//! Which settlement primitive a given pool/hook configuration accepts is not
//! statically knowable, so an increase intent carries an ordered list of
//! candidates differing only in how balances are zeroed; the fallback runner
//! walks the list. The chain is data, not control flow, so adding a fourth
//! candidate is a one-line change here.

use alloy_primitives::{Address, Bytes, U256};

use super::actions::Action;
use super::ActionPlan;

/// Everything needed to express one "increase liquidity" intent.
#[derive(Debug, Clone)]
pub struct IncreaseIntent {
    pub token_id: U256,
    pub liquidity: U256,
    pub amount0_max: u128,
    pub amount1_max: u128,
    pub currency0: Address,
    pub currency1: Address,
    pub hook_data: Bytes,
}

impl IncreaseIntent {
    fn mutation(&self) -> Action {
        Action::IncreaseLiquidity {
            token_id: self.token_id,
            liquidity: self.liquidity,
            amount0_max: self.amount0_max,
            amount1_max: self.amount1_max,
            hook_data: self.hook_data.clone(),
        }
    }
}

/// The three known candidate plans for an increase intent, in attempt order.
/// All share the identical mutation step; only the settlement primitive
/// differs.
pub fn increase_candidates(intent: &IncreaseIntent) -> Vec<ActionPlan> {
    vec![
        ActionPlan::new(
            "increase + close per currency",
            vec![
                intent.mutation(),
                Action::CloseCurrency { currency: intent.currency0 },
                Action::CloseCurrency { currency: intent.currency1 },
            ],
        ),
        ActionPlan::new(
            "increase + settle open delta per currency",
            vec![
                intent.mutation(),
                Action::Settle {
                    currency: intent.currency0,
                    amount: super::OPEN_DELTA,
                    payer_is_caller: true,
                },
                Action::Settle {
                    currency: intent.currency1,
                    amount: super::OPEN_DELTA,
                    payer_is_caller: true,
                },
            ],
        ),
        ActionPlan::new(
            "increase + settle pair",
            vec![
                intent.mutation(),
                Action::SettlePair {
                    currency0: intent.currency0,
                    currency1: intent.currency1,
                },
            ],
        ),
    ]
}

/// Canonical decrease plan: withdraw both legs to the recipient.
#[allow(clippy::too_many_arguments)]
pub fn decrease_plan(
    token_id: U256,
    liquidity: U256,
    amount0_min: u128,
    amount1_min: u128,
    currency0: Address,
    currency1: Address,
    recipient: Address,
    hook_data: Bytes,
) -> ActionPlan {
    ActionPlan::new(
        "decrease + take pair",
        vec![
            Action::DecreaseLiquidity {
                token_id,
                liquidity,
                amount0_min,
                amount1_min,
                hook_data,
            },
            Action::TakePair { currency0, currency1, recipient },
        ],
    )
}

/// Canonical mint plan for a fresh position.
#[allow(clippy::too_many_arguments)]
pub fn mint_plan(
    pool_key: crate::domain::PoolKey,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: U256,
    amount0_max: u128,
    amount1_max: u128,
    owner: Address,
    hook_data: Bytes,
) -> ActionPlan {
    let (currency0, currency1) = (pool_key.currency0, pool_key.currency1);
    ActionPlan::new(
        "mint + settle pair",
        vec![
            Action::MintPosition {
                pool_key,
                tick_lower,
                tick_upper,
                liquidity,
                amount0_max,
                amount1_max,
                owner,
                hook_data,
            },
            Action::SettlePair { currency0, currency1 },
        ],
    )
}

/// Canonical burn plan: remove the position and collect both legs.
pub fn burn_plan(
    token_id: U256,
    amount0_min: u128,
    amount1_min: u128,
    currency0: Address,
    currency1: Address,
    recipient: Address,
    hook_data: Bytes,
) -> ActionPlan {
    ActionPlan::new(
        "burn + take pair",
        vec![
            Action::BurnPosition {
                token_id,
                amount0_min,
                amount1_min,
                hook_data,
            },
            Action::TakePair { currency0, currency1, recipient },
        ],
    )
}
