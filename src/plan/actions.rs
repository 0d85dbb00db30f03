//! Typed settlement and liquidity-mutation actions with their on-chain
//! encodings.
//!
//! Action codes and per-action parameter layouts are external-protocol
//! facts; they must match the position manager's dispatcher byte-for-byte.

use alloy_primitives::{aliases::I24, Address, Bytes, U256};
use alloy_sol_types::SolValue;

use crate::domain::PoolKey;

// Dispatcher codes, one byte per action.
pub const INCREASE_LIQUIDITY: u8 = 0x00;
pub const DECREASE_LIQUIDITY: u8 = 0x01;
pub const MINT_POSITION: u8 = 0x02;
pub const BURN_POSITION: u8 = 0x03;
pub const SETTLE: u8 = 0x0b;
pub const SETTLE_PAIR: u8 = 0x0d;
pub const TAKE: u8 = 0x0e;
pub const TAKE_PAIR: u8 = 0x11;
pub const CLOSE_CURRENCY: u8 = 0x12;

/// In a `Settle` step, an amount of zero means "settle whatever delta is
/// outstanding for this currency".
pub const OPEN_DELTA: U256 = U256::ZERO;

/// One step of an [`super::ActionPlan`]: either a liquidity mutation or a
/// balance-settlement primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    IncreaseLiquidity {
        token_id: U256,
        liquidity: U256,
        amount0_max: u128,
        amount1_max: u128,
        hook_data: Bytes,
    },
    DecreaseLiquidity {
        token_id: U256,
        liquidity: U256,
        amount0_min: u128,
        amount1_min: u128,
        hook_data: Bytes,
    },
    MintPosition {
        pool_key: PoolKey,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: U256,
        amount0_max: u128,
        amount1_max: u128,
        owner: Address,
        hook_data: Bytes,
    },
    BurnPosition {
        token_id: U256,
        amount0_min: u128,
        amount1_min: u128,
        hook_data: Bytes,
    },
    Settle {
        currency: Address,
        amount: U256,
        payer_is_caller: bool,
    },
    SettlePair {
        currency0: Address,
        currency1: Address,
    },
    Take {
        currency: Address,
        recipient: Address,
        amount: U256,
    },
    TakePair {
        currency0: Address,
        currency1: Address,
        recipient: Address,
    },
    CloseCurrency {
        currency: Address,
    },
}

impl Action {
    pub fn code(&self) -> u8 {
        match self {
            Action::IncreaseLiquidity { .. } => INCREASE_LIQUIDITY,
            Action::DecreaseLiquidity { .. } => DECREASE_LIQUIDITY,
            Action::MintPosition { .. } => MINT_POSITION,
            Action::BurnPosition { .. } => BURN_POSITION,
            Action::Settle { .. } => SETTLE,
            Action::SettlePair { .. } => SETTLE_PAIR,
            Action::Take { .. } => TAKE,
            Action::TakePair { .. } => TAKE_PAIR,
            Action::CloseCurrency { .. } => CLOSE_CURRENCY,
        }
    }

    /// ABI encoding of this action's parameter blob, exactly as the
    /// dispatcher decodes it.
    pub fn encode_params(&self) -> Bytes {
        match self {
            Action::IncreaseLiquidity {
                token_id,
                liquidity,
                amount0_max,
                amount1_max,
                hook_data,
            } => (*token_id, *liquidity, *amount0_max, *amount1_max, hook_data.clone())
                .abi_encode_params()
                .into(),
            Action::DecreaseLiquidity {
                token_id,
                liquidity,
                amount0_min,
                amount1_min,
                hook_data,
            } => (*token_id, *liquidity, *amount0_min, *amount1_min, hook_data.clone())
                .abi_encode_params()
                .into(),
            Action::MintPosition {
                pool_key,
                tick_lower,
                tick_upper,
                liquidity,
                amount0_max,
                amount1_max,
                owner,
                hook_data,
            } => (
                *pool_key,
                I24::unchecked_from(*tick_lower),
                I24::unchecked_from(*tick_upper),
                *liquidity,
                *amount0_max,
                *amount1_max,
                *owner,
                hook_data.clone(),
            )
                .abi_encode_params()
                .into(),
            Action::BurnPosition {
                token_id,
                amount0_min,
                amount1_min,
                hook_data,
            } => (*token_id, *amount0_min, *amount1_min, hook_data.clone())
                .abi_encode_params()
                .into(),
            Action::Settle {
                currency,
                amount,
                payer_is_caller,
            } => (*currency, *amount, *payer_is_caller).abi_encode_params().into(),
            Action::SettlePair { currency0, currency1 } => {
                (*currency0, *currency1).abi_encode_params().into()
            }
            Action::Take {
                currency,
                recipient,
                amount,
            } => (*currency, *recipient, *amount).abi_encode_params().into(),
            Action::TakePair {
                currency0,
                currency1,
                recipient,
            } => (*currency0, *currency1, *recipient).abi_encode_params().into(),
            Action::CloseCurrency { currency } => currency.abi_encode().into(),
        }
    }
}
