//! Pool identity and price snapshot.

use alloy_primitives::{
    aliases::{I24, U24},
    keccak256, Address, B256, U256,
};
use alloy_sol_types::SolValue;

use crate::error::AppError;

alloy_sol_types::sol! {
    /// Canonical pool parameters. Field order and widths are fixed by the
    /// protocol; the ABI encoding of this exact tuple is what gets hashed
    /// into the pool identifier, so any deviation silently resolves to the
    /// wrong pool.
    #[derive(Copy, Debug, PartialEq, Eq, Hash)]
    struct PoolKey {
        address currency0;
        address currency1;
        uint24 fee;
        int24 tickSpacing;
        address hooks;
    }
}

/// Deterministic pool identifier: `keccak256(abi.encode(PoolKey))`.
pub type PoolId = B256;

/// Fee sentinel meaning the fee is set dynamically by the pool's hook
/// rather than fixed at creation.
pub const DYNAMIC_FEE_FLAG: u32 = 0x800000;

/// Largest tick spacing any pool may use.
const MAX_TICK_SPACING: i32 = 32767;

impl PoolKey {
    /// Builds a key from two token addresses in either order, sorting them
    /// into the canonical `currency0 < currency1` layout.
    pub fn from_tokens(
        token_a: Address,
        token_b: Address,
        fee: u32,
        tick_spacing: i32,
        hooks: Address,
    ) -> Result<Self, AppError> {
        if token_a == token_b {
            return Err(AppError::Validation(
                "pool currencies must be distinct".to_string(),
            ));
        }
        if fee > 0xFF_FFFF {
            return Err(AppError::Validation(format!(
                "fee {} does not fit in 24 bits",
                fee
            )));
        }
        if !(1..=MAX_TICK_SPACING).contains(&tick_spacing) {
            return Err(AppError::Validation(format!(
                "tickSpacing must be in [1, {}], got {}",
                MAX_TICK_SPACING, tick_spacing
            )));
        }

        let (currency0, currency1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        Ok(PoolKey {
            currency0,
            currency1,
            fee: U24::from(fee),
            tickSpacing: I24::unchecked_from(tick_spacing),
            hooks,
        })
    }

    /// Hashes the canonical ABI encoding into the pool identifier.
    pub fn id(&self) -> PoolId {
        keccak256(self.abi_encode())
    }

    pub fn has_dynamic_fee(&self) -> bool {
        self.fee.to::<u32>() == DYNAMIC_FEE_FLAG
    }

    pub fn has_hooks(&self) -> bool {
        self.hooks != Address::ZERO
    }

    pub fn tick_spacing(&self) -> i32 {
        self.tickSpacing.as_i32()
    }
}

/// Point-in-time price snapshot from `getSlot0`. The two fee fields are
/// carried through but unused by this core. Any value read here may be stale
/// by the time a subsequent write lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub protocol_fee: u32,
    pub lp_fee: u32,
}
