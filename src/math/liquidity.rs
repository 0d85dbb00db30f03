//! Deployable-liquidity math over Q64.96 square-root prices.
//!
//! Everything here is exact U256 arithmetic; the computed liquidity crosses
//! into transaction payloads, so no float is allowed on any path.

use alloy_primitives::{uint, U256};

use super::sqrt_price::mul_div;
use super::MathError;

/// 2^96, the Q64.96 scaling factor.
pub const Q96: U256 = uint!(0x1000000000000000000000000_U256);

/// Liquidity purchasable with `amount0` between two sqrt prices:
/// `amount0 * (sqrtA * sqrtB / Q96) / (sqrtB - sqrtA)`.
pub fn liquidity_for_amount0(
    sqrt_a: U256,
    sqrt_b: U256,
    amount0: U256,
) -> Result<U256, MathError> {
    let (sqrt_a, sqrt_b) = sorted(sqrt_a, sqrt_b)?;
    let intermediate = mul_div(sqrt_a, sqrt_b, Q96)?;
    mul_div(amount0, intermediate, sqrt_b - sqrt_a)
}

/// Liquidity purchasable with `amount1` between two sqrt prices:
/// `amount1 * Q96 / (sqrtB - sqrtA)`.
pub fn liquidity_for_amount1(
    sqrt_a: U256,
    sqrt_b: U256,
    amount1: U256,
) -> Result<U256, MathError> {
    let (sqrt_a, sqrt_b) = sorted(sqrt_a, sqrt_b)?;
    mul_div(amount1, Q96, sqrt_b - sqrt_a)
}

/// Maximum liquidity deployable without exceeding either amount.
///
/// Three regions relative to `[sqrt_lower, sqrt_upper)`:
/// - price below the range: the position is all currency0,
/// - price above the range: all currency1,
/// - price inside: both legs are active and the binding constraint is
///   whichever currency runs out first (`min(L0, L1)`).
pub fn liquidity_for_amounts(
    sqrt_current: U256,
    sqrt_lower: U256,
    sqrt_upper: U256,
    amount0: U256,
    amount1: U256,
) -> Result<U256, MathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_lower, sqrt_upper)?;

    if sqrt_current <= sqrt_lower {
        liquidity_for_amount0(sqrt_lower, sqrt_upper, amount0)
    } else if sqrt_current >= sqrt_upper {
        liquidity_for_amount1(sqrt_lower, sqrt_upper, amount1)
    } else {
        let l0 = liquidity_for_amount0(sqrt_current, sqrt_upper, amount0)?;
        let l1 = liquidity_for_amount1(sqrt_lower, sqrt_current, amount1)?;
        Ok(l0.min(l1))
    }
}

/// Token amounts required to mint `liquidity` across the range, mirroring
/// the region split of [`liquidity_for_amounts`]. Used for preflight checks
/// against caller-supplied balances.
pub fn amounts_for_liquidity(
    sqrt_current: U256,
    sqrt_lower: U256,
    sqrt_upper: U256,
    liquidity: U256,
) -> Result<(U256, U256), MathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_lower, sqrt_upper)?;

    if sqrt_current <= sqrt_lower {
        Ok((amount0_for_liquidity(sqrt_lower, sqrt_upper, liquidity)?, U256::ZERO))
    } else if sqrt_current >= sqrt_upper {
        Ok((U256::ZERO, amount1_for_liquidity(sqrt_lower, sqrt_upper, liquidity)?))
    } else {
        Ok((
            amount0_for_liquidity(sqrt_current, sqrt_upper, liquidity)?,
            amount1_for_liquidity(sqrt_lower, sqrt_current, liquidity)?,
        ))
    }
}

fn amount0_for_liquidity(
    sqrt_a: U256,
    sqrt_b: U256,
    liquidity: U256,
) -> Result<U256, MathError> {
    let shifted = liquidity
        .checked_shl(96)
        .ok_or(MathError::Overflow("amount0_for_liquidity"))?;
    Ok(mul_div(shifted, sqrt_b - sqrt_a, sqrt_b)? / sqrt_a)
}

fn amount1_for_liquidity(
    sqrt_a: U256,
    sqrt_b: U256,
    liquidity: U256,
) -> Result<U256, MathError> {
    mul_div(liquidity, sqrt_b - sqrt_a, Q96)
}

fn sorted(a: U256, b: U256) -> Result<(U256, U256), MathError> {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    if lo.is_zero() || lo == hi {
        return Err(MathError::UnorderedSqrtPrices);
    }
    Ok((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::sqrt_price_x96_at_tick;

    fn sqrt(tick: i32) -> U256 {
        sqrt_price_x96_at_tick(tick).unwrap()
    }

    #[test]
    fn test_region_below_range_uses_only_amount0() {
        let lower = sqrt(-1000);
        let upper = sqrt(1000);
        let current = sqrt(-1001);

        let base = liquidity_for_amounts(
            current,
            lower,
            upper,
            U256::from(1_000_000u64),
            U256::from(1u64),
        )
        .unwrap();
        let doubled = liquidity_for_amounts(
            current,
            lower,
            upper,
            U256::from(2_000_000u64),
            U256::from(1u64),
        )
        .unwrap();
        // amount1 is irrelevant below the range; L is proportional to amount0.
        let ignoring_amount1 = liquidity_for_amounts(
            current,
            lower,
            upper,
            U256::from(1_000_000u64),
            U256::ZERO,
        )
        .unwrap();

        assert_eq!(base, ignoring_amount1);
        assert_eq!(doubled / base, U256::from(2));
    }

    #[test]
    fn test_region_above_range_uses_only_amount1() {
        let lower = sqrt(-1000);
        let upper = sqrt(1000);
        let current = sqrt(1001);

        let base = liquidity_for_amounts(
            current,
            lower,
            upper,
            U256::from(1u64),
            U256::from(1_000_000u64),
        )
        .unwrap();
        let ignoring_amount0 = liquidity_for_amounts(
            current,
            lower,
            upper,
            U256::ZERO,
            U256::from(1_000_000u64),
        )
        .unwrap();

        assert_eq!(base, ignoring_amount0);
    }

    #[test]
    fn test_region_inside_takes_binding_minimum() {
        let lower = sqrt(-1000);
        let upper = sqrt(1000);
        let current = sqrt(0);

        let balanced = liquidity_for_amounts(
            current,
            lower,
            upper,
            U256::from(1_000_000u64),
            U256::from(1_000_000u64),
        )
        .unwrap();
        // Starving one leg must reduce the result: min(L0, L1) binds.
        let starved0 = liquidity_for_amounts(
            current,
            lower,
            upper,
            U256::from(10u64),
            U256::from(1_000_000u64),
        )
        .unwrap();
        let starved1 = liquidity_for_amounts(
            current,
            lower,
            upper,
            U256::from(1_000_000u64),
            U256::from(10u64),
        )
        .unwrap();

        assert!(starved0 < balanced);
        assert!(starved1 < balanced);
    }

    #[test]
    fn test_monotone_in_amount0_when_binding() {
        let lower = sqrt(-1000);
        let upper = sqrt(1000);
        let current = sqrt(0);
        let amount1 = U256::from(1_000_000_000u64);

        let mut prev = U256::ZERO;
        for amount0 in [1_000u64, 10_000, 100_000, 1_000_000] {
            let l = liquidity_for_amounts(current, lower, upper, U256::from(amount0), amount1)
                .unwrap();
            assert!(l >= prev, "liquidity decreased as amount0 grew");
            prev = l;
        }
    }

    #[test]
    fn test_amounts_round_trip_within_supplied() {
        let lower = sqrt(-1000);
        let upper = sqrt(1000);
        let current = sqrt(100);
        let amount0 = U256::from(5_000_000u64);
        let amount1 = U256::from(7_000_000u64);

        let l = liquidity_for_amounts(current, lower, upper, amount0, amount1).unwrap();
        let (need0, need1) = amounts_for_liquidity(current, lower, upper, l).unwrap();
        assert!(need0 <= amount0);
        assert!(need1 <= amount1);
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let p = sqrt(100);
        assert_eq!(
            liquidity_for_amounts(p, p, p, U256::from(1u64), U256::from(1u64)),
            Err(MathError::UnorderedSqrtPrices)
        );
    }
}
