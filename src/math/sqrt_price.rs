//! Exact Q64.96 square-root prices.
//!
//! `sqrt_price_x96_at_tick` is the reference TickMath ladder: a Q128.128
//! product is folded once per set bit of `|tick|`, inverted for positive
//! ticks, then shifted down to X96 with round-up. The output is bit-exact
//! with the on-chain implementation, which matters because these values feed
//! liquidity figures that end up inside transactions.

use alloy_primitives::{uint, U256, U512};

use super::tick::{MAX_TICK, MIN_TICK};
use super::MathError;

/// Q128.128 ratio applied when bit 0 of `|tick|` is set.
const RATIO_BIT_0: U256 = uint!(0xfffcb933bd6fad37aa2d162d1a594001_U256);

/// Ratios for bits 1..=19 of `|tick|`, each pre-scaled by 2^128.
const RATIO_LADDER: [U256; 19] = [
    uint!(0xfff97272373d413259a46990580e213a_U256),
    uint!(0xfff2e50f5f656932ef12357cf3c7fdcc_U256),
    uint!(0xffe5caca7e10e4e61c3624eaa0941cd0_U256),
    uint!(0xffcb9843d60f6159c9db58835c926644_U256),
    uint!(0xff973b41fa98c081472e6896dfb254c0_U256),
    uint!(0xff2ea16466c96a3843ec78b326b52861_U256),
    uint!(0xfe5dee046a99a2a811c461f1969c3053_U256),
    uint!(0xfcbe86c7900a88aedcffc83b479aa3a4_U256),
    uint!(0xf987a7253ac413176f2b074cf7815e54_U256),
    uint!(0xf3392b0822b70005940c7a398e4b70f3_U256),
    uint!(0xe7159475a2c29b7443b29c7fa6e889d9_U256),
    uint!(0xd097f3bdfd2022b8845ad8f792aa5825_U256),
    uint!(0xa9f746462d870fdf8a65dc1f90e061e5_U256),
    uint!(0x70d869a156d2a1b890bb3df62baf32f7_U256),
    uint!(0x31be135f97d08fd981231505542fcfa6_U256),
    uint!(0x9aa508b5b7a84e1c677de54f3e99bc9_U256),
    uint!(0x5d6af8dedb81196699c329225ee604_U256),
    uint!(0x2216e584f5fa1ea926041bedfe98_U256),
    uint!(0x48a170391f7dc42444e8fa2_U256),
];

/// Square root of the price at `tick`, as a Q64.96 fixed-point integer.
pub fn sqrt_price_x96_at_tick(tick: i32) -> Result<U256, MathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfRange(tick));
    }
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 1 != 0 {
        RATIO_BIT_0
    } else {
        U256::from(1) << 128
    };
    for (bit, factor) in RATIO_LADDER.iter().enumerate() {
        if abs_tick & (2 << bit) != 0 {
            ratio = mul_shift_128(ratio, *factor);
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Down-shift Q128.128 -> Q64.96, rounding up so the round trip through
    // the on-chain tick-at-sqrt-price function is lossless.
    let shifted = ratio >> 32;
    let round_up = !(ratio & (U256::from(1u64 << 32) - U256::from(1))).is_zero();
    Ok(if round_up {
        shifted + U256::from(1)
    } else {
        shifted
    })
}

/// `(val * mul) >> 128` with a 512-bit intermediate. Both inputs are below
/// 2^256 and `mul` below 2^128, so the result always fits.
fn mul_shift_128(val: U256, mul: U256) -> U256 {
    let product = widen(val) * widen(mul);
    narrow_unchecked(product >> 128)
}

/// `a * b / denominator` with a 512-bit intermediate product.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero("mul_div"));
    }
    let product = widen(a) * widen(b);
    narrow(product / widen(denominator)).ok_or(MathError::Overflow("mul_div"))
}

fn widen(x: U256) -> U512 {
    let l = x.as_limbs();
    U512::from_limbs([l[0], l[1], l[2], l[3], 0, 0, 0, 0])
}

fn narrow(x: U512) -> Option<U256> {
    let l = x.as_limbs();
    if l[4] | l[5] | l[6] | l[7] != 0 {
        return None;
    }
    Some(U256::from_limbs([l[0], l[1], l[2], l[3]]))
}

fn narrow_unchecked(x: U512) -> U256 {
    let l = x.as_limbs();
    debug_assert_eq!(l[4] | l[5] | l[6] | l[7], 0);
    U256::from_limbs([l[0], l[1], l[2], l[3]])
}
