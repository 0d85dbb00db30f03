//! Numeric core, deliberately split in two:
//!
//! - [`tick`] is f64 and covers advisory values only (display prices,
//!   percentage ranges). Nothing from it crosses into a transaction payload.
//! - [`sqrt_price`] and [`liquidity`] are exact U256/Q96 arithmetic for every
//!   quantity that ends up on-chain.

use thiserror::Error;

pub mod liquidity;
pub mod sqrt_price;
pub mod tick;

pub use liquidity::{amounts_for_liquidity, liquidity_for_amounts, Q96};
pub use sqrt_price::{mul_div, sqrt_price_x96_at_tick};
pub use tick::{
    align_lower, align_upper, percent_range_to_tick_delta, price_to_tick, tick_to_price, MAX_TICK,
    MIN_TICK,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("tick {0} outside valid range [{MIN_TICK}, {MAX_TICK}]")]
    TickOutOfRange(i32),
    #[error("tick spacing must be positive, got {0}")]
    InvalidTickSpacing(i32),
    #[error("price must be positive and finite")]
    InvalidPrice,
    #[error("range percent must be positive and finite")]
    InvalidPercent,
    #[error("sqrt price bounds must satisfy 0 < lower < upper")]
    UnorderedSqrtPrices,
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
    #[error("division by zero in {0}")]
    DivisionByZero(&'static str),
}
