//! Range engine: turns a live tick and a desired symmetric percentage range
//! into a spacing-aligned tick window with advisory pricing detail.

use serde::Serialize;

use crate::error::AppError;
use crate::math::{
    align_lower, align_upper, percent_range_to_tick_delta, tick_to_price, MAX_TICK, MIN_TICK,
};

/// Realized range width on each side of the current price, in percent.
/// Differs from the requested width because bounds snap to tick spacing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RangePercent {
    pub lower: f64,
    pub upper: f64,
}

/// Computed range window plus advisory context. Serializes to the JSON shape
/// the CLI emits.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeReport {
    pub current_tick: i32,
    pub current_price: f64,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub price_lower: f64,
    pub price_upper: f64,
    pub actual_range_percent: RangePercent,
    pub tick_spacing: i32,
    pub ticks_in_range: i32,
    pub warnings: Vec<String>,
}

/// Maps a symmetric percentage range around `current_tick` to aligned
/// bounds.
///
/// The bounds always straddle the current tick and are always multiples of
/// `tick_spacing`. Width advisories land in `warnings`; anything that would
/// produce an unusable window is a hard validation error.
pub fn compute_range(
    current_tick: i32,
    tick_spacing: i32,
    range_percent: f64,
) -> Result<RangeReport, AppError> {
    if tick_spacing <= 0 {
        return Err(AppError::Validation(format!(
            "tickSpacing must be positive, got {}",
            tick_spacing
        )));
    }
    if !(MIN_TICK..=MAX_TICK).contains(&current_tick) {
        return Err(AppError::Validation(format!(
            "currentTick {} outside valid tick domain",
            current_tick
        )));
    }

    let tick_delta = percent_range_to_tick_delta(range_percent)?;
    if tick_delta == 0 {
        return Err(AppError::Validation(format!(
            "range {}% is narrower than one tick and would collapse to zero width",
            range_percent
        )));
    }

    let mut warnings = Vec::new();

    let mut tick_lower = align_lower(current_tick - tick_delta, tick_spacing)?;
    let mut tick_upper = align_upper(current_tick + tick_delta, tick_spacing)?;

    if tick_lower < MIN_TICK {
        tick_lower = align_upper(MIN_TICK, tick_spacing)?;
        warnings.push("lower bound clamped to the minimum usable tick".to_string());
    }
    if tick_upper > MAX_TICK {
        tick_upper = align_lower(MAX_TICK, tick_spacing)?;
        warnings.push("upper bound clamped to the maximum usable tick".to_string());
    }

    if range_percent >= 50.0 {
        warnings.push("wide range: lower fee APR".to_string());
    }
    if range_percent < 1.0 {
        warnings.push("narrow range: higher out-of-range risk and rebalance frequency".to_string());
    }

    let ticks_in_range = (tick_upper - tick_lower) / tick_spacing;
    if ticks_in_range <= 2 {
        warnings.push(format!(
            "only {} tick spacings in range; bounds are dominated by spacing granularity",
            ticks_in_range
        ));
    }

    let current_price = tick_to_price(current_tick)?;
    let price_lower = tick_to_price(tick_lower)?;
    let price_upper = tick_to_price(tick_upper)?;

    Ok(RangeReport {
        current_tick,
        current_price,
        tick_lower,
        tick_upper,
        price_lower,
        price_upper,
        actual_range_percent: RangePercent {
            lower: (1.0 - price_lower / current_price) * 100.0,
            upper: (price_upper / current_price - 1.0) * 100.0,
        },
        tick_spacing,
        ticks_in_range,
        warnings,
    })
}
