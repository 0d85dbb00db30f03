//! Tick ↔ price conversion on the geometric ladder `price = 1.0001^tick`.
//!
//! All functions here are f64: the results are advisory (display prices,
//! window sizing) and are never encoded into a transaction. Exact on-chain
//! values go through [`super::sqrt_price`] instead.

use super::MathError;

/// Lowest tick usable in any pool.
pub const MIN_TICK: i32 = -887272;
/// Highest tick usable in any pool.
pub const MAX_TICK: i32 = 887272;

/// Per-tick price growth factor.
const TICK_BASE: f64 = 1.0001;

/// Price at a tick: `1.0001^tick`. Total over the valid tick domain.
pub fn tick_to_price(tick: i32) -> Result<f64, MathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfRange(tick));
    }
    Ok(TICK_BASE.powi(tick))
}

/// Fractional tick for a price: `ln(price) / ln(1.0001)`.
///
/// The result is intentionally unrounded; round to nearest for display,
/// floor/ceil when aligning range boundaries.
pub fn price_to_tick(price: f64) -> Result<f64, MathError> {
    if !(price > 0.0) || !price.is_finite() {
        return Err(MathError::InvalidPrice);
    }
    Ok(price.ln() / TICK_BASE.ln())
}

/// Tick distance covering a symmetric percentage range:
/// `round(ln(1 + pct/100) / ln(1.0001))`.
///
/// Price growth per tick is geometric, so a linear `pct / tick_size`
/// approximation widens the window for anything but tiny percentages.
pub fn percent_range_to_tick_delta(pct: f64) -> Result<i32, MathError> {
    if !(pct > 0.0) || !pct.is_finite() {
        return Err(MathError::InvalidPercent);
    }
    let delta = ((1.0 + pct / 100.0).ln() / TICK_BASE.ln()).round();
    if delta > MAX_TICK as f64 {
        return Err(MathError::InvalidPercent);
    }
    Ok(delta as i32)
}

/// Largest spacing-aligned tick ≤ `tick`.
pub fn align_lower(tick: i32, spacing: i32) -> Result<i32, MathError> {
    if spacing <= 0 {
        return Err(MathError::InvalidTickSpacing(spacing));
    }
    Ok(tick.div_euclid(spacing) * spacing)
}

/// Smallest spacing-aligned tick ≥ `tick`.
pub fn align_upper(tick: i32, spacing: i32) -> Result<i32, MathError> {
    if spacing <= 0 {
        return Err(MathError::InvalidTickSpacing(spacing));
    }
    let aligned = tick.div_euclid(spacing) * spacing;
    if aligned == tick {
        Ok(aligned)
    } else {
        Ok(aligned + spacing)
    }
}
