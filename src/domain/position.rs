//! Position state and the packed on-chain layout it is read from.

use alloy_primitives::U256;

use super::pool::PoolKey;

/// Bit offsets of the two 24-bit signed tick fields inside the packed
/// position info word. The packing does not guarantee which field holds
/// which bound, so the decoder orders them. The offsets are a property of
/// the target registry deployment; a different layout changes only these
/// two constants.
const TICK_FIELD_A_OFFSET: usize = 8;
const TICK_FIELD_B_OFFSET: usize = 32;

const TICK_FIELD_MASK: u32 = 0xFF_FFFF;
const TICK_SIGN_BIT: u32 = 1 << 23;

/// Position bounds and sub-identifier packed into one `uint256` by the
/// position registry (a gas-saving layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedPositionInfo(pub U256);

/// Decoded view of [`PackedPositionInfo`], bounds ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedPositionInfo {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub salt: u8,
}

impl PackedPositionInfo {
    pub fn new(raw: U256) -> Self {
        PackedPositionInfo(raw)
    }

    /// Packs two tick bounds and a sub-identifier into the registry layout.
    /// Field order is intentionally not meaningful; `decode` re-orders.
    pub fn pack(tick_a: i32, tick_b: i32, salt: u8) -> Self {
        let field_a = U256::from((tick_a as u32) & TICK_FIELD_MASK) << TICK_FIELD_A_OFFSET;
        let field_b = U256::from((tick_b as u32) & TICK_FIELD_MASK) << TICK_FIELD_B_OFFSET;
        PackedPositionInfo(field_a | field_b | U256::from(salt))
    }

    /// Unpacks bounds and salt. Each 24-bit field carries its own sign
    /// convention (values at or above 2^23 represent negatives via
    /// subtraction of 2^24); decoding as unsigned would corrupt every
    /// negative tick.
    pub fn decode(&self) -> DecodedPositionInfo {
        let a = extract_signed_tick(self.0, TICK_FIELD_A_OFFSET);
        let b = extract_signed_tick(self.0, TICK_FIELD_B_OFFSET);
        DecodedPositionInfo {
            tick_lower: a.min(b),
            tick_upper: a.max(b),
            salt: (self.0 & U256::from(0xFFu32)).to::<u8>(),
        }
    }
}

fn extract_signed_tick(raw: U256, offset: usize) -> i32 {
    let field = ((raw >> offset) & U256::from(TICK_FIELD_MASK)).to::<u32>();
    if field >= TICK_SIGN_BIT {
        field as i32 - (1 << 24)
    } else {
        field as i32
    }
}

/// Whether the current price tick falls inside a position's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStatus {
    InRange,
    OutOfRange,
}

/// Half-open classification: in-range iff `tickLower <= current < tickUpper`.
/// A position sitting exactly on its upper bound is out of range; exactly on
/// its lower bound it is in range.
pub fn classify_range(tick_lower: i32, tick_upper: i32, current_tick: i32) -> RangeStatus {
    if tick_lower <= current_tick && current_tick < tick_upper {
        RangeStatus::InRange
    } else {
        RangeStatus::OutOfRange
    }
}

/// A live position as read from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub token_id: U256,
    pub pool_key: PoolKey,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: u128,
    pub salt: u8,
}

impl Position {
    /// Logically empty: identity may persist but no capital is deployed.
    pub fn is_empty(&self) -> bool {
        self.liquidity == 0
    }

    pub fn status(&self, current_tick: i32) -> RangeStatus {
        classify_range(self.tick_lower, self.tick_upper, current_tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_decode_round_trip() {
        let decoded = PackedPositionInfo::pack(195000, 198000, 7).decode();
        assert_eq!(decoded.tick_lower, 195000);
        assert_eq!(decoded.tick_upper, 198000);
        assert_eq!(decoded.salt, 7);
    }

    #[test]
    fn test_negative_tick_sign_conversion() {
        let decoded = PackedPositionInfo::pack(-887220, 887220, 0).decode();
        assert_eq!(decoded.tick_lower, -887220);
        assert_eq!(decoded.tick_upper, 887220);

        let both_negative = PackedPositionInfo::pack(-1398, -200, 255).decode();
        assert_eq!(both_negative.tick_lower, -1398);
        assert_eq!(both_negative.tick_upper, -200);
        assert_eq!(both_negative.salt, 255);
    }

    #[test]
    fn test_decode_orders_unordered_fields() {
        // The registry does not guarantee which field holds which bound.
        let forward = PackedPositionInfo::pack(-100, 500, 3).decode();
        let swapped = PackedPositionInfo::pack(500, -100, 3).decode();
        assert_eq!(forward, swapped);
        assert_eq!(forward.tick_lower, -100);
        assert_eq!(forward.tick_upper, 500);
    }

    #[test]
    fn test_range_classification_half_open() {
        assert_eq!(classify_range(100, 200, 150), RangeStatus::InRange);
        assert_eq!(classify_range(100, 200, 100), RangeStatus::InRange);
        assert_eq!(classify_range(100, 200, 200), RangeStatus::OutOfRange);
        assert_eq!(classify_range(100, 200, 99), RangeStatus::OutOfRange);
        assert_eq!(classify_range(100, 200, 201), RangeStatus::OutOfRange);
    }

    #[test]
    fn test_classification_with_negative_bounds() {
        assert_eq!(classify_range(-200, -100, -150), RangeStatus::InRange);
        assert_eq!(classify_range(-200, -100, -100), RangeStatus::OutOfRange);
        assert_eq!(classify_range(-200, -100, -200), RangeStatus::InRange);
    }
}
