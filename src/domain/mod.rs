//! Domain types: pool identity and state, positions and their packed
//! on-chain representation.

pub mod pool;
pub mod position;

pub use pool::{PoolId, PoolKey, PoolState, DYNAMIC_FEE_FLAG};
pub use position::{
    classify_range, DecodedPositionInfo, PackedPositionInfo, Position, RangeStatus,
};
