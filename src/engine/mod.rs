pub mod range;

pub use range::{compute_range, RangePercent, RangeReport};
