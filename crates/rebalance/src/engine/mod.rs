//! Allocation diff engine.
//!
//! Pure, synchronous transformations from a planner preview to the values the
//! dashboard renders. Nothing here allocates shared state or can fail: missing
//! symbols read as zero and empty vectors have defined results.

mod changes;
mod normalize;
mod stability;

pub use changes::{AllocationChange, ChangeType, derive_changes};
pub use normalize::{ChartSlice, normalize};
pub use stability::stability_score;

/// Rounds half away from zero at the second decimal.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fraction (0..1) to percentage (0..100) with two decimals.
pub fn to_percent(fraction: f64) -> f64 {
    (fraction * 100.0 * 100.0).round() / 100.0
}
