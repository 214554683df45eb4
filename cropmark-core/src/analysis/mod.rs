//! Statistical aggregation of per-frame crop detections.
//!
//! This module turns the noisy per-frame measurements produced by window
//! sampling into one stable crop decision: outlier filtering, axis
//! reduction, and the final rectangle arithmetic.

/// Axis-tagged sample value type
pub mod sample;

/// Interquartile-range outlier removal
pub mod filter;

/// Reduction of a sample pool to one chosen value
pub mod reduce;

/// Final crop rectangle calculation
pub mod crop;

pub use crop::{calculate_crop, Crop};
pub use filter::filter_outliers;
pub use reduce::{reduce_axis, ReducerPolicy};
pub use sample::{Axis, AxisSample};
