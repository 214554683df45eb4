//! Final crop rectangle calculation.

use std::fmt;

use crate::analysis::{Axis, AxisSample};
use crate::error::{CoreError, CoreResult};
use crate::external::VideoInfo;

/// Pixels to remove from each side of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crop {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Crop {
    /// True when no side would be cropped at all.
    pub fn is_zero(&self) -> bool {
        self.top == 0 && self.bottom == 0 && self.left == 0 && self.right == 0
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top={} bottom={} left={} right={}",
            self.top, self.bottom, self.left, self.right
        )
    }
}

/// Converts the two reduced axes plus the native resolution into a [`Crop`].
///
/// The left/top sides come straight from the axis offsets; the right/bottom
/// sides are whatever the detected extent leaves of the frame. Offsets and
/// extents come from the same detection lines as the frame size, so the
/// subtractions cannot underflow for well-formed cropdetect output; saturation
/// guards against a collaborator reporting an extent larger than the frame.
pub fn calculate_crop(info: &VideoInfo, x: &AxisSample, y: &AxisSample) -> CoreResult<Crop> {
    if x.axis != Axis::X {
        return Err(CoreError::WrongAxis {
            expected: Axis::X,
            actual: x.axis,
        });
    }
    if y.axis != Axis::Y {
        return Err(CoreError::WrongAxis {
            expected: Axis::Y,
            actual: y.axis,
        });
    }

    Ok(Crop {
        left: x.offset,
        top: y.offset,
        right: info.width.saturating_sub(x.length + x.offset),
        bottom: info.height.saturating_sub(y.length + y.offset),
    })
}
