//! Axis-tagged crop sample value type.
//!
//! One `AxisSample` records a single detected crop extent along one spatial
//! dimension of one analyzed frame. Samples are immutable once created and
//! are only ever aggregated with samples carrying the same axis tag.

/// Spatial dimension a crop extent is measured along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal: extent is a width, offset is an x position.
    X,
    /// Vertical: extent is a height, offset is a y position.
    Y,
}

/// One detected crop extent and its starting offset along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSample {
    /// Detected extent (width or height) in pixels.
    pub length: u32,
    /// Offset of the extent from the frame edge (x or y) in pixels.
    pub offset: u32,
    /// Dimension this sample was measured along.
    pub axis: Axis,
}

impl AxisSample {
    /// Creates a sample along the horizontal axis.
    pub fn x(length: u32, offset: u32) -> Self {
        Self {
            length,
            offset,
            axis: Axis::X,
        }
    }

    /// Creates a sample along the vertical axis.
    pub fn y(length: u32, offset: u32) -> Self {
        Self {
            length,
            offset,
            axis: Axis::Y,
        }
    }
}
