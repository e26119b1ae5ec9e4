//! Build configuration for partition trees.

use crate::GeometryTolerance;

/// Default width of the root region.
pub const DEFAULT_WIDTH: f64 = 640.0;

/// Default height of the root region.
pub const DEFAULT_HEIGHT: f64 = 720.0;

/// Parameters for [`PartitionTree`](crate::PartitionTree) construction.
///
/// The root region is the `width` x `height` rectangle anchored at the
/// origin; every input segment must lie inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeConfig {
    width: f64,
    height: f64,
    tolerance: GeometryTolerance,
}

impl TreeConfig {
    /// # Panics
    /// Panics if either dimension is not strictly positive.
    pub fn new(width: f64, height: f64) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "Root region must have positive size, got {} x {}",
            width,
            height
        );
        Self {
            width,
            height,
            tolerance: GeometryTolerance::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: GeometryTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn tolerance(&self) -> GeometryTolerance {
        self.tolerance
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
