//! Tolerance used by every geometric predicate in the crate.

use nalgebra::Point2;

/// Default epsilon for side tests, parallelism and point coincidence.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// The epsilon threaded through all geometric predicates.
///
/// Determinants, implicit line equations and coordinate differences whose
/// magnitude is below `epsilon` are treated as zero. The value is passed
/// explicitly to each primitive rather than read from a global.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryTolerance {
    epsilon: f64,
}

impl GeometryTolerance {
    /// Creates a tolerance with the given epsilon.
    ///
    /// # Panics
    /// Panics if `epsilon` is negative or not finite.
    pub fn new(epsilon: f64) -> Self {
        assert!(
            epsilon.is_finite() && epsilon >= 0.0,
            "Tolerance epsilon must be finite and non-negative"
        );
        Self { epsilon }
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns `true` if `value` is strictly within epsilon of zero.
    #[inline]
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() < self.epsilon
    }

    /// Returns `true` if both coordinates of `a` and `b` differ by less than epsilon.
    #[inline]
    pub fn points_eq(&self, a: &Point2<f64>, b: &Point2<f64>) -> bool {
        self.is_zero(a.x - b.x) && self.is_zero(a.y - b.y)
    }
}

impl Default for GeometryTolerance {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}
