//! Line segments and the side/intersection predicates used for partitioning.

use nalgebra::{Point2, Vector2};

use crate::GeometryTolerance;

/// Which side of a directed line a point or segment lies on.
///
/// "Left" is the side where `det(direction, p - start)` is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Positive determinant side of the line
    Left,
    /// Negative determinant side of the line
    Right,
    /// On the line (within epsilon tolerance)
    Inside,
    /// Endpoints on opposite sides (only produced by [`Segment::sides`])
    Both,
}

/// The 2D cross product `u.x * v.y - u.y * v.x`.
#[inline]
pub fn determinant(u: &Vector2<f64>, v: &Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// A directed line segment from `left` to `right`.
///
/// The `split_left` / `split_right` flags record that the corresponding
/// endpoint was produced by cutting the segment against a splitting line.
/// A segment with both flags set is a "free split": using it as a splitter
/// cuts nothing that is not already cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    left: Point2<f64>,
    right: Point2<f64>,
    split_left: bool,
    split_right: bool,
}

impl Segment {
    /// Creates a segment with both split flags cleared.
    pub fn new(left: Point2<f64>, right: Point2<f64>) -> Self {
        Self {
            left,
            right,
            split_left: false,
            split_right: false,
        }
    }

    /// Creates a segment with explicit split flags.
    pub fn with_split_flags(
        left: Point2<f64>,
        right: Point2<f64>,
        split_left: bool,
        split_right: bool,
    ) -> Self {
        Self {
            left,
            right,
            split_left,
            split_right,
        }
    }

    #[inline]
    pub fn left(&self) -> Point2<f64> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Point2<f64> {
        self.right
    }

    #[inline]
    pub fn split_left(&self) -> bool {
        self.split_left
    }

    #[inline]
    pub fn split_right(&self) -> bool {
        self.split_right
    }

    /// Returns `true` if both endpoints were produced by earlier splits.
    #[inline]
    pub fn is_free_split(&self) -> bool {
        self.split_left && self.split_right
    }

    /// Direction vector `right - left`.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.right - self.left
    }

    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.left, &self.right)
    }

    /// Returns the same segment traversed the other way, flags swapped with it.
    pub fn reversed(&self) -> Self {
        Self {
            left: self.right,
            right: self.left,
            split_left: self.split_right,
            split_right: self.split_left,
        }
    }

    /// Dot product of the two segments' direction vectors.
    #[inline]
    pub fn dot(&self, other: &Segment) -> f64 {
        self.direction().dot(&other.direction())
    }

    /// `det(direction, point - left)`: positive left of the line, negative right of it.
    #[inline]
    pub fn point_determinant(&self, point: &Point2<f64>) -> f64 {
        determinant(&self.direction(), &(point - self.left))
    }

    /// Classifies a point against this segment's supporting line.
    ///
    /// Never returns [`Side::Both`].
    pub fn side(&self, point: &Point2<f64>, tol: GeometryTolerance) -> Side {
        let det = self.point_determinant(point);
        if tol.is_zero(det) {
            Side::Inside
        } else if det >= 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Classifies another segment against this segment's supporting line.
    ///
    /// An endpoint within epsilon of the line counts for either side, so a
    /// segment touching the line with one end is `Left` or `Right`, not `Both`.
    pub fn sides(&self, other: &Segment, tol: GeometryTolerance) -> Side {
        let eps = tol.epsilon();
        let left_det = self.point_determinant(&other.left);
        let right_det = self.point_determinant(&other.right);

        if tol.is_zero(left_det) && tol.is_zero(right_det) {
            Side::Inside
        } else if left_det + eps > 0.0 && right_det + eps > 0.0 {
            Side::Left
        } else if left_det - eps < 0.0 && right_det - eps < 0.0 {
            Side::Right
        } else {
            Side::Both
        }
    }

    /// Returns `true` if the supporting lines are parallel within tolerance.
    #[inline]
    pub fn is_parallel(&self, other: &Segment, tol: GeometryTolerance) -> bool {
        tol.is_zero(determinant(&self.direction(), &other.direction()))
    }

    /// Implicit line coefficients `(a, b, c)` with `a*x + b*y + c = 0`.
    fn implicit(&self) -> (f64, f64, f64) {
        let (l, r) = (self.left, self.right);
        (r.y - l.y, l.x - r.x, r.x * l.y - l.x * r.y)
    }

    /// Intersection point of the two supporting lines.
    ///
    /// Returns `None` if the lines are parallel.
    pub fn intersection(&self, other: &Segment, tol: GeometryTolerance) -> Option<Point2<f64>> {
        if self.is_parallel(other, tol) {
            return None;
        }

        let (a1, b1, c1) = self.implicit();
        let (a2, b2, c2) = other.implicit();
        let denom = a1 * b2 - b1 * a2;

        Some(Point2::new(
            (b1 * c2 - b2 * c1) / denom,
            (a2 * c1 - a1 * c2) / denom,
        ))
    }

    /// Returns `true` if `point` lies on the segment within tolerance.
    ///
    /// The point must satisfy the implicit line equation and fall inside the
    /// segment's bounding box widened by epsilon on every side.
    pub fn contains_point(&self, point: &Point2<f64>, tol: GeometryTolerance) -> bool {
        let (a, b, c) = self.implicit();
        if !tol.is_zero(a * point.x + b * point.y + c) {
            return false;
        }

        let eps = tol.epsilon();
        let (min_x, max_x) = (self.left.x.min(self.right.x), self.left.x.max(self.right.x));
        let (min_y, max_y) = (self.left.y.min(self.right.y), self.left.y.max(self.right.y));

        point.x >= min_x - eps
            && point.x <= max_x + eps
            && point.y >= min_y - eps
            && point.y <= max_y + eps
    }

    /// Cuts this segment at `point`, which must lie on `splitter`'s line.
    ///
    /// Returns `(behind, front)`: the piece on the splitter's right side and
    /// the piece on its left side. The new endpoint of each piece gets its
    /// split flag set; the untouched endpoint keeps the original flag.
    pub fn split_at(
        &self,
        splitter: &Segment,
        point: Point2<f64>,
        tol: GeometryTolerance,
    ) -> (Segment, Segment) {
        if splitter.side(&self.left, tol) == Side::Right {
            let behind = Segment {
                right: point,
                split_right: true,
                ..*self
            };
            let front = Segment {
                left: point,
                split_left: true,
                ..*self
            };
            (behind, front)
        } else {
            let behind = Segment {
                left: point,
                split_left: true,
                ..*self
            };
            let front = Segment {
                right: point,
                split_right: true,
                ..*self
            };
            (behind, front)
        }
    }

    /// Cuts this segment by `splitter`'s supporting line.
    ///
    /// Returns `None` if the lines are parallel.
    pub fn split_by(&self, splitter: &Segment, tol: GeometryTolerance) -> Option<(Segment, Segment)> {
        let point = splitter.intersection(self, tol)?;
        Some(self.split_at(splitter, point, tol))
    }
}
