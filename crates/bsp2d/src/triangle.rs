//! Triangle produced by region triangulation.

use nalgebra::Point2;

use crate::segment::determinant;

/// A triangle in the plane, defined by three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point2<f64>; 3],
}

impl Triangle {
    pub fn new(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2<f64>; 3] {
        &self.vertices
    }

    /// Signed area: positive for counter-clockwise winding (y up).
    pub fn signed_area(&self) -> f64 {
        let [a, b, c] = &self.vertices;
        determinant(&(b - a), &(c - a)) / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point2<f64> {
        let [a, b, c] = &self.vertices;
        Point2::from((a.coords + b.coords + c.coords) / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_triangle(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Triangle {
        Triangle::new(
            Point2::new(a[0], a[1]),
            Point2::new(b[0], b[1]),
            Point2::new(c[0], c[1]),
        )
    }

    #[test]
    fn area_of_right_triangle() {
        let tri = make_triangle([0.0, 0.0], [4.0, 0.0], [0.0, 4.0]);
        assert_relative_eq!(tri.signed_area(), 8.0);
        assert_relative_eq!(tri.area(), 8.0);
    }

    #[test]
    fn clockwise_winding_is_negative() {
        let tri = make_triangle([0.0, 0.0], [0.0, 4.0], [4.0, 0.0]);
        assert_relative_eq!(tri.signed_area(), -8.0);
        assert_relative_eq!(tri.area(), 8.0);
    }

    #[test]
    fn centroid_is_vertex_average() {
        let tri = make_triangle([0.0, 0.0], [3.0, 0.0], [0.0, 3.0]);
        let c = tri.centroid();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.0);
    }

    #[test]
    fn degenerate_triangle_has_zero_area() {
        let tri = make_triangle([0.0, 0.0], [1.0, 1.0], [2.0, 2.0]);
        assert_relative_eq!(tri.area(), 0.0);
    }
}
