//! Simple polygons and their conversion into partition input segments.

use nalgebra::{Point2, Vector2};

use crate::Segment;

/// Fraction of the target bounds a fitted polygon occupies.
const FIT_MARGIN: f64 = 0.9;

/// An axis-aligned rectangle, `min` and `max` corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Point2<f64>,
    max: Point2<f64>,
}

impl Bounds {
    /// # Panics (debug builds only)
    /// Panics if `min` is not below and left of `max`.
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y,
            "Bounds min corner must not exceed max corner"
        );
        Self { min, max }
    }

    /// Bounds spanning `(0, 0)` to `(width, height)`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(Point2::origin(), Point2::new(width, height))
    }

    #[inline]
    pub fn min(&self) -> Point2<f64> {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point2<f64> {
        self.max
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns `true` if `point` lies inside or on the rectangle.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Smallest bounds containing every point, or `None` for an empty slice.
    pub fn enclosing(points: &[Point2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let (min, max) = points.iter().fold((*first, *first), |(min, max), p| {
            (
                Point2::new(min.x.min(p.x), min.y.min(p.y)),
                Point2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Self { min, max })
    }
}

/// A simple polygon given by its vertex loop, in either winding.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2<f64>>,
}

impl Polygon {
    /// Creates a new polygon from a list of vertices.
    ///
    /// # Panics (debug builds only)
    /// Panics if fewer than 3 vertices are provided.
    pub fn new(vertices: Vec<Point2<f64>>) -> Self {
        debug_assert!(
            vertices.len() >= 3,
            "Polygon must have at least 3 vertices"
        );
        Self { vertices }
    }

    /// Creates a polygon from integer grid coordinates.
    pub fn from_grid(points: &[(i32, i32)]) -> Self {
        Self::new(
            points
                .iter()
                .map(|&(x, y)| Point2::new(f64::from(x), f64::from(y)))
                .collect(),
        )
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Shoelace area: positive for counter-clockwise winding (y up).
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let (a, b) = (self.vertices[i], self.vertices[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            / 2.0
    }

    /// Computes the vertex average of the polygon.
    pub fn centroid(&self) -> Point2<f64> {
        let sum: Vector2<f64> = self.vertices.iter().map(|p| p.coords).sum();
        Point2::from(sum / self.vertices.len() as f64)
    }

    /// Boundary segments in loop order, oriented so the loop's signed area is
    /// non-negative. Split flags start cleared.
    pub fn segments(&self) -> Vec<Segment> {
        self.mapped_segments(|p| *p)
    }

    /// Boundary segments scaled and centered to fit `bounds`.
    ///
    /// The polygon's bounding box is scaled uniformly to 90% of the tighter
    /// bounds axis and centered in `bounds`. Orientation follows
    /// [`Polygon::segments`].
    pub fn fit_segments(&self, bounds: &Bounds) -> Vec<Segment> {
        let Some(extent) = Bounds::enclosing(&self.vertices) else {
            return Vec::new();
        };
        debug_assert!(
            extent.width() > 0.0 || extent.height() > 0.0,
            "Polygon must not collapse to a point"
        );

        let scale = (bounds.width() / extent.width()).min(bounds.height() / extent.height()) * FIT_MARGIN;
        let padding = Vector2::new(
            (bounds.width() - (extent.max.x + extent.min.x) * scale) / 2.0 + bounds.min.x,
            (bounds.height() - (extent.max.y + extent.min.y) * scale) / 2.0 + bounds.min.y,
        );

        self.mapped_segments(|p| Point2::from(p.coords * scale + padding))
    }

    fn mapped_segments<F>(&self, map: F) -> Vec<Segment>
    where
        F: Fn(&Point2<f64>) -> Point2<f64>,
    {
        let points: Vec<Point2<f64>> = self.vertices.iter().map(map).collect();
        let n = points.len();

        if self.signed_area() >= 0.0 {
            (0..n)
                .map(|i| Segment::new(points[i], points[(i + 1) % n]))
                .collect()
        } else {
            (0..n)
                .rev()
                .map(|i| Segment::new(points[(i + 1) % n], points[i]))
                .collect()
        }
    }
}
