//! Convex regions bounded by chains of splitting lines.
//!
//! The root region is an axis-aligned rectangle. Every child region is its
//! parent clipped against the parent's active split line, keeping one side.
//! A boundary is a closed loop whose interior lies on the right of each
//! segment (negative shoelace area with y up).

use nalgebra::Point2;

use crate::mesh::monotone_triangulation;
use crate::{BspError, GeometryTolerance, Segment, Side, Triangle};

/// Which side of the parent's split line a child region keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    /// Keep the split line as oriented; the region lies on its right.
    Left,
    /// Reverse the split line first; the region lies on its original left.
    Right,
}

/// A splitting line clipped to a region boundary.
///
/// `line` runs between the two boundary crossings. `left_idx` is the index
/// of the boundary segment containing `line.left()`, `right_idx` the one
/// containing `line.right()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitLine {
    line: Segment,
    left_idx: usize,
    right_idx: usize,
}

impl SplitLine {
    #[inline]
    pub fn line(&self) -> &Segment {
        &self.line
    }

    #[inline]
    pub fn left_idx(&self) -> usize {
        self.left_idx
    }

    #[inline]
    pub fn right_idx(&self) -> usize {
        self.right_idx
    }

    /// The same line traversed the other way, crossing indices swapped.
    pub fn flipped(&self) -> Self {
        Self {
            line: self.line.reversed(),
            left_idx: self.right_idx,
            right_idx: self.left_idx,
        }
    }
}

/// A convex region with an optional active split line and its triangulation.
#[derive(Debug, Clone)]
pub struct Region {
    boundary: Vec<Segment>,
    split: Option<SplitLine>,
    triangles: Vec<Triangle>,
}

impl Region {
    /// Builds the `width` x `height` rectangle anchored at the origin and
    /// clips `first_split`'s supporting line to it.
    ///
    /// The boundary is `(0,0)-(0,h)`, `(0,h)-(w,h)`, `(w,h)-(w,0)`,
    /// `(w,0)-(0,0)`.
    ///
    /// # Errors
    /// Returns [`BspError::SplitLineCrossings`] unless the line crosses the
    /// rectangle at exactly two distinct points.
    pub fn build_initial(
        width: f64,
        height: f64,
        first_split: &Segment,
        tol: GeometryTolerance,
    ) -> Result<Self, BspError> {
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, height),
            Point2::new(width, height),
            Point2::new(width, 0.0),
        ];
        let boundary: Vec<Segment> = (0..4)
            .map(|i| Segment::new(corners[i], corners[(i + 1) % 4]))
            .collect();

        let crossings = boundary_crossings(&boundary, first_split, tol);
        if crossings.len() != 2 {
            return Err(BspError::SplitLineCrossings {
                found: crossings.len(),
            });
        }
        let split = oriented_split_line(&crossings, first_split);
        let triangles = monotone_triangulation(&boundary, tol);

        Ok(Self {
            boundary,
            split: Some(split),
            triangles,
        })
    }

    /// Derives the child region on one side of `parent`'s split line.
    ///
    /// The new boundary starts with the (possibly reversed) split line,
    /// follows the parent boundary from the line's right crossing round to
    /// its left crossing, and closes. `next_split`, if given, becomes the
    /// new region's active line.
    ///
    /// # Errors
    /// Returns [`BspError::MissingSplitLine`] if `parent` has no active
    /// line, and [`BspError::SplitLineCrossings`] if `next_split` crosses
    /// the new boundary at fewer than two distinct points.
    pub fn clip(
        parent: &Region,
        next_split: Option<&Segment>,
        direction: SplitDirection,
        tol: GeometryTolerance,
    ) -> Result<Self, BspError> {
        let active = parent.split.ok_or(BspError::MissingSplitLine)?;
        let split = match direction {
            SplitDirection::Left => active,
            SplitDirection::Right => active.flipped(),
        };

        let old = &parent.boundary;
        let n = old.len();
        let (left_idx, right_idx) = (split.left_idx, split.right_idx);
        let line = split.line;

        let mut boundary = Vec::with_capacity(n + 2);
        boundary.push(line);
        boundary.push(Segment::new(line.right(), old[right_idx].right()));
        let mut i = (right_idx + 1) % n;
        while i != left_idx {
            boundary.push(old[i]);
            i = (i + 1) % n;
        }
        boundary.push(Segment::new(old[left_idx].left(), line.left()));

        debug_assert_eq!(
            boundary.len(),
            n - (right_idx + n - left_idx) % n + 2,
            "clipped boundary has an unexpected size"
        );

        let split = match next_split {
            Some(segment) => {
                let crossings = boundary_crossings(&boundary, segment, tol);
                if crossings.len() < 2 {
                    return Err(BspError::SplitLineCrossings {
                        found: crossings.len(),
                    });
                }
                if crossings.len() > 2 {
                    log::debug!(
                        "split line crosses region at {} points, using the first two",
                        crossings.len()
                    );
                }
                Some(oriented_split_line(&crossings, segment))
            }
            None => None,
        };

        log::trace!(
            "clipped {:?}: {} -> {} segments, next line: {}",
            direction,
            n,
            boundary.len(),
            split.is_some()
        );

        let triangles = monotone_triangulation(&boundary, tol);
        Ok(Self {
            boundary,
            split,
            triangles,
        })
    }

    #[inline]
    pub fn boundary(&self) -> &[Segment] {
        &self.boundary
    }

    /// The active split line, if the region has one.
    #[inline]
    pub fn split_line(&self) -> Option<&SplitLine> {
        self.split.as_ref()
    }

    /// Cached triangulation, `boundary().len() - 2` triangles.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Boundary vertices in loop order.
    pub fn vertices(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.boundary.iter().map(Segment::left)
    }

    /// Shoelace area of the boundary; negative for the crate's orientation.
    pub fn signed_area(&self) -> f64 {
        self.boundary
            .iter()
            .map(|s| s.left().x * s.right().y - s.right().x * s.left().y)
            .sum::<f64>()
            / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Returns `true` if every segment ends where the next one starts.
    pub fn is_closed(&self, tol: GeometryTolerance) -> bool {
        let n = self.boundary.len();
        (0..n).all(|i| tol.points_eq(&self.boundary[i].right(), &self.boundary[(i + 1) % n].left()))
    }

    /// Returns `true` if `point` lies inside the region or on its boundary.
    pub fn contains_point(&self, point: &Point2<f64>, tol: GeometryTolerance) -> bool {
        self.boundary
            .iter()
            .all(|segment| segment.side(point, tol) != Side::Left)
    }
}

/// Distinct points where `split`'s supporting line meets the boundary, with
/// the index of the boundary segment each was first found on.
fn boundary_crossings(
    boundary: &[Segment],
    split: &Segment,
    tol: GeometryTolerance,
) -> Vec<(Point2<f64>, usize)> {
    let mut crossings: Vec<(Point2<f64>, usize)> = Vec::with_capacity(2);

    for (i, edge) in boundary.iter().enumerate() {
        if edge.is_parallel(split, tol) {
            continue;
        }
        let Some(point) = edge.intersection(split, tol) else {
            continue;
        };
        if !edge.contains_point(&point, tol) {
            continue;
        }
        if crossings.iter().all(|(seen, _)| !tol.points_eq(seen, &point)) {
            crossings.push((point, i));
        }
    }

    crossings
}

/// Builds the split line from the first two crossings, oriented like `split`.
fn oriented_split_line(crossings: &[(Point2<f64>, usize)], split: &Segment) -> SplitLine {
    let (left, left_idx) = crossings[0];
    let (right, right_idx) = crossings[1];
    let line = SplitLine {
        line: Segment::new(left, right),
        left_idx,
        right_idx,
    };

    if split.dot(&line.line) < 0.0 {
        line.flipped()
    } else {
        line
    }
}
