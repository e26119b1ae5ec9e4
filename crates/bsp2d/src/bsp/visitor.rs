//! Visitor pattern for partition tree traversal.
//!
//! Visitors allow custom processing of segments during tree traversal
//! without coupling traversal logic to specific use cases.

use crate::Segment;

/// Visitor for processing segments during partition tree traversal.
///
/// Common uses include painter's-algorithm drawing of walls and collecting
/// segments in visibility order.
pub trait BspVisitor {
    /// Called for each group of colinear segments during traversal.
    ///
    /// The segments all lie on one node's splitting line. Empty groups are
    /// never passed.
    fn visit(&mut self, segments: &[Segment]);
}

/// A simple visitor that collects all visited segments.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<Segment>,
}

impl CollectingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.collected
    }

    pub fn segments(&self) -> &[Segment] {
        &self.collected
    }
}

impl BspVisitor for CollectingVisitor {
    fn visit(&mut self, segments: &[Segment]) {
        self.collected.extend_from_slice(segments);
    }
}

/// A visitor that calls a closure for each segment group.
pub struct FnVisitor<F>
where
    F: FnMut(&[Segment]),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&[Segment]),
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> BspVisitor for FnVisitor<F>
where
    F: FnMut(&[Segment]),
{
    fn visit(&mut self, segments: &[Segment]) {
        (self.func)(segments);
    }
}
