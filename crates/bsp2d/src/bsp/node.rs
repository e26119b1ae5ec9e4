//! Partition tree node.

use crate::{Region, Segment};

/// A node in the partition tree.
///
/// Each node stores the segments lying on its splitting line, splitter
/// first, and the convex region the node covers. Children and parent are
/// indices into the owning tree's node list.
///
/// # Children
///
/// Internal nodes always have both children, either of which may be an
/// empty leaf:
/// - `left`: segments behind the line (on its right-hand side)
/// - `right`: segments in front of the line (on its left-hand side)
#[derive(Debug, Clone)]
pub struct PartitionNode {
    segments: Vec<Segment>,
    region: Region,
    left: Option<usize>,
    right: Option<usize>,
    parent: Option<usize>,
    depth: usize,
}

impl PartitionNode {
    pub(crate) fn new(segments: Vec<Segment>, region: Region, depth: usize) -> Self {
        Self {
            segments,
            region,
            left: None,
            right: None,
            parent: None,
            depth,
        }
    }

    pub(crate) fn set_left(&mut self, left: Option<usize>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Option<usize>) {
        self.right = right;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<usize>) {
        self.parent = parent;
    }

    /// Segments on this node's splitting line; the splitter comes first.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The segment whose supporting line splits this node, if any.
    #[inline]
    pub fn splitter(&self) -> Option<&Segment> {
        self.segments.first()
    }

    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Index of the child holding segments behind the splitting line.
    #[inline]
    pub fn left(&self) -> Option<usize> {
        self.left
    }

    /// Index of the child holding segments in front of the splitting line.
    #[inline]
    pub fn right(&self) -> Option<usize> {
        self.right
    }

    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Distance from the root, which has depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
