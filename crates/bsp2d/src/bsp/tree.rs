//! Partition tree container and construction.

use nalgebra::Point2;

use crate::{BspError, Region, Segment, Side, SplitDirection, TreeConfig};

use super::node::PartitionNode;
use super::selector::{FreeSplit, SplitSelector};
use super::visitor::BspVisitor;

/// A Binary Space Partitioning tree over the boundary segments of a polygon.
///
/// Each node holds the segments lying on its splitting line and the convex
/// region it covers, found by clipping the root rectangle against the lines
/// of all its ancestors. Segments crossing a splitting line are cut, and the
/// pieces are passed down to both children.
///
/// # Storage
///
/// Nodes live in a flat list in in-order sequence (left subtree, node, right
/// subtree), so the leftmost node has index 0 and the rightmost node index
/// `len() - 1`. Links between nodes are indices into that list.
///
/// # Traversal
///
/// The tree supports back-to-front and front-to-back traversal relative to
/// an eye point, useful for painter's algorithm drawing:
///
/// ```
/// use bsp2d::{PartitionTree, Polygon, TreeConfig};
/// use bsp2d::bsp::CollectingVisitor;
/// use nalgebra::Point2;
///
/// let config = TreeConfig::default();
/// let polygon = Polygon::from_grid(&[(17, 27), (31, 5), (46, 27)]);
/// let segments = polygon.fit_segments(&bsp2d::Bounds::from_size(config.width(), config.height()));
/// let tree = PartitionTree::build(segments, &config).unwrap();
///
/// let mut visitor = CollectingVisitor::new();
/// tree.traverse_back_to_front(Point2::new(320.0, 360.0), &mut visitor);
/// assert_eq!(visitor.segments().len(), tree.segment_count());
/// ```
#[derive(Debug, Clone)]
pub struct PartitionTree {
    nodes: Vec<PartitionNode>,
    root: Option<usize>,
    height: usize,
    config: TreeConfig,
}

impl PartitionTree {
    /// Builds a tree using the default selector ([`FreeSplit`]).
    ///
    /// Returns an empty tree if the input is empty.
    ///
    /// # Errors
    /// Returns [`BspError`] if a splitting line does not cross its region
    /// twice, which happens when segments lie outside the root rectangle.
    pub fn build(segments: Vec<Segment>, config: &TreeConfig) -> Result<Self, BspError> {
        Self::build_with(segments, config, &FreeSplit)
    }

    /// Builds a tree, choosing splitting segments with `selector`.
    ///
    /// # Errors
    /// See [`PartitionTree::build`].
    pub fn build_with<S: SplitSelector>(
        segments: Vec<Segment>,
        config: &TreeConfig,
        selector: &S,
    ) -> Result<Self, BspError> {
        if segments.is_empty() {
            return Ok(Self {
                nodes: Vec::new(),
                root: None,
                height: 0,
                config: *config,
            });
        }

        let input = segments.len();
        let subtree = build_subtree(segments, None, config, selector)?;

        let mut nodes = Vec::new();
        let root = flatten(subtree, 0, &mut nodes);
        let height = nodes.iter().map(|n| n.depth() + 1).max().unwrap_or(0);

        log::debug!(
            "built partition tree: {} segments in, {} nodes, height {}",
            input,
            nodes.len(),
            height
        );

        Ok(Self {
            nodes,
            root: Some(root),
            height,
            config: *config,
        })
    }

    /// Returns `true` if the tree contains no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes, empty leaves included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in in-order sequence.
    #[inline]
    pub fn nodes(&self) -> &[PartitionNode] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, index: usize) -> Option<&PartitionNode> {
        self.nodes.get(index)
    }

    #[inline]
    pub fn root_index(&self) -> Option<usize> {
        self.root
    }

    #[inline]
    pub fn root(&self) -> Option<&PartitionNode> {
        self.root.map(|i| &self.nodes[i])
    }

    /// Number of levels; 0 for an empty tree, 1 for a lone root.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    #[inline]
    pub fn region(&self, index: usize) -> Option<&Region> {
        self.node(index).map(PartitionNode::region)
    }

    /// Index of the left child, or `len()` if there is none.
    pub fn idx_left(&self, index: usize) -> usize {
        self.link(index, PartitionNode::left)
    }

    /// Index of the right child, or `len()` if there is none.
    pub fn idx_right(&self, index: usize) -> usize {
        self.link(index, PartitionNode::right)
    }

    /// Index of the parent, or `len()` for the root.
    pub fn idx_parent(&self, index: usize) -> usize {
        self.link(index, PartitionNode::parent)
    }

    fn link(&self, index: usize, follow: fn(&PartitionNode) -> Option<usize>) -> usize {
        self.node(index).and_then(follow).unwrap_or(self.nodes.len())
    }

    /// Indices of all leaf nodes, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(i, _)| i)
    }

    /// Total number of segments stored across all nodes.
    pub fn segment_count(&self) -> usize {
        self.nodes.iter().map(|n| n.segments().len()).sum()
    }

    /// Collects all segments in node order.
    pub fn collect_segments(&self) -> Vec<Segment> {
        self.nodes
            .iter()
            .flat_map(|n| n.segments().iter().copied())
            .collect()
    }

    /// Traverses the tree back-to-front relative to the given eye point.
    ///
    /// At each internal node the subtree on the far side of the splitting
    /// line is visited first, then the node's own segments, then the near
    /// subtree. When the eye lies on the line the node's segments are seen
    /// edge-on and skipped.
    pub fn traverse_back_to_front<V: BspVisitor>(&self, eye: Point2<f64>, visitor: &mut V) {
        if let Some(root) = self.root {
            self.traverse_node(root, &eye, false, visitor);
        }
    }

    /// Traverses the tree front-to-back: the exact reverse of
    /// [`PartitionTree::traverse_back_to_front`].
    pub fn traverse_front_to_back<V: BspVisitor>(&self, eye: Point2<f64>, visitor: &mut V) {
        if let Some(root) = self.root {
            self.traverse_node(root, &eye, true, visitor);
        }
    }

    fn traverse_node<V: BspVisitor>(
        &self,
        index: usize,
        eye: &Point2<f64>,
        near_first: bool,
        visitor: &mut V,
    ) {
        let node = &self.nodes[index];
        let Some(splitter) = node.splitter().filter(|_| !node.is_leaf()) else {
            if !node.segments().is_empty() {
                visitor.visit(node.segments());
            }
            return;
        };

        // Far side first for back-to-front
        let (first, second, show_node) = match splitter.side(eye, self.config.tolerance()) {
            Side::Right => (node.right(), node.left(), true),
            Side::Left => (node.left(), node.right(), true),
            Side::Inside | Side::Both => (node.left(), node.right(), false),
        };
        let (first, second) = if near_first { (second, first) } else { (first, second) };

        if let Some(child) = first {
            self.traverse_node(child, eye, near_first, visitor);
        }
        if show_node {
            visitor.visit(node.segments());
        }
        if let Some(child) = second {
            self.traverse_node(child, eye, near_first, visitor);
        }
    }
}

/// Builds the partition tree of `segments` with the default configuration
/// and selector.
///
/// # Errors
/// See [`PartitionTree::build`].
pub fn build_partition_tree(segments: Vec<Segment>, config: &TreeConfig) -> Result<PartitionTree, BspError> {
    PartitionTree::build(segments, config)
}

/// Owned subtree produced by the recursive build, flattened afterwards.
struct Subtree {
    segments: Vec<Segment>,
    region: Region,
    left: Option<Box<Subtree>>,
    right: Option<Box<Subtree>>,
}

/// Recursively partitions `segments` and derives each node's region.
///
/// `parent` is the parent's region and the side of its split line this
/// node lies on; `None` builds the root region from the config rectangle.
fn build_subtree<S: SplitSelector>(
    mut segments: Vec<Segment>,
    parent: Option<(&Region, SplitDirection)>,
    config: &TreeConfig,
    selector: &S,
) -> Result<Subtree, BspError> {
    let tol = config.tolerance();

    if segments.len() <= 1 {
        let region = node_region(&segments, parent, config)?;
        return Ok(Subtree {
            segments,
            region,
            left: None,
            right: None,
        });
    }

    let split_idx = selector
        .select(&segments)
        .filter(|&i| i < segments.len())
        .unwrap_or(0);
    let splitter = segments.remove(split_idx);

    let mut colinear = vec![splitter];
    let mut behind = Vec::new();
    let mut front = Vec::new();

    for segment in segments {
        match splitter.sides(&segment, tol) {
            Side::Inside => colinear.push(segment),
            Side::Left => front.push(segment),
            Side::Right => behind.push(segment),
            Side::Both => match segment.split_by(&splitter, tol) {
                Some((back_part, front_part)) => {
                    behind.push(back_part);
                    front.push(front_part);
                }
                None => {
                    // Parallel within tolerance; keep it whole on its midpoint's side
                    if splitter.side(&segment.midpoint(), tol) == Side::Right {
                        behind.push(segment);
                    } else {
                        front.push(segment);
                    }
                }
            },
        }
    }

    let region = node_region(&colinear, parent, config)?;
    let left = build_subtree(behind, Some((&region, SplitDirection::Left)), config, selector)?;
    let right = build_subtree(front, Some((&region, SplitDirection::Right)), config, selector)?;

    Ok(Subtree {
        segments: colinear,
        region,
        left: Some(Box::new(left)),
        right: Some(Box::new(right)),
    })
}

fn node_region(
    segments: &[Segment],
    parent: Option<(&Region, SplitDirection)>,
    config: &TreeConfig,
) -> Result<Region, BspError> {
    let tol = config.tolerance();
    match (parent, segments.first()) {
        (Some((region, direction)), next) => Region::clip(region, next, direction, tol),
        (None, Some(first)) => Region::build_initial(config.width(), config.height(), first, tol),
        (None, None) => Err(BspError::MissingSplitLine),
    }
}

/// Moves a subtree into `nodes` in in-order sequence and returns the index
/// of its root.
fn flatten(subtree: Subtree, depth: usize, nodes: &mut Vec<PartitionNode>) -> usize {
    let Subtree {
        segments,
        region,
        left,
        right,
    } = subtree;

    let left = left.map(|child| flatten(*child, depth + 1, nodes));

    let index = nodes.len();
    let mut node = PartitionNode::new(segments, region, depth);
    node.set_left(left);
    nodes.push(node);
    if let Some(child) = left {
        nodes[child].set_parent(Some(index));
    }

    let right = right.map(|child| flatten(*child, depth + 1, nodes));
    nodes[index].set_right(right);
    if let Some(child) = right {
        nodes[child].set_parent(Some(index));
    }

    index
}
