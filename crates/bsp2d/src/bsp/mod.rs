//! Binary Space Partitioning tree over 2D line segments.
//!
//! The tree recursively partitions the plane using the supporting lines of
//! its input segments. Every node also records the convex region it covers,
//! so the tree doubles as a convex decomposition of the root rectangle.
//!
//! # Example
//!
//! ```
//! use bsp2d::bsp::{CollectingVisitor, TreeNavigator};
//! use bsp2d::{PartitionTree, Segment, TreeConfig};
//! use nalgebra::Point2;
//!
//! let walls = vec![
//!     Segment::new(Point2::new(300.0, 100.0), Point2::new(300.0, 600.0)),
//!     Segment::new(Point2::new(100.0, 100.0), Point2::new(100.0, 600.0)),
//! ];
//! let tree = PartitionTree::build(walls, &TreeConfig::default()).unwrap();
//!
//! // Painter's order as seen from the right of both walls
//! let mut visitor = CollectingVisitor::new();
//! tree.traverse_back_to_front(Point2::new(600.0, 300.0), &mut visitor);
//! assert_eq!(visitor.segments().len(), 2);
//!
//! // Replay the construction one node at a time
//! let mut navigator = TreeNavigator::new(&tree);
//! while !navigator.is_complete() {
//!     navigator.step_forward(&tree);
//! }
//! ```
//!
//! # Architecture
//!
//! - [`PartitionTree`]: flat in-order node storage plus construction
//! - [`PartitionNode`]: colinear segments and the node's convex region
//! - [`SplitSelector`]: strategy trait for choosing splitting segments
//! - [`BspVisitor`]: visitor trait for custom traversal behavior
//! - [`TreeNavigator`]: selection and step-by-step reveal of built nodes

mod navigator;
mod node;
mod selector;
mod tree;
mod visitor;

pub use navigator::TreeNavigator;
pub use node::PartitionNode;
pub use selector::{FirstSegment, FreeSplit, SplitSelector};
pub use tree::{PartitionTree, build_partition_tree};
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor};
