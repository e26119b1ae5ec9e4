//! 2D Binary Space Partitioning of simple polygons.
//!
//! The boundary of a polygon is partitioned into a BSP tree whose nodes carry
//! the convex region they cover, each region triangulated with a monotone
//! plane sweep over a half-edge mesh.
//!
//! ```
//! use bsp2d::{Bounds, PartitionTree, Polygon, TreeConfig};
//!
//! let config = TreeConfig::default();
//! let square = Polygon::from_grid(&[(16, 4), (16, 29), (46, 29), (46, 4)]);
//! let segments = square.fit_segments(&Bounds::from_size(config.width(), config.height()));
//!
//! let tree = PartitionTree::build(segments, &config).unwrap();
//! for node in tree.nodes() {
//!     let region = node.region();
//!     assert_eq!(region.triangles().len(), region.boundary().len() - 2);
//! }
//! ```

pub mod bsp;
mod config;
mod error;
pub mod mesh;
mod polygon;
mod region;
mod segment;
mod tolerance;
mod triangle;

pub use bsp::{PartitionNode, PartitionTree, TreeNavigator, build_partition_tree};
pub use config::{DEFAULT_HEIGHT, DEFAULT_WIDTH, TreeConfig};
pub use error::BspError;
pub use polygon::{Bounds, Polygon};
pub use region::{Region, SplitDirection, SplitLine};
pub use segment::{Segment, Side, determinant};
pub use tolerance::{DEFAULT_EPSILON, GeometryTolerance};
pub use triangle::Triangle;
