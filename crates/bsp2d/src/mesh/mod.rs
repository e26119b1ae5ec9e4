//! Half-edge meshes and the monotone triangulation built on them.
//!
//! Region boundaries are convex, hence y-monotone, so a single plane sweep
//! triangulates them:
//!
//! ```
//! use bsp2d::mesh::monotone_triangulation;
//! use bsp2d::{GeometryTolerance, Segment};
//! use nalgebra::Point2;
//!
//! let a = Point2::new(0.0, 0.0);
//! let b = Point2::new(4.0, 0.0);
//! let c = Point2::new(0.0, 4.0);
//! let boundary = [Segment::new(a, b), Segment::new(b, c), Segment::new(c, a)];
//!
//! let triangles = monotone_triangulation(&boundary, GeometryTolerance::default());
//! assert_eq!(triangles.len(), 1);
//! ```

mod dcel;
mod monotone;

pub use dcel::{
    EXTERIOR_FACE, Face, FaceCycle, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, INTERIOR_FACE,
    MeshDefect, Vertex, VertexId,
};
pub use monotone::{mesh_triangles, monotone_triangulation, triangulate_mesh};
