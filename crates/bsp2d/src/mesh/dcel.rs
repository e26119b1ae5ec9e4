//! Doubly connected edge list for a single simple polygon and its diagonals.
//!
//! Every edge is a pair of twin half-edges. A half-edge knows its origin
//! vertex, its twin, the next and previous half-edges around its face, and
//! the face it bounds. Faces are addressed by [`FaceId`]; `FaceId(0)` is
//! always the unbounded exterior and `FaceId(1)` the polygon interior until
//! diagonals split it.
//!
//! Storage is preallocated with [`HalfEdgeMesh::resize`]; the mesh tracks how
//! many faces and half-edges are in use and hands out the next free slots
//! when a diagonal is inserted.

use std::fmt;

use nalgebra::Point2;

use crate::Segment;

macro_rules! mesh_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

mesh_id!(VertexId);
mesh_id!(HalfEdgeId);
mesh_id!(FaceId);

/// The unbounded face surrounding the polygon.
pub const EXTERIOR_FACE: FaceId = FaceId(0);

/// The polygon interior before any diagonal is inserted.
pub const INTERIOR_FACE: FaceId = FaceId(1);

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    position: Point2<f64>,
    incident: HalfEdgeId,
}

impl Vertex {
    #[inline]
    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    /// A half-edge whose origin is this vertex.
    #[inline]
    pub fn incident(&self) -> HalfEdgeId {
        self.incident
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HalfEdge {
    origin: VertexId,
    twin: HalfEdgeId,
    next: HalfEdgeId,
    prev: HalfEdgeId,
    face: FaceId,
}

impl HalfEdge {
    /// Unlinked slot reserved by [`HalfEdgeMesh::resize`].
    fn unused(id: HalfEdgeId) -> Self {
        Self {
            origin: VertexId(0),
            twin: id,
            next: id,
            prev: id,
            face: EXTERIOR_FACE,
        }
    }

    #[inline]
    pub fn origin(&self) -> VertexId {
        self.origin
    }

    #[inline]
    pub fn twin(&self) -> HalfEdgeId {
        self.twin
    }

    #[inline]
    pub fn next(&self) -> HalfEdgeId {
        self.next
    }

    #[inline]
    pub fn prev(&self) -> HalfEdgeId {
        self.prev
    }

    #[inline]
    pub fn face(&self) -> FaceId {
        self.face
    }
}

/// A face bounded either by an outer boundary cycle or, for the exterior,
/// by the inner components it surrounds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Face {
    outer: Option<HalfEdgeId>,
    inner: Vec<HalfEdgeId>,
}

impl Face {
    #[inline]
    pub fn outer(&self) -> Option<HalfEdgeId> {
        self.outer
    }

    #[inline]
    pub fn inner(&self) -> &[HalfEdgeId] {
        &self.inner
    }
}

/// A broken link found by [`HalfEdgeMesh::validate`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshDefect {
    #[error("twin of twin of {0} is not itself")]
    Twin(HalfEdgeId),
    #[error("next/prev links around {0} are not inverse")]
    Cycle(HalfEdgeId),
    #[error("{0} and its successor bound different faces")]
    Face(HalfEdgeId),
    #[error("successor of {0} does not start where its twin starts")]
    Origin(HalfEdgeId),
    #[error("outer component of {0} lies on another face")]
    OuterComponent(FaceId),
}

/// Half-edge mesh of a simple polygon, subdivided by inserted diagonals.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh {
    vertices: Vec<Vertex>,
    half_edges: Vec<HalfEdge>,
    faces: Vec<Face>,
    open_face: usize,
    open_half_edge: usize,
}

impl HalfEdgeMesh {
    /// Builds the mesh of a closed boundary loop.
    ///
    /// Vertex `j` is `boundary[j].left()`. The inside half-edge `2j` runs
    /// from vertex `j` to vertex `j + 1` and bounds [`INTERIOR_FACE`]; its
    /// twin `2j + 1` runs back and bounds [`EXTERIOR_FACE`], whose single
    /// inner component is half-edge 1.
    ///
    /// # Panics
    /// Panics if the boundary has fewer than 3 segments.
    pub fn from_simple_polygon(boundary: &[Segment]) -> Self {
        let n = boundary.len();
        assert!(n >= 3, "A polygon needs at least 3 boundary segments, got {}", n);

        let vertices = boundary
            .iter()
            .enumerate()
            .map(|(j, segment)| Vertex {
                position: segment.left(),
                incident: HalfEdgeId(2 * j),
            })
            .collect();

        let mut half_edges = Vec::with_capacity(2 * n);
        for j in 0..n {
            let i = (j + n - 1) % n;
            let k = (j + 1) % n;
            half_edges.push(HalfEdge {
                origin: VertexId(j),
                twin: HalfEdgeId(2 * j + 1),
                next: HalfEdgeId(2 * k),
                prev: HalfEdgeId(2 * i),
                face: INTERIOR_FACE,
            });
            half_edges.push(HalfEdge {
                origin: VertexId(k),
                twin: HalfEdgeId(2 * j),
                next: HalfEdgeId(2 * i + 1),
                prev: HalfEdgeId(2 * k + 1),
                face: EXTERIOR_FACE,
            });
        }

        let faces = vec![
            Face {
                outer: None,
                inner: vec![HalfEdgeId(1)],
            },
            Face {
                outer: Some(HalfEdgeId(0)),
                inner: Vec::new(),
            },
        ];

        Self {
            vertices,
            half_edges,
            faces,
            open_face: 2,
            open_half_edge: 2 * n,
        }
    }

    /// Grows storage to `faces` faces and `half_edges` half-edges.
    ///
    /// Existing entries are kept and the free-slot counters stay at the
    /// current counts. The vertex count never changes after construction.
    ///
    /// # Panics
    /// Panics if any count would shrink, if `vertices` differs from the
    /// current vertex count, or if the counts violate Euler's formula
    /// `F - E + V = 2`.
    pub fn resize(&mut self, vertices: usize, faces: usize, half_edges: usize) {
        assert_eq!(
            vertices,
            self.vertices.len(),
            "Vertex count is fixed once the mesh is built"
        );
        assert!(
            faces >= self.faces.len() && half_edges >= self.half_edges.len(),
            "Mesh storage can only grow"
        );
        assert!(
            half_edges % 2 == 0 && euler(vertices, faces, half_edges) == 2,
            "Resize to V={}, F={}, H={} violates Euler's formula",
            vertices,
            faces,
            half_edges
        );

        self.open_face = self.faces.len();
        self.open_half_edge = self.half_edges.len();

        self.faces.resize_with(faces, Face::default);
        let start = self.half_edges.len();
        self.half_edges
            .extend((start..half_edges).map(|i| HalfEdge::unused(HalfEdgeId(i))));
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces in use, including the exterior.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.open_face
    }

    /// Number of half-edges in use.
    #[inline]
    pub fn num_half_edges(&self) -> usize {
        self.open_half_edge
    }

    #[inline]
    pub fn face_capacity(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn half_edge_capacity(&self) -> usize {
        self.half_edges.len()
    }

    /// `F - E + V` over the entries in use; 2 for a connected planar mesh.
    pub fn euler_characteristic(&self) -> isize {
        euler(self.num_vertices(), self.num_faces(), self.num_half_edges())
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    #[inline]
    pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.0]
    }

    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.0]
    }

    /// Position of a half-edge's origin vertex.
    #[inline]
    pub fn origin(&self, id: HalfEdgeId) -> Point2<f64> {
        self.vertex(self.half_edge(id).origin).position
    }

    /// Bounded faces in use, in allocation order.
    pub fn bounded_faces(&self) -> impl Iterator<Item = FaceId> {
        (1..self.open_face).map(FaceId)
    }

    /// Walks a face's outer boundary cycle, starting at its outer component.
    ///
    /// Yields nothing for a face without an outer component.
    pub fn face_cycle(&self, face: FaceId) -> FaceCycle<'_> {
        let start = self.face(face).outer;
        FaceCycle {
            mesh: self,
            start,
            current: start,
        }
    }

    /// Inserts the diagonal `v1 -> v2` and returns the newly created face.
    ///
    /// The incident half-edges of both vertices are rotated until they bound
    /// a common face. That face keeps the half-edge `v1 -> v2`; the new face
    /// receives the twin `v2 -> v1` and every half-edge on its cycle.
    ///
    /// # Panics
    /// Panics if `v1 == v2`, if no free face or half-edge slots remain, or
    /// if the two vertices share no bounded face.
    pub fn add_diagonal(&mut self, v1: VertexId, v2: VertexId) -> FaceId {
        assert_ne!(v1, v2, "Diagonal endpoints must differ");
        assert!(
            self.open_half_edge + 2 <= self.half_edges.len() && self.open_face < self.faces.len(),
            "No capacity left for diagonal {} -> {}",
            v1,
            v2
        );

        let f1 = self.align_incident_faces(v1, v2);
        let f2 = FaceId(self.open_face);
        let e1 = HalfEdgeId(self.open_half_edge);
        let e2 = HalfEdgeId(self.open_half_edge + 1);

        let incident1 = self.vertices[v1.0].incident;
        let incident2 = self.vertices[v2.0].incident;
        let prev1 = self.half_edges[incident1.0].prev;
        let prev2 = self.half_edges[incident2.0].prev;

        self.half_edges[e1.0] = HalfEdge {
            origin: v1,
            twin: e2,
            next: incident2,
            prev: prev1,
            face: f1,
        };
        self.half_edges[e2.0] = HalfEdge {
            origin: v2,
            twin: e1,
            next: incident1,
            prev: prev2,
            face: f2,
        };

        self.half_edges[prev1.0].next = e1;
        self.half_edges[prev2.0].next = e2;
        self.half_edges[incident1.0].prev = e2;
        self.half_edges[incident2.0].prev = e1;

        self.faces[f1.0].outer = Some(e1);
        self.faces[f2.0] = Face {
            outer: Some(e2),
            inner: Vec::new(),
        };

        let mut edge = self.half_edges[e2.0].next;
        while edge != e2 {
            self.half_edges[edge.0].face = f2;
            edge = self.half_edges[edge.0].next;
        }

        self.open_half_edge += 2;
        self.open_face += 1;
        f2
    }

    /// Rotates `v`'s incident half-edge to the next one around `v`.
    fn rotate(&mut self, v: VertexId) -> FaceId {
        let incident = self.vertices[v.0].incident;
        let turned = self.half_edges[self.half_edges[incident.0].prev.0].twin;
        self.vertices[v.0].incident = turned;
        self.half_edges[turned.0].face
    }

    #[inline]
    fn incident_face(&self, v: VertexId) -> FaceId {
        self.half_edges[self.vertices[v.0].incident.0].face
    }

    /// Rotates the incident half-edges of `v1` and `v2` until both bound the
    /// same bounded face, and returns it.
    ///
    /// `v2` is turned a full circle looking for `v1`'s face; on failure `v1`
    /// advances one step and the search repeats.
    fn align_incident_faces(&mut self, v1: VertexId, v2: VertexId) -> FaceId {
        let limit = self.open_half_edge;
        let mut v1_turns = 0;

        let mut f1 = self.incident_face(v1);
        while f1 == EXTERIOR_FACE {
            f1 = self.rotate(v1);
            v1_turns += 1;
            assert!(v1_turns <= limit, "{} touches no bounded face", v1);
        }

        let f2 = self.incident_face(v2);
        while f1 != f2 {
            let mut turns = 0;
            let found = loop {
                let face = self.rotate(v2);
                turns += 1;
                assert!(turns <= limit, "{} has a broken edge ring", v2);
                if face == f1 || face == f2 {
                    break face;
                }
            };
            if found == f1 {
                break;
            }

            loop {
                f1 = self.rotate(v1);
                v1_turns += 1;
                assert!(v1_turns <= limit, "{} and {} share no bounded face", v1, v2);
                if f1 != EXTERIOR_FACE {
                    break;
                }
            }
        }

        f1
    }

    /// Checks the twin, next/prev, face and origin links of every half-edge
    /// in use, and that each bounded face's outer component lies on it.
    pub fn validate(&self) -> Result<(), MeshDefect> {
        for (i, edge) in self.half_edges[..self.open_half_edge].iter().enumerate() {
            let id = HalfEdgeId(i);
            if self.half_edge(edge.twin).twin != id {
                return Err(MeshDefect::Twin(id));
            }
            if self.half_edge(edge.next).prev != id || self.half_edge(edge.prev).next != id {
                return Err(MeshDefect::Cycle(id));
            }
            if self.half_edge(edge.next).face != edge.face {
                return Err(MeshDefect::Face(id));
            }
            if self.half_edge(edge.next).origin != self.half_edge(edge.twin).origin {
                return Err(MeshDefect::Origin(id));
            }
        }

        for face in self.bounded_faces() {
            match self.face(face).outer {
                Some(outer) if self.half_edge(outer).face == face => {}
                _ => return Err(MeshDefect::OuterComponent(face)),
            }
        }

        Ok(())
    }
}

/// Iterator over the half-edges of one face cycle.
pub struct FaceCycle<'a> {
    mesh: &'a HalfEdgeMesh,
    start: Option<HalfEdgeId>,
    current: Option<HalfEdgeId>,
}

impl Iterator for FaceCycle<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        let next = self.mesh.half_edge(current).next;
        self.current = if Some(next) == self.start {
            None
        } else {
            Some(next)
        };
        Some(current)
    }
}

fn euler(vertices: usize, faces: usize, half_edges: usize) -> isize {
    faces as isize - (half_edges / 2) as isize + vertices as isize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_loop(points: &[(f64, f64)]) -> Vec<Segment> {
        let n = points.len();
        (0..n)
            .map(|i| {
                let (a, b) = (points[i], points[(i + 1) % n]);
                Segment::new(Point2::new(a.0, a.1), Point2::new(b.0, b.1))
            })
            .collect()
    }

    fn make_square() -> HalfEdgeMesh {
        HalfEdgeMesh::from_simple_polygon(&make_loop(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]))
    }

    fn make_pentagon() -> HalfEdgeMesh {
        HalfEdgeMesh::from_simple_polygon(&make_loop(&[
            (1.0, 3.0),
            (2.0, 2.5),
            (2.5, 1.5),
            (2.0, 0.0),
            (0.0, 1.0),
        ]))
    }

    fn cycle_origins(mesh: &HalfEdgeMesh, face: FaceId) -> Vec<usize> {
        mesh.face_cycle(face)
            .map(|e| mesh.half_edge(e).origin().0)
            .collect()
    }

    #[test]
    fn polygon_mesh_counts() {
        let mesh = make_square();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_half_edges(), 8);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.euler_characteristic(), 2);
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn polygon_mesh_layout() {
        let mesh = make_square();
        assert_eq!(mesh.face(INTERIOR_FACE).outer(), Some(HalfEdgeId(0)));
        assert!(mesh.face(INTERIOR_FACE).inner().is_empty());
        assert_eq!(mesh.face(EXTERIOR_FACE).outer(), None);
        assert_eq!(mesh.face(EXTERIOR_FACE).inner(), &[HalfEdgeId(1)]);

        assert_eq!(cycle_origins(&mesh, INTERIOR_FACE), vec![0, 1, 2, 3]);
        for j in 0..4 {
            assert_eq!(mesh.vertex(VertexId(j)).incident(), HalfEdgeId(2 * j));
            assert_eq!(mesh.half_edge(HalfEdgeId(2 * j + 1)).origin(), VertexId((j + 1) % 4));
        }
    }

    #[test]
    fn exterior_cycle_runs_backwards() {
        let mesh = make_square();
        let mut edge = mesh.face(EXTERIOR_FACE).inner()[0];
        let mut origins = Vec::new();
        for _ in 0..4 {
            origins.push(mesh.half_edge(edge).origin().0);
            edge = mesh.half_edge(edge).next();
        }
        assert_eq!(origins, vec![1, 0, 3, 2]);
        assert_eq!(edge, HalfEdgeId(1));
    }

    #[test]
    fn resize_keeps_counts_in_use() {
        let mut mesh = make_square();
        mesh.resize(4, 3, 10);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_half_edges(), 8);
        assert_eq!(mesh.face_capacity(), 3);
        assert_eq!(mesh.half_edge_capacity(), 10);
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    #[should_panic(expected = "Euler")]
    fn resize_rejects_non_planar_counts() {
        let mut mesh = make_square();
        mesh.resize(4, 4, 10);
    }

    #[test]
    fn diagonal_splits_square() {
        let mut mesh = make_square();
        mesh.resize(4, 3, 10);
        let face = mesh.add_diagonal(VertexId(0), VertexId(2));

        assert_eq!(face, FaceId(2));
        assert_eq!(mesh.num_faces(), 3);
        assert_eq!(mesh.num_half_edges(), 10);
        assert_eq!(mesh.euler_characteristic(), 2);
        assert_eq!(mesh.validate(), Ok(()));

        assert_eq!(mesh.face_cycle(FaceId(1)).count(), 3);
        assert_eq!(mesh.face_cycle(FaceId(2)).count(), 3);
        assert_eq!(cycle_origins(&mesh, FaceId(1)), vec![0, 2, 3]);
        assert_eq!(cycle_origins(&mesh, FaceId(2)), vec![2, 0, 1]);
    }

    #[test]
    fn fan_of_diagonals_rotates_incident_edges() {
        let mut mesh = make_pentagon();
        mesh.resize(5, 4, 14);

        mesh.add_diagonal(VertexId(2), VertexId(0));
        assert_eq!(mesh.euler_characteristic(), 2);
        mesh.add_diagonal(VertexId(3), VertexId(0));
        assert_eq!(mesh.euler_characteristic(), 2);
        assert_eq!(mesh.validate(), Ok(()));

        let mut triangles: Vec<Vec<usize>> = mesh
            .bounded_faces()
            .map(|f| {
                let mut origins = cycle_origins(&mesh, f);
                origins.sort_unstable();
                origins
            })
            .collect();
        triangles.sort();
        assert_eq!(triangles, vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 4]]);
    }

    #[test]
    #[should_panic(expected = "No capacity")]
    fn diagonal_without_capacity_panics() {
        let mut mesh = make_square();
        mesh.add_diagonal(VertexId(0), VertexId(2));
    }

    #[test]
    #[should_panic(expected = "must differ")]
    fn degenerate_diagonal_panics() {
        let mut mesh = make_square();
        mesh.resize(4, 3, 10);
        mesh.add_diagonal(VertexId(1), VertexId(1));
    }

    #[test]
    fn validate_reports_broken_twin() {
        let mut mesh = make_square();
        mesh.half_edges[0].twin = HalfEdgeId(3);
        assert_eq!(mesh.validate(), Err(MeshDefect::Twin(HalfEdgeId(0))));
    }

    #[test]
    #[should_panic(expected = "at least 3")]
    fn too_small_polygon_panics() {
        HalfEdgeMesh::from_simple_polygon(&make_loop(&[(0.0, 0.0), (1.0, 0.0)]));
    }
}
