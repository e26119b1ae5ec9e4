//! Plane-sweep triangulation of y-monotone polygons.
//!
//! Vertices are merged top to bottom from the two boundary chains that leave
//! the topmost vertex. A stack of vertices whose diagonals are still pending
//! is reduced as the sweep descends, and every diagonal is inserted into the
//! [`HalfEdgeMesh`] so that each bounded face ends up a triangle.

use std::cmp::Ordering;

use nalgebra::Point2;

use crate::segment::determinant;
use crate::{GeometryTolerance, Segment, Triangle};

use super::dcel::{HalfEdgeMesh, VertexId};

/// Boundary chain a vertex belongs to, relative to the top vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chain {
    /// Reached from the top by following `next` links
    Forward,
    /// Reached from the top against the boundary direction
    Backward,
}

/// Triangulates a closed, y-monotone boundary loop.
///
/// Returns `boundary.len() - 2` triangles whose areas sum to the area
/// enclosed by the loop. Either winding is accepted.
///
/// # Panics
/// Panics if the boundary has fewer than 3 segments. The result is
/// unspecified if the loop is not y-monotone.
pub fn monotone_triangulation(boundary: &[Segment], tol: GeometryTolerance) -> Vec<Triangle> {
    let mut mesh = HalfEdgeMesh::from_simple_polygon(boundary);
    triangulate_mesh(&mut mesh, tol);
    mesh_triangles(&mesh)
}

/// Inserts the diagonals that split a freshly built polygon mesh into
/// triangles.
///
/// The mesh is resized to its final counts of `n` vertices, `n - 1` faces
/// and `4n - 6` half-edges first.
///
/// # Panics
/// Panics if the mesh already carries diagonals.
pub fn triangulate_mesh(mesh: &mut HalfEdgeMesh, tol: GeometryTolerance) {
    assert_eq!(mesh.num_faces(), 2, "Mesh must be an untriangulated polygon");

    let n = mesh.num_vertices();
    mesh.resize(n, n - 1, 4 * n - 6);

    let sorted = sweep_order(mesh, tol);
    let orientation = if boundary_area(mesh) < 0.0 { 1.0 } else { -1.0 };

    let mut stack = vec![sorted[0].0, sorted[1].0];
    let mut stack_chain = sorted[1].1;

    for j in 2..n - 1 {
        let (u, chain) = sorted[j];

        if chain != stack_chain {
            while stack.len() > 1 {
                if let Some(w) = stack.pop() {
                    mesh.add_diagonal(u, w);
                }
            }
            stack.clear();
            stack.push(sorted[j - 1].0);
            stack.push(u);
        } else {
            let Some(mut v) = stack.pop() else {
                break;
            };
            let pu = mesh.vertex(u).position();
            while let Some(&w) = stack.last() {
                let pv = mesh.vertex(v).position();
                let pw = mesh.vertex(w).position();
                let det = determinant(&(pv - pu), &(pw - pu));
                if !diagonal_inside(chain, orientation * det, tol) {
                    break;
                }
                mesh.add_diagonal(u, w);
                v = w;
                stack.pop();
            }
            stack.push(v);
            stack.push(u);
        }

        stack_chain = chain;
    }

    let bottom = sorted[n - 1].0;
    if stack.len() > 2 {
        for &w in &stack[1..stack.len() - 1] {
            mesh.add_diagonal(bottom, w);
        }
    }

    log::trace!(
        "triangulated {} vertices into {} faces",
        n,
        mesh.num_faces() - 1
    );
}

/// Reads one triangle per bounded face, from the outer component's
/// predecessor, itself and its successor.
pub fn mesh_triangles(mesh: &HalfEdgeMesh) -> Vec<Triangle> {
    mesh.bounded_faces()
        .filter_map(|face| mesh.face(face).outer())
        .map(|edge| {
            let half_edge = mesh.half_edge(edge);
            Triangle::new(
                mesh.origin(half_edge.prev()),
                mesh.origin(edge),
                mesh.origin(half_edge.next()),
            )
        })
        .collect()
}

/// A diagonal `u -> w` is inside when it turns away from the chain the
/// sweep vertex `u` lies on, given the normalized determinant sign.
#[inline]
fn diagonal_inside(chain: Chain, signed_det: f64, tol: GeometryTolerance) -> bool {
    match chain {
        Chain::Forward => signed_det > tol.epsilon(),
        Chain::Backward => signed_det < -tol.epsilon(),
    }
}

/// Sweep ordering: higher y first, equal y (within tolerance) broken by
/// smaller x first.
fn compare_points(a: &Point2<f64>, b: &Point2<f64>, tol: GeometryTolerance) -> Ordering {
    if tol.is_zero(a.y - b.y) {
        if tol.is_zero(a.x - b.x) {
            Ordering::Equal
        } else if a.x < b.x {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    } else if a.y > b.y {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Merges the two chains below the top vertex into sweep order.
///
/// The top vertex comes first and the bottom vertex last; ties between the
/// chains go to the backward chain.
fn sweep_order(mesh: &HalfEdgeMesh, tol: GeometryTolerance) -> Vec<(VertexId, Chain)> {
    let n = mesh.num_vertices();

    let mut top = VertexId(0);
    for j in 1..n {
        let candidate = VertexId(j);
        if compare_points(
            &mesh.vertex(candidate).position(),
            &mesh.vertex(top).position(),
            tol,
        ) == Ordering::Greater
        {
            top = candidate;
        }
    }

    let top_edge = mesh.vertex(top).incident();
    let mut forward = mesh.half_edge(top_edge).next();
    let outside = mesh.half_edge(top_edge).twin();
    let mut backward = mesh.half_edge(mesh.half_edge(outside).next()).next();

    let mut sorted = Vec::with_capacity(n);
    sorted.push((top, Chain::Forward));

    for _ in 1..n - 1 {
        let f = mesh.half_edge(forward).origin();
        let b = mesh.half_edge(backward).origin();
        if compare_points(&mesh.vertex(f).position(), &mesh.vertex(b).position(), tol)
            == Ordering::Greater
        {
            sorted.push((f, Chain::Forward));
            forward = mesh.half_edge(forward).next();
        } else {
            sorted.push((b, Chain::Backward));
            backward = mesh.half_edge(backward).next();
        }
    }

    let bottom = mesh.half_edge(forward).origin();
    debug_assert_eq!(bottom, mesh.half_edge(backward).origin());
    sorted.push((bottom, Chain::Forward));
    sorted
}

/// Shoelace area of the vertex loop in index order.
fn boundary_area(mesh: &HalfEdgeMesh) -> f64 {
    let n = mesh.num_vertices();
    (0..n)
        .map(|i| {
            let a = mesh.vertex(VertexId(i)).position();
            let b = mesh.vertex(VertexId((i + 1) % n)).position();
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}
