//! Tree-wide invariants checked on fixture polygons.

use approx::assert_relative_eq;
use bsp2d::bsp::{FnVisitor, TreeNavigator};
use bsp2d::mesh::{HalfEdgeMesh, mesh_triangles, monotone_triangulation, triangulate_mesh};
use bsp2d::{Bounds, GeometryTolerance, PartitionTree, Polygon, Segment, TreeConfig};
use nalgebra::Point2;
use proptest::prelude::*;

const TRIANGLE: [(i32, i32); 3] = [(17, 27), (31, 5), (46, 27)];

const SQUARE: [(i32, i32); 4] = [(16, 4), (16, 29), (46, 29), (46, 4)];

const CONVEX: [(i32, i32); 11] = [
    (5, 26),
    (12, 33),
    (24, 35),
    (49, 34),
    (61, 24),
    (62, 11),
    (52, 1),
    (27, 0),
    (11, 1),
    (1, 11),
    (0, 21),
];

const COMPLEX: [(i32, i32); 24] = [
    (24, 16),
    (14, 2),
    (1, 11),
    (12, 24),
    (1, 34),
    (19, 33),
    (12, 29),
    (22, 20),
    (24, 35),
    (37, 24),
    (56, 27),
    (36, 33),
    (63, 29),
    (53, 18),
    (62, 10),
    (49, 10),
    (49, 1),
    (44, 16),
    (50, 21),
    (39, 18),
    (35, 2),
    (27, 23),
    (29, 4),
    (23, 4),
];

fn fixtures() -> Vec<(&'static str, Polygon)> {
    vec![
        ("triangle", Polygon::from_grid(&TRIANGLE)),
        ("square", Polygon::from_grid(&SQUARE)),
        ("convex", Polygon::from_grid(&CONVEX)),
        ("complex", Polygon::from_grid(&COMPLEX)),
    ]
}

fn fit(polygon: &Polygon, config: &TreeConfig) -> Vec<Segment> {
    polygon.fit_segments(&Bounds::from_size(config.width(), config.height()))
}

fn make_tree(polygon: &Polygon) -> PartitionTree {
    let config = TreeConfig::default();
    PartitionTree::build(fit(polygon, &config), &config).unwrap()
}

fn total_length(segments: &[Segment]) -> f64 {
    segments.iter().map(Segment::length).sum()
}

fn check_tree(tree: &PartitionTree, input: &[Segment], name: &str) {
    let tol = tree.config().tolerance();
    let rectangle = tree.config().width() * tree.config().height();

    for (i, node) in tree.nodes().iter().enumerate() {
        let region = node.region();
        assert!(region.is_closed(tol), "{name}: region {i} is open");
        assert_eq!(region.triangles().len(), region.boundary().len() - 2, "{name}: node {i}");

        let covered: f64 = region.triangles().iter().map(|t| t.area()).sum();
        assert_relative_eq!(covered, region.area(), max_relative = 1e-9);

        for segment in node.segments() {
            assert!(
                region.contains_point(&segment.midpoint(), tol),
                "{name}: segment {segment:?} outside the region of node {i}"
            );
        }

        match (node.left(), node.right()) {
            (Some(left), Some(right)) => {
                assert!(node.splitter().is_some(), "{name}: internal node {i} without splitter");
                let (left, right) = (&tree.nodes()[left], &tree.nodes()[right]);
                assert_eq!(left.parent(), Some(i));
                assert_eq!(right.parent(), Some(i));
                assert_relative_eq!(
                    left.region().area() + right.region().area(),
                    region.area(),
                    max_relative = 1e-9
                );
            }
            (None, None) => {}
            _ => panic!("{name}: node {i} has a single child"),
        }
    }

    let tiled: f64 = tree.leaves().map(|i| tree.nodes()[i].region().area()).sum();
    assert_relative_eq!(tiled, rectangle, max_relative = 1e-9);

    assert_relative_eq!(
        total_length(&tree.collect_segments()),
        total_length(input),
        max_relative = 1e-9
    );
}

#[test]
fn fixture_trees_hold_invariants() {
    let config = TreeConfig::default();
    for (name, polygon) in fixtures() {
        let input = fit(&polygon, &config);
        let tree = PartitionTree::build(input.clone(), &config).unwrap();
        assert!(tree.segment_count() >= input.len(), "{name}: segments lost");
        check_tree(&tree, &input, name);
    }
}

#[test]
fn convex_polygon_builds_a_chain() {
    // Every edge of a convex loop sees the rest on one side. The edges
    // through (0,21), (5,26) and (12,33) are colinear and share a node.
    let tree = make_tree(&Polygon::from_grid(&CONVEX));
    assert_eq!(tree.segment_count(), CONVEX.len());
    assert_eq!(tree.height(), CONVEX.len() - 1);
    assert_eq!(tree.len(), 2 * (CONVEX.len() - 1) - 1);
    assert_eq!(tree.nodes().iter().filter(|n| n.segments().len() == 2).count(), 1);
}

#[test]
fn sibling_split_edges_are_reversed() {
    let tree = make_tree(&Polygon::from_grid(&COMPLEX));
    for node in tree.nodes().iter().filter(|n| !n.is_leaf()) {
        let left = tree.region(node.left().unwrap()).unwrap().boundary()[0];
        let right = tree.region(node.right().unwrap()).unwrap().boundary()[0];
        assert_eq!(left, right.reversed());

        let line = node.region().split_line().unwrap().line();
        assert_eq!(&left, line);
    }
}

#[test]
fn region_meshes_keep_euler_characteristic() {
    let tol = GeometryTolerance::default();
    let tree = make_tree(&Polygon::from_grid(&COMPLEX));
    for node in tree.nodes() {
        let boundary = node.region().boundary();
        let mut mesh = HalfEdgeMesh::from_simple_polygon(boundary);
        assert_eq!(mesh.euler_characteristic(), 2);

        triangulate_mesh(&mut mesh, tol);
        assert_eq!(mesh.euler_characteristic(), 2);
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh_triangles(&mesh).len(), boundary.len() - 2);
    }
}

#[test]
fn fixed_triangle_triangulates_to_itself() {
    let (a, b, c) = (Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(0.0, 4.0));
    let boundary = [Segment::new(a, b), Segment::new(b, c), Segment::new(c, a)];

    let triangles = monotone_triangulation(&boundary, GeometryTolerance::default());
    assert_eq!(triangles.len(), 1);

    let vertices = triangles[0].vertices();
    for corner in [a, b, c] {
        assert!(vertices.contains(&corner), "{corner} missing from {vertices:?}");
    }
    assert_relative_eq!(triangles[0].area(), 8.0);
}

#[test]
fn traversal_orders_are_reverses() {
    let tree = make_tree(&Polygon::from_grid(&COMPLEX));
    let eye = Point2::new(17.5, 703.25);

    let mut back_to_front = Vec::new();
    tree.traverse_back_to_front(eye, &mut FnVisitor::new(|s: &[Segment]| back_to_front.push(s.to_vec())));
    let mut front_to_back = Vec::new();
    tree.traverse_front_to_back(eye, &mut FnVisitor::new(|s: &[Segment]| front_to_back.push(s.to_vec())));

    front_to_back.reverse();
    assert_eq!(back_to_front, front_to_back);
    assert_eq!(back_to_front.iter().map(Vec::len).sum::<usize>(), tree.segment_count());
}

#[test]
fn playback_reveals_every_node() {
    for (name, polygon) in fixtures() {
        let tree = make_tree(&polygon);
        let mut navigator = TreeNavigator::new(&tree);

        let mut steps = 0;
        while !navigator.is_complete() {
            navigator.step_forward(&tree);
            steps += 1;
            assert!(steps <= 2 * tree.len(), "{name}: playback did not finish");
        }
        assert_eq!(navigator.visible_height(), tree.height());

        let mut rewound = navigator.clone();
        let mut back_steps = 0;
        while rewound.visible_count() > 1 {
            rewound.step_back(&tree);
            back_steps += 1;
            assert!(back_steps <= 2 * tree.len(), "{name}: step back did not finish");
        }
        assert_eq!(rewound, TreeNavigator::new(&tree), "{name}: step back did not rewind");
    }
}

fn convex_loop() -> impl Strategy<Value = Polygon> {
    (prop::collection::btree_set(0u32..360, 3..24), any::<bool>()).prop_map(|(degrees, clockwise)| {
        let mut vertices: Vec<Point2<f64>> = degrees
            .into_iter()
            .map(|d| {
                let angle = f64::from(d).to_radians();
                Point2::new(100.0 * angle.cos(), 100.0 * angle.sin())
            })
            .collect();
        if clockwise {
            vertices.reverse();
        }
        Polygon::new(vertices)
    })
}

proptest! {
    #[test]
    fn convex_loops_hold_invariants(polygon in convex_loop()) {
        let config = TreeConfig::default();
        let input = fit(&polygon, &config);
        let tree = PartitionTree::build(input.clone(), &config).unwrap();
        prop_assert_eq!(tree.segment_count(), input.len());
        check_tree(&tree, &input, "convex loop");
    }
}
