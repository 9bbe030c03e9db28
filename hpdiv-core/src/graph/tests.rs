//! Unit tests for MST and k-NN graph construction.

use rstest::{fixture, rstest};

use crate::{HpdivError, PointSet};

use super::{GraphEdge, GraphMode, build_graph};

fn points(rows: &[&[f32]]) -> PointSet {
    PointSet::try_from_rows(rows.iter().map(|row| row.to_vec()).collect())
        .expect("fixture rows must be valid")
}

fn pairs(edges: &[GraphEdge]) -> Vec<(usize, usize)> {
    edges
        .iter()
        .map(|edge| (edge.source(), edge.target()))
        .collect()
}

#[fixture]
fn line() -> PointSet {
    points(&[&[0.0], &[1.0], &[3.0], &[6.0]])
}

#[fixture]
fn unit_square() -> PointSet {
    points(&[&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]])
}

#[rstest]
fn mst_on_two_points_is_a_single_edge() {
    let graph = build_graph(&points(&[&[1.0, 1.0], &[4.0, 5.0]]), GraphMode::MinimumSpanningTree)
        .expect("two points form a tree");

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edges(), &[GraphEdge::new(0, 1, 5.0)]);
}

#[rstest]
fn mst_on_a_line_links_neighbours(line: PointSet) {
    let graph = build_graph(&line, GraphMode::MinimumSpanningTree).expect("mst must build");

    assert_eq!(
        graph.edges(),
        &[
            GraphEdge::new(0, 1, 1.0),
            GraphEdge::new(1, 2, 2.0),
            GraphEdge::new(2, 3, 3.0),
        ]
    );
    assert!((graph.total_weight() - 6.0).abs() < 1e-9);
}

#[rstest]
fn mst_breaks_equal_weights_by_smaller_index_pair(unit_square: PointSet) {
    let graph = build_graph(&unit_square, GraphMode::MinimumSpanningTree).expect("mst must build");
    assert_eq!(pairs(graph.edges()), vec![(0, 1), (0, 2), (1, 3)]);
}

#[rstest]
fn mst_is_stable_across_runs(unit_square: PointSet) {
    let first = build_graph(&unit_square, GraphMode::MinimumSpanningTree).expect("mst must build");
    for _ in 0..10 {
        let again =
            build_graph(&unit_square, GraphMode::MinimumSpanningTree).expect("mst must build");
        assert_eq!(first, again);
    }
}

#[rstest]
fn mst_tolerates_duplicate_points() {
    let graph = build_graph(
        &points(&[&[2.0], &[2.0], &[2.0]]),
        GraphMode::MinimumSpanningTree,
    )
    .expect("duplicates still span");
    assert_eq!(pairs(graph.edges()), vec![(0, 1), (0, 2)]);
    assert!(graph.edges().iter().all(|edge| edge.weight() == 0.0));
}

#[rstest]
#[case::one(1, vec![(0, 1), (1, 0), (2, 1), (3, 2)])]
#[case::two(2, vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 1), (2, 0), (3, 2), (3, 1)])]
fn knn_orders_neighbours_by_distance_then_index(
    line: PointSet,
    #[case] k: usize,
    #[case] expected: Vec<(usize, usize)>,
) {
    let graph = build_graph(&line, GraphMode::NearestNeighbours { k }).expect("knn must build");
    assert_eq!(graph.edges().len(), 4 * k);
    assert_eq!(pairs(graph.edges()), expected);
}

#[rstest]
fn knn_treats_duplicates_as_neighbours() {
    let graph = build_graph(
        &points(&[&[0.0], &[5.0], &[0.0]]),
        GraphMode::NearestNeighbours { k: 1 },
    )
    .expect("knn must build");
    assert_eq!(pairs(graph.edges()), vec![(0, 2), (1, 0), (2, 0)]);
    assert_eq!(graph.edges()[0].weight(), 0.0);
}

#[rstest]
fn graphs_read_point_views() {
    let set = points(&[&[0.0], &[100.0], &[1.0], &[3.0]]);
    let view = set.view(vec![0, 2, 3]);
    let graph = build_graph(&view, GraphMode::MinimumSpanningTree).expect("mst must build");
    assert_eq!(
        graph.edges(),
        &[GraphEdge::new(0, 1, 1.0), GraphEdge::new(1, 2, 2.0)]
    );
}

#[rstest]
#[case::mst(GraphMode::MinimumSpanningTree)]
#[case::knn(GraphMode::NearestNeighbours { k: 1 })]
fn rejects_single_point(#[case] mode: GraphMode) {
    let err = build_graph(&points(&[&[0.0]]), mode).expect_err("one point has no edges");
    assert_eq!(
        err,
        HpdivError::TooFewPoints {
            required: 2,
            available: 1
        }
    );
    assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
}

#[rstest]
fn rejects_zero_neighbours(line: PointSet) {
    assert_eq!(
        build_graph(&line, GraphMode::NearestNeighbours { k: 0 }),
        Err(HpdivError::ZeroNeighbours)
    );
}

#[rstest]
#[case(4)]
#[case(9)]
fn rejects_k_not_below_point_count(line: PointSet, #[case] k: usize) {
    assert_eq!(
        build_graph(&line, GraphMode::NearestNeighbours { k }),
        Err(HpdivError::TooManyNeighbours { k, points: 4 })
    );
}
