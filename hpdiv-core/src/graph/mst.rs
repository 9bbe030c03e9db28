//! Dense Prim construction of the Euclidean minimum spanning tree.
//!
//! Every vertex outside the tree keeps its cheapest known connecting edge.
//! Candidates are compared with [`GraphEdge`]'s total order, so equal
//! weights fall back to the smaller index pair and the tree is the unique
//! minimum under that order.

use crate::distance::DistanceMatrix;

use super::GraphEdge;

pub(super) fn dense_prim(matrix: &DistanceMatrix) -> Vec<GraphEdge> {
    let node_count = matrix.len();
    let mut in_tree = vec![false; node_count];
    let mut cheapest: Vec<Option<GraphEdge>> = vec![None; node_count];
    let mut edges = Vec::with_capacity(node_count.saturating_sub(1));

    let mut current = 0;
    if let Some(root) = in_tree.first_mut() {
        *root = true;
    }

    while edges.len() + 1 < node_count {
        if let Some(row) = matrix.row(current) {
            relax(current, row, &in_tree, &mut cheapest);
        }

        let next = cheapest
            .iter()
            .zip(&in_tree)
            .enumerate()
            .filter(|&(_, (_, &attached))| !attached)
            .filter_map(|(vertex, (edge, _))| edge.map(|edge| (vertex, edge)))
            .min_by(|left, right| left.1.cmp(&right.1));

        let Some((vertex, edge)) = next else {
            break;
        };
        in_tree[vertex] = true;
        edges.push(edge);
        current = vertex;
    }

    edges.sort_unstable();
    edges
}

fn relax(
    current: usize,
    row: &[f32],
    in_tree: &[bool],
    cheapest: &mut [Option<GraphEdge>],
) {
    for (vertex, ((&weight, &attached), slot)) in row
        .iter()
        .zip(in_tree)
        .zip(cheapest.iter_mut())
        .enumerate()
    {
        if attached {
            continue;
        }
        let candidate = GraphEdge::undirected(current, vertex, weight);
        if slot.is_none_or(|known| candidate < known) {
            *slot = Some(candidate);
        }
    }
}
