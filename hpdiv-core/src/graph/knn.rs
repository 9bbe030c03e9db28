//! Exact k-nearest-neighbour selection over the distance matrix.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::distance::DistanceMatrix;

use super::GraphEdge;

pub(super) fn exact_neighbours(matrix: &DistanceMatrix, k: usize) -> Vec<GraphEdge> {
    let rows: Vec<&[f32]> = matrix.rows().collect();

    #[cfg(feature = "parallel")]
    let per_point: Vec<Vec<GraphEdge>> = rows
        .par_iter()
        .enumerate()
        .map(|(query, row)| nearest(query, row, k))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let per_point: Vec<Vec<GraphEdge>> = rows
        .iter()
        .enumerate()
        .map(|(query, row)| nearest(query, row, k))
        .collect();

    per_point.into_iter().flatten().collect()
}

fn nearest(query: usize, row: &[f32], k: usize) -> Vec<GraphEdge> {
    let mut candidates: Vec<(f32, usize)> = row
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != query)
        .map(|(index, &distance)| (distance, index))
        .collect();

    if k == 0 {
        return Vec::new();
    }
    if k < candidates.len() {
        candidates.select_nth_unstable_by(k - 1, by_distance_then_index);
        candidates.truncate(k);
    }
    candidates.sort_unstable_by(by_distance_then_index);

    candidates
        .into_iter()
        .map(|(distance, index)| GraphEdge::new(query, index, distance))
        .collect()
}

fn by_distance_then_index(left: &(f32, usize), right: &(f32, usize)) -> Ordering {
    left.0.total_cmp(&right.0).then_with(|| left.1.cmp(&right.1))
}

