//! Distance graphs over a point collection.
//!
//! Two graphs are derived from the full pairwise distance matrix:
//!
//! - a Euclidean minimum spanning tree, built with dense Prim in `O(N²)`
//!   after the `O(N²·D)` matrix;
//! - a directed k-nearest-neighbour graph with exactly `N·k` edges.
//!
//! Both are reproducible. MST edges are totally ordered by
//! `(weight, smaller index, larger index)`; under a strict total order the
//! minimum spanning tree is unique, so the result does not depend on the
//! algorithm used to find it. k-NN candidates are ordered by
//! `(distance, index)` and the query point is excluded by index.
//!
//! The matrix dominates wall-clock time for large `N`. Callers that need
//! speed over exactness of the spanning structure should prefer k-NN mode
//! with a small `k`.

mod knn;
mod mst;

use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::{
    distance::{DistanceMatrix, pairwise_distances},
    error::{HpdivError, Result},
    points::Points,
};

/// Selects which graph [`build_graph`] derives from the distance matrix.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphMode {
    /// Euclidean minimum spanning tree with `N - 1` undirected edges.
    MinimumSpanningTree,
    /// Directed k-nearest-neighbour graph with `N·k` edges.
    NearestNeighbours {
        /// Neighbours per point; must satisfy `1 <= k < N`.
        k: usize,
    },
}

impl GraphMode {
    /// Returns a short label for logs and summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinimumSpanningTree => "mst",
            Self::NearestNeighbours { .. } => "knn",
        }
    }
}

/// A weighted edge between two point indices.
///
/// MST edges are stored in canonical undirected form (`source < target`).
/// k-NN edges point from the query (`source`) to its neighbour (`target`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphEdge {
    source: usize,
    target: usize,
    weight: f32,
}

impl GraphEdge {
    /// Creates an edge as given.
    #[must_use]
    pub const fn new(source: usize, target: usize, weight: f32) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Creates an undirected edge with its endpoints in canonical order.
    #[must_use]
    pub const fn undirected(left: usize, right: usize, weight: f32) -> Self {
        if left <= right {
            Self::new(left, right, weight)
        } else {
            Self::new(right, left, weight)
        }
    }

    /// Returns the first endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the second endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }

    /// Returns the Euclidean length of the edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f32 { self.weight }
}

impl Eq for GraphEdge {}

impl Ord for GraphEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialOrd for GraphEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Edge list over the point indices `0..node_count`.
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    node_count: usize,
    mode: GraphMode,
    edges: Vec<GraphEdge>,
}

impl Graph {
    /// Returns the number of nodes (points) the graph spans.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the mode the graph was built with.
    #[must_use]
    #[rustfmt::skip]
    pub fn mode(&self) -> GraphMode { self.mode }

    /// Returns the edges.
    ///
    /// MST edges are sorted by `(weight, source, target)`; k-NN edges are
    /// grouped by source in index order, each group sorted nearest first.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[GraphEdge] { &self.edges }

    /// Returns the sum of edge weights, accumulated in `f64`.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|edge| f64::from(edge.weight)).sum()
    }
}

/// Builds an MST or k-NN graph over `points`.
///
/// # Errors
/// Returns [`HpdivError::ZeroNeighbours`] when `k == 0`,
/// [`HpdivError::TooFewPoints`] when fewer than two points are given,
/// [`HpdivError::TooManyNeighbours`] when `k >= N`, and any error raised by
/// [`pairwise_distances`].
///
/// # Examples
/// ```
/// use hpdiv_core::{GraphMode, PointSet, build_graph};
///
/// let points = PointSet::try_from_rows(vec![vec![0.0, 0.0], vec![3.0, 4.0]])?;
/// let graph = build_graph(&points, GraphMode::MinimumSpanningTree)?;
/// assert_eq!(graph.edges().len(), 1);
/// assert_eq!(graph.edges()[0].weight(), 5.0);
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
#[instrument(
    name = "core.build_graph",
    err,
    skip(points),
    fields(points = points.len(), mode = mode.as_str()),
)]
pub fn build_graph<P>(points: &P, mode: GraphMode) -> Result<Graph>
where
    P: Points + Sync + ?Sized,
{
    validate_mode(points.len(), mode)?;
    let matrix = pairwise_distances(points)?;
    graph_from_matrix(&matrix, mode)
}

/// Derives a graph from a precomputed distance matrix.
///
/// # Errors
/// Same validation as [`build_graph`].
pub fn graph_from_matrix(matrix: &DistanceMatrix, mode: GraphMode) -> Result<Graph> {
    let node_count = matrix.len();
    validate_mode(node_count, mode)?;

    let edges = match mode {
        GraphMode::MinimumSpanningTree => mst::dense_prim(matrix),
        GraphMode::NearestNeighbours { k } => knn::exact_neighbours(matrix, k),
    };
    debug!(
        nodes = node_count,
        edges = edges.len(),
        mode = mode.as_str(),
        "graph derived from distance matrix"
    );

    Ok(Graph {
        node_count,
        mode,
        edges,
    })
}

fn validate_mode(points: usize, mode: GraphMode) -> Result<()> {
    if let GraphMode::NearestNeighbours { k: 0 } = mode {
        return Err(HpdivError::ZeroNeighbours);
    }
    if points < 2 {
        return Err(HpdivError::TooFewPoints {
            required: 2,
            available: points,
        });
    }
    match mode {
        GraphMode::NearestNeighbours { k } if k >= points => {
            Err(HpdivError::TooManyNeighbours { k, points })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod property;
#[cfg(test)]
mod tests;
