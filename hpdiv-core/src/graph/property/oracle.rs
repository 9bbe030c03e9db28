//! Sequential Kruskal oracle over the complete distance graph.

use crate::distance::DistanceMatrix;
use crate::graph::GraphEdge;

/// Disjoint-set forest with path compression and union by rank.
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    pub(super) fn components(&self) -> usize {
        self.components
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }
        root
    }

    /// Merges the sets holding `left` and `right`; `false` if already joined.
    pub(super) fn union(&mut self, left: usize, right: usize) -> bool {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return false;
        }
        if self.rank[left] < self.rank[right] {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if self.rank[left] == self.rank[right] {
            self.rank[left] = self.rank[left].saturating_add(1);
        }
        self.components -= 1;
        true
    }
}

/// Kruskal over every pair `i < j`, sorted with [`GraphEdge`]'s order.
pub(super) fn sequential_kruskal(matrix: &DistanceMatrix) -> Vec<GraphEdge> {
    let n = matrix.len();
    let mut candidates = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let weight = matrix.get(i, j).expect("indices are in range");
            candidates.push(GraphEdge::undirected(i, j, weight));
        }
    }
    candidates.sort_unstable();

    let mut sets = DisjointSet::new(n);
    let mut accepted = Vec::with_capacity(n.saturating_sub(1));
    for edge in candidates {
        if sets.union(edge.source(), edge.target()) {
            accepted.push(edge);
        }
        if sets.components() == 1 {
            break;
        }
    }
    accepted.sort_unstable();
    accepted
}
