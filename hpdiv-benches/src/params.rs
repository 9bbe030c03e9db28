//! Benchmark parameter types.

use std::fmt;

/// Parameters for a graph or divergence benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct SampleBenchParams {
    /// Points per sample.
    pub point_count: usize,
    /// Coordinates per point.
    pub dimension: usize,
}

impl fmt::Display for SampleBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},d={}", self.point_count, self.dimension)
    }
}

/// Parameters for a cluster weighting benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct WeightingBenchParams {
    /// Number of clusters.
    pub cluster_count: usize,
    /// Points per class inside each cluster.
    pub per_class: usize,
}

impl fmt::Display for WeightingBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c={},n={}", self.cluster_count, self.per_class * 2)
    }
}
