//! End-to-end per-cluster weighting.
//!
//! [`ClusterWeighting::run`] splits a labelled point set by cluster
//! membership, builds one graph per cluster, derives its divergence matrix
//! and BER lower bound, and turns the per-cluster bounds into alpha-hat
//! coefficients.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::{
    ber::ber_lower_bound,
    cluster::{AlphaHatParams, ClusterId, ClusterSlice, compute_alpha_hat, split_into_clusters},
    cross_class::{DivergenceMatrix, cross_class_counts},
    error::{HpdivError, Result},
    graph::{GraphMode, build_graph},
    points::{LabelVector, PointSet, Points},
};

/// Configures and constructs [`ClusterWeighting`] runners.
///
/// Defaults: `alpha = 0.2`, `beta = 0.05`, MST graphs. The class count has
/// no default and must be set.
///
/// # Examples
/// ```
/// use hpdiv_core::{ClusterWeightingBuilder, GraphMode};
///
/// let weighting = ClusterWeightingBuilder::new()
///     .with_class_count(3)
///     .with_graph_mode(GraphMode::NearestNeighbours { k: 4 })
///     .build()?;
/// assert_eq!(weighting.class_count(), 3);
/// assert_eq!(weighting.params().alpha(), 0.2);
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ClusterWeightingBuilder {
    class_count: usize,
    alpha: f64,
    beta: f64,
    graph_mode: GraphMode,
}

impl Default for ClusterWeightingBuilder {
    fn default() -> Self {
        let params = AlphaHatParams::default();
        Self {
            class_count: 0,
            alpha: params.alpha(),
            beta: params.beta(),
            graph_mode: GraphMode::MinimumSpanningTree,
        }
    }
}

impl ClusterWeightingBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of classes `K`.
    #[must_use]
    pub fn with_class_count(mut self, class_count: usize) -> Self {
        self.class_count = class_count;
        self
    }

    /// Overrides the base coefficient `alpha`.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Overrides the deviation scale `beta`.
    #[must_use]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Selects the per-cluster graph.
    #[must_use]
    pub fn with_graph_mode(mut self, mode: GraphMode) -> Self {
        self.graph_mode = mode;
        self
    }

    /// Returns the configured class count.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Returns the configured graph mode.
    #[must_use]
    pub fn graph_mode(&self) -> GraphMode {
        self.graph_mode
    }

    /// Validates the configuration and constructs a [`ClusterWeighting`].
    ///
    /// # Errors
    /// Returns [`HpdivError::InvalidClassCount`] when the class count is
    /// unset or below two, [`HpdivError::NonFiniteParameter`] for a NaN or
    /// infinite `alpha` or `beta`, and [`HpdivError::ZeroNeighbours`] for
    /// k-NN mode with `k == 0`.
    pub fn build(self) -> Result<ClusterWeighting> {
        if self.class_count < 2 {
            return Err(HpdivError::InvalidClassCount {
                got: self.class_count,
            });
        }
        let params = AlphaHatParams::new(self.alpha, self.beta)?;
        if let GraphMode::NearestNeighbours { k: 0 } = self.graph_mode {
            return Err(HpdivError::ZeroNeighbours);
        }

        Ok(ClusterWeighting {
            class_count: self.class_count,
            params,
            graph_mode: self.graph_mode,
        })
    }
}

/// Per-cluster outcome of [`ClusterWeighting::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterReport {
    /// Cluster identifier.
    pub cluster: ClusterId,
    /// Number of member points.
    pub size: usize,
    /// Normalized cross-class divergence matrix of the cluster's graph.
    pub divergence: DivergenceMatrix,
    /// BER lower bound derived from [`Self::divergence`].
    pub ber: f64,
}

/// Result of [`ClusterWeighting::run`], ordered by ascending cluster id.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterWeightingReport {
    clusters: Vec<ClusterReport>,
    alpha_hat: Vec<f64>,
}

impl ClusterWeightingReport {
    /// Returns one report per cluster.
    #[must_use]
    #[rustfmt::skip]
    pub fn clusters(&self) -> &[ClusterReport] { &self.clusters }

    /// Returns the alpha-hat coefficient of each cluster, aligned with
    /// [`Self::clusters`].
    #[must_use]
    #[rustfmt::skip]
    pub fn alpha_hat(&self) -> &[f64] { &self.alpha_hat }

    /// Iterates over `(report, alpha_hat)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ClusterReport, f64)> {
        self.clusters.iter().zip(self.alpha_hat.iter().copied())
    }
}

/// Runs the split, graph, divergence, BER, and alpha-hat stages.
///
/// Clusters are processed independently (in parallel with the `parallel`
/// feature). A cluster with fewer than two points has no graph; it is
/// reported with a zero matrix and a zero bound. In k-NN mode a cluster
/// with `k` or fewer points uses `k = size - 1`.
///
/// # Examples
/// ```
/// use hpdiv_core::{ClusterId, ClusterWeightingBuilder, LabelVector, PointSet};
///
/// let points = PointSet::try_from_rows(vec![
///     vec![0.0], vec![1.0], vec![2.0], vec![3.0],
///     vec![10.0], vec![11.0], vec![30.0], vec![31.0],
/// ])?;
/// let labels = LabelVector::new(vec![0, 1, 0, 1, 0, 0, 0, 0]);
/// let membership: Vec<ClusterId> = [0, 0, 0, 0, 1, 1, 1, 1]
///     .into_iter()
///     .map(ClusterId::new)
///     .collect();
///
/// let weighting = ClusterWeightingBuilder::new().with_class_count(2).build()?;
/// let report = weighting.run(&points, &labels, &membership)?;
/// assert_eq!(report.clusters().len(), 2);
/// assert_eq!(report.clusters()[0].ber, 0.5);
/// assert!(report.alpha_hat()[0] > report.alpha_hat()[1]);
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ClusterWeighting {
    class_count: usize,
    params: AlphaHatParams,
    graph_mode: GraphMode,
}

impl ClusterWeighting {
    /// Returns the class count `K`.
    #[must_use]
    #[rustfmt::skip]
    pub fn class_count(&self) -> usize { self.class_count }

    /// Returns the alpha-hat hyperparameters.
    #[must_use]
    #[rustfmt::skip]
    pub fn params(&self) -> AlphaHatParams { self.params }

    /// Returns the per-cluster graph mode.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph_mode(&self) -> GraphMode { self.graph_mode }

    /// Computes per-cluster BER bounds and alpha-hat coefficients.
    ///
    /// # Errors
    /// Returns [`HpdivError::LabelCountMismatch`],
    /// [`HpdivError::MembershipLengthMismatch`], or
    /// [`HpdivError::LabelOutOfRange`] for misaligned or out-of-range
    /// inputs, and propagates any per-cluster graph or bound failure.
    #[instrument(
        name = "core.cluster_weighting",
        err,
        skip(self, points, labels, membership),
        fields(
            points = points.len(),
            classes = self.class_count,
            mode = self.graph_mode.as_str(),
        ),
    )]
    pub fn run(
        &self,
        points: &PointSet,
        labels: &LabelVector,
        membership: &[ClusterId],
    ) -> Result<ClusterWeightingReport> {
        let slices = split_into_clusters(points, labels, membership)?;
        labels.validate(self.class_count)?;

        // Planning logs on the calling thread; evaluation may run on workers.
        let plans: Vec<(&ClusterSlice<'_>, Option<GraphMode>)> = slices
            .iter()
            .map(|slice| (slice, self.plan(slice)))
            .collect();

        #[cfg(feature = "parallel")]
        let clusters = plans
            .par_iter()
            .map(|&(slice, mode)| self.evaluate(slice, mode))
            .collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "parallel"))]
        let clusters = plans
            .iter()
            .map(|&(slice, mode)| self.evaluate(slice, mode))
            .collect::<Result<Vec<_>>>()?;

        let rates: Vec<f64> = clusters.iter().map(|report| report.ber).collect();
        let sizes: Vec<usize> = clusters.iter().map(|report| report.size).collect();
        let alpha_hat = compute_alpha_hat(&self.params, self.class_count, &rates, &sizes)?;
        info!(clusters = clusters.len(), "cluster weighting complete");

        Ok(ClusterWeightingReport {
            clusters,
            alpha_hat,
        })
    }

    /// Picks the graph for one cluster; `None` when it is too small for one.
    fn plan(&self, slice: &ClusterSlice<'_>) -> Option<GraphMode> {
        let size = slice.len();
        let cluster = slice.cluster();
        if size < 2 {
            warn!(%cluster, size, "cluster too small for a graph, reporting zero bound");
            return None;
        }
        match self.graph_mode {
            GraphMode::NearestNeighbours { k } if k >= size => {
                warn!(%cluster, size, k, "k-NN neighbour count capped to cluster size");
                Some(GraphMode::NearestNeighbours { k: size - 1 })
            }
            mode => Some(mode),
        }
    }

    fn evaluate(&self, slice: &ClusterSlice<'_>, mode: Option<GraphMode>) -> Result<ClusterReport> {
        let size = slice.len();
        let cluster = slice.cluster();
        let Some(mode) = mode else {
            return Ok(ClusterReport {
                cluster,
                size,
                divergence: DivergenceMatrix::zeros(self.class_count),
                ber: 0.0,
            });
        };

        let graph = build_graph(slice.points(), mode)?;
        let divergence = cross_class_counts(&graph, slice.labels(), self.class_count)?;
        let ber = ber_lower_bound(&divergence, self.class_count)?;

        Ok(ClusterReport {
            cluster,
            size,
            divergence,
            ber,
        })
    }
}
