//! Cross-class edge counting and the normalized divergence matrix.
//!
//! A single pass over the edge list accumulates, per unordered class pair,
//! the number of edges whose endpoints carry different labels. Same-class
//! edges are skipped, so the diagonal is zero by construction.

use tracing::instrument;

use crate::{
    error::{HpdivError, Result},
    graph::Graph,
    points::LabelVector,
};

/// Symmetric `K×K` matrix of normalized cross-class edge counts.
///
/// Entries are non-negative and finite, and the diagonal is exactly zero.
///
/// # Examples
/// ```
/// use hpdiv_core::DivergenceMatrix;
///
/// let matrix = DivergenceMatrix::try_from_rows(vec![
///     vec![0.0, 0.25],
///     vec![0.25, 0.0],
/// ])?;
/// assert_eq!(matrix.class_count(), 2);
/// assert_eq!(matrix.off_diagonal_sum(), 0.25);
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DivergenceMatrix {
    class_count: usize,
    values: Vec<f64>,
}

impl DivergenceMatrix {
    /// Returns an all-zero matrix over `class_count` classes.
    #[must_use]
    pub fn zeros(class_count: usize) -> Self {
        Self {
            class_count,
            values: vec![0.0; class_count * class_count],
        }
    }

    /// Validates caller-supplied rows, for example a cached matrix.
    ///
    /// # Errors
    /// Returns [`HpdivError::MatrixShape`] when a row's length differs from
    /// the number of rows, and [`HpdivError::InvalidMatrixEntry`] for an
    /// entry that is negative, non-finite, on a non-zero diagonal, or
    /// different from its mirror entry.
    pub fn try_from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let class_count = rows.len();
        for (row, entries) in rows.iter().enumerate() {
            if entries.len() != class_count {
                return Err(HpdivError::MatrixShape {
                    row,
                    expected: class_count,
                    columns: entries.len(),
                });
            }
        }

        for (row, entries) in rows.iter().enumerate() {
            for (column, &value) in entries.iter().enumerate() {
                let mirror = rows[column][row];
                let valid = value.is_finite()
                    && value >= 0.0
                    && (row != column || value == 0.0)
                    && value == mirror;
                if !valid {
                    return Err(HpdivError::InvalidMatrixEntry { row, column, value });
                }
            }
        }

        Ok(Self {
            class_count,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Returns the number of classes `K`.
    #[must_use]
    #[rustfmt::skip]
    pub fn class_count(&self) -> usize { self.class_count }

    /// Returns entry `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.class_count || j >= self.class_count {
            return None;
        }
        self.values.get(i * self.class_count + j).copied()
    }

    /// Returns row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.class_count {
            return None;
        }
        let start = i * self.class_count;
        self.values.get(start..start + self.class_count)
    }

    /// Iterates over the rows in class order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.class_count.max(1))
    }

    /// Returns `S`, the sum of entries over unordered pairs `i < j`.
    #[must_use]
    pub fn off_diagonal_sum(&self) -> f64 {
        self.rows()
            .enumerate()
            .flat_map(|(i, row)| row.iter().skip(i + 1))
            .sum()
    }
}

/// Raw per-pair cross-class edge counts, before normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CrossClassTally {
    class_count: usize,
    counts: Vec<usize>,
}

impl CrossClassTally {
    /// Counts edges per unordered class pair, storing them at `(min, max)`.
    pub(crate) fn count(graph: &Graph, labels: &LabelVector, class_count: usize) -> Result<Self> {
        if class_count < 2 {
            return Err(HpdivError::InvalidClassCount { got: class_count });
        }
        if labels.len() != graph.node_count() {
            return Err(HpdivError::LabelCountMismatch {
                points: graph.node_count(),
                labels: labels.len(),
            });
        }
        labels.validate(class_count)?;

        let label_of = |node: usize| {
            labels.get(node).ok_or(HpdivError::EdgeOutOfRange {
                node,
                labels: labels.len(),
            })
        };

        let mut counts = vec![0_usize; class_count * class_count];
        for edge in graph.edges() {
            let left = label_of(edge.source())?;
            let right = label_of(edge.target())?;
            if left == right {
                continue;
            }
            let (low, high) = if left < right { (left, right) } else { (right, left) };
            counts[low * class_count + high] += 1;
        }

        Ok(Self {
            class_count,
            counts,
        })
    }

    /// Total number of cross-class edges.
    pub(crate) fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Mirrors the upper triangle and divides every entry by `sample_count`.
    pub(crate) fn normalize(&self, sample_count: usize) -> DivergenceMatrix {
        let k = self.class_count;
        let scale = sample_count as f64;
        let mut values = vec![0.0; k * k];
        for low in 0..k {
            for high in (low + 1)..k {
                let value = self.counts[low * k + high] as f64 / scale;
                values[low * k + high] = value;
                values[high * k + low] = value;
            }
        }
        DivergenceMatrix {
            class_count: k,
            values,
        }
    }
}

/// Counts cross-class edges per class pair and normalizes by `N`.
///
/// Runs in `O(E + K²)` over the edge list. Each directed k-NN edge counts
/// once, so a mutual neighbour pair across classes contributes two.
///
/// # Errors
/// Returns [`HpdivError::InvalidClassCount`] when `class_count < 2`,
/// [`HpdivError::LabelCountMismatch`] when `labels` does not cover every
/// graph node, [`HpdivError::LabelOutOfRange`] for labels outside
/// `[0, class_count)`, and [`HpdivError::EdgeOutOfRange`] when an edge names
/// an unlabelled node.
///
/// # Examples
/// ```
/// use hpdiv_core::{GraphMode, LabelVector, PointSet, build_graph, cross_class_counts};
///
/// let points = PointSet::try_from_rows(vec![vec![0.0], vec![1.0], vec![5.0], vec![6.0]])?;
/// let graph = build_graph(&points, GraphMode::MinimumSpanningTree)?;
/// let labels = LabelVector::new(vec![0, 0, 1, 1]);
/// let matrix = cross_class_counts(&graph, &labels, 2)?;
/// assert_eq!(matrix.get(0, 1), Some(0.25));
/// assert_eq!(matrix.get(1, 1), Some(0.0));
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
#[instrument(
    name = "core.cross_class_counts",
    err,
    skip(graph, labels),
    fields(edges = graph.edges().len(), classes = class_count),
)]
pub fn cross_class_counts(
    graph: &Graph,
    labels: &LabelVector,
    class_count: usize,
) -> Result<DivergenceMatrix> {
    let tally = CrossClassTally::count(graph, labels, class_count)?;
    Ok(tally.normalize(labels.len()))
}
