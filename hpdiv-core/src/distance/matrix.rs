//! Full pairwise Euclidean distance matrix.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use crate::{
    error::{HpdivError, Result},
    points::Points,
};

use super::euclidean::unchecked_distance;

/// Symmetric `N×N` matrix of Euclidean distances with a zero diagonal.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f32>,
}

impl DistanceMatrix {
    /// Returns the number of points the matrix covers.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.size }

    /// Returns whether the matrix covers no points.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.size == 0 }

    /// Returns the distance between points `i` and `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if j >= self.size {
            return None;
        }
        self.row(i)?.get(j).copied()
    }

    /// Returns all distances from point `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.size {
            return None;
        }
        let start = i * self.size;
        self.values.get(start..start + self.size)
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.size.max(1))
    }
}

/// Computes the full pairwise Euclidean distance matrix.
///
/// This is `O(N²·D)` and dominates the cost of every graph built from it.
///
/// # Errors
/// Returns [`HpdivError::MissingPoint`] when `points` fails to yield an
/// in-bounds point and [`HpdivError::NonFiniteDistance`] when a distance
/// overflows `f32`.
///
/// # Examples
/// ```
/// use hpdiv_core::{PointSet, pairwise_distances};
///
/// let points = PointSet::try_from_rows(vec![vec![0.0, 0.0], vec![3.0, 4.0]])?;
/// let matrix = pairwise_distances(&points)?;
/// assert_eq!(matrix.get(0, 1), Some(5.0));
/// assert_eq!(matrix.get(1, 1), Some(0.0));
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
#[instrument(
    name = "core.pairwise_distances",
    err,
    skip(points),
    fields(points = points.len(), dimension = points.dimension()),
)]
pub fn pairwise_distances<P>(points: &P) -> Result<DistanceMatrix>
where
    P: Points + Sync + ?Sized,
{
    let size = points.len();
    let rows = collect_rows(points)?;
    let mut values = vec![0.0_f32; size * size];
    if size == 0 {
        return Ok(DistanceMatrix { size, values });
    }

    let fill = |(i, out): (usize, &mut [f32])| {
        let left = rows[i];
        for (j, slot) in out.iter_mut().enumerate() {
            if i != j {
                *slot = unchecked_distance(left, rows[j]);
            }
        }
    };

    #[cfg(feature = "parallel")]
    values.par_chunks_mut(size).enumerate().for_each(fill);
    #[cfg(not(feature = "parallel"))]
    values.chunks_mut(size).enumerate().for_each(fill);

    if let Some(position) = values.iter().position(|value| !value.is_finite()) {
        return Err(HpdivError::NonFiniteDistance {
            left: position / size,
            right: position % size,
        });
    }

    Ok(DistanceMatrix { size, values })
}

pub(crate) fn collect_rows<P>(points: &P) -> Result<Vec<&[f32]>>
where
    P: Points + ?Sized,
{
    let len = points.len();
    (0..len)
        .map(|index| {
            points
                .point(index)
                .ok_or(HpdivError::MissingPoint { index, len })
        })
        .collect()
}
