//! Cluster partitioning and per-cluster weighting coefficients.

mod alpha_hat;

use std::collections::BTreeMap;
use std::fmt;

use tracing::instrument;

use crate::{
    error::{HpdivError, Result},
    points::{LabelVector, PointSet, PointView, Points},
};

pub use alpha_hat::{AlphaHatParams, compute_alpha_hat};

/// Identifier of a cluster in an externally supplied membership array.
///
/// # Examples
/// ```
/// use hpdiv_core::ClusterId;
///
/// let id = ClusterId::new(7);
/// assert_eq!(id.get(), 7);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl From<u64> for ClusterId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The points and labels belonging to one cluster.
///
/// Points are borrowed through a [`PointView`]; [`ClusterSlice::indices`]
/// gives the original position of each member in ascending order.
#[derive(Clone, Debug)]
pub struct ClusterSlice<'a> {
    cluster: ClusterId,
    points: PointView<'a>,
    labels: LabelVector,
}

impl<'a> ClusterSlice<'a> {
    /// Returns the cluster this slice belongs to.
    #[must_use]
    #[rustfmt::skip]
    pub fn cluster(&self) -> ClusterId { self.cluster }

    /// Returns the member points.
    #[must_use]
    #[rustfmt::skip]
    pub fn points(&self) -> &PointView<'a> { &self.points }

    /// Returns the member labels, aligned with [`Self::points`].
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &LabelVector { &self.labels }

    /// Returns the original indices of the members.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        self.points.indices()
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the slice has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Splits `points` and `labels` by cluster membership.
///
/// Returns one slice per distinct cluster id, in ascending id order. Every
/// point lands in exactly one slice, and members keep their original
/// relative order.
///
/// # Errors
/// Returns [`HpdivError::LabelCountMismatch`] when `labels` and `points`
/// differ in length and [`HpdivError::MembershipLengthMismatch`] when
/// `membership` does.
///
/// # Examples
/// ```
/// use hpdiv_core::{ClusterId, LabelVector, PointSet, split_into_clusters};
///
/// let points = PointSet::try_from_rows(vec![vec![0.0], vec![1.0], vec![2.0]])?;
/// let labels = LabelVector::new(vec![0, 1, 0]);
/// let membership = [ClusterId::new(4), ClusterId::new(2), ClusterId::new(4)];
/// let slices = split_into_clusters(&points, &labels, &membership)?;
/// assert_eq!(slices.len(), 2);
/// assert_eq!(slices[0].cluster(), ClusterId::new(2));
/// assert_eq!(slices[1].indices(), &[0, 2]);
/// assert_eq!(slices[1].labels().as_slice(), &[0, 0]);
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
#[instrument(
    name = "core.split_into_clusters",
    err,
    skip(points, labels, membership),
    fields(points = points.len()),
)]
pub fn split_into_clusters<'a>(
    points: &'a PointSet,
    labels: &LabelVector,
    membership: &[ClusterId],
) -> Result<Vec<ClusterSlice<'a>>> {
    if labels.len() != points.len() {
        return Err(HpdivError::LabelCountMismatch {
            points: points.len(),
            labels: labels.len(),
        });
    }
    if membership.len() != points.len() {
        return Err(HpdivError::MembershipLengthMismatch {
            points: points.len(),
            membership: membership.len(),
        });
    }

    let mut groups: BTreeMap<ClusterId, Vec<usize>> = BTreeMap::new();
    for (index, &cluster) in membership.iter().enumerate() {
        groups.entry(cluster).or_default().push(index);
    }

    Ok(groups
        .into_iter()
        .map(|(cluster, indices)| {
            let labels = indices
                .iter()
                .filter_map(|&index| labels.get(index))
                .collect();
            ClusterSlice {
                cluster,
                points: points.view(indices),
                labels,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn single_cluster_returns_everything() {
        let points =
            PointSet::try_from_rows(vec![vec![1.0], vec![2.0]]).expect("valid points");
        let labels = LabelVector::new(vec![1, 0]);
        let slices = split_into_clusters(&points, &labels, &[ClusterId::new(0); 2])
            .expect("split must succeed");
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].indices(), &[0, 1]);
        assert_eq!(slices[0].labels(), &labels);
        assert_eq!(slices[0].points().point(1), Some(&[2.0_f32][..]));
    }

    #[rstest]
    fn rejects_label_length_mismatch() {
        let points =
            PointSet::try_from_rows(vec![vec![1.0], vec![2.0]]).expect("valid points");
        let err = split_into_clusters(&points, &LabelVector::new(vec![0]), &[ClusterId::new(0); 2])
            .expect_err("labels are short");
        assert_eq!(err, HpdivError::LabelCountMismatch { points: 2, labels: 1 });
    }

    #[rstest]
    fn rejects_membership_length_mismatch() {
        let points =
            PointSet::try_from_rows(vec![vec![1.0], vec![2.0]]).expect("valid points");
        let err = split_into_clusters(&points, &LabelVector::new(vec![0, 0]), &[ClusterId::new(0)])
            .expect_err("membership is short");
        assert_eq!(
            err,
            HpdivError::MembershipLengthMismatch {
                points: 2,
                membership: 1
            }
        );
    }

    fn partitioned() -> impl Strategy<Value = (Vec<Vec<f32>>, Vec<usize>, Vec<u64>)> {
        (1_usize..40).prop_flat_map(|n| {
            (
                prop::collection::vec(prop::collection::vec(-5.0_f32..5.0, 3), n),
                prop::collection::vec(0_usize..4, n),
                prop::collection::vec(0_u64..6, n),
            )
        })
    }

    proptest! {
        #[test]
        fn slices_reassemble_the_original((rows, labels, membership) in partitioned()) {
            let points = PointSet::try_from_rows(rows.clone()).expect("rows are valid");
            let labels = LabelVector::new(labels);
            let membership: Vec<ClusterId> = membership.into_iter().map(ClusterId::new).collect();
            let slices = split_into_clusters(&points, &labels, &membership)
                .expect("split must succeed");

            let ids: Vec<ClusterId> = slices.iter().map(ClusterSlice::cluster).collect();
            prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

            let mut rebuilt: Vec<(usize, Vec<f32>, usize)> = Vec::with_capacity(rows.len());
            for slice in &slices {
                prop_assert_eq!(slice.len(), slice.labels().len());
                for (position, &index) in slice.indices().iter().enumerate() {
                    prop_assert_eq!(membership[index], slice.cluster());
                    let point = slice.points().point(position).expect("member exists");
                    let label = slice.labels().get(position).expect("label exists");
                    rebuilt.push((index, point.to_vec(), label));
                }
            }
            rebuilt.sort_by_key(|entry| entry.0);

            prop_assert_eq!(rebuilt.len(), rows.len());
            for (expected_index, (index, point, label)) in rebuilt.into_iter().enumerate() {
                prop_assert_eq!(index, expected_index);
                prop_assert_eq!(&point, &rows[index]);
                prop_assert_eq!(Some(label), labels.get(index));
            }
        }
    }
}
