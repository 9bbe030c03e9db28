//! Synthetic Gaussian fixtures for the benchmarks.
//!
//! Every fixture is drawn from seeded isotropic Gaussians, so repeated runs
//! measure identical inputs.

use hpdiv_core::{ClusterId, LabelVector, PointSet, Points};
use hpdiv_test_support::samples::{GaussianSpec, two_class_labels};

use crate::error::BenchSetupError;

/// Mean offset between the two classes, applied to the first two coordinates.
const CLASS_OFFSET: f32 = 1.0;

/// Spacing between cluster centres along the first coordinate.
const CLUSTER_SPACING: f32 = 50.0;

/// Two samples whose means differ by [`CLASS_OFFSET`] in two coordinates.
#[derive(Clone, Debug)]
pub struct TwoSampleFixture {
    /// Sample drawn around the origin.
    pub a: PointSet,
    /// Sample drawn around the shifted mean.
    pub b: PointSet,
}

impl TwoSampleFixture {
    /// Draws `point_count` points per sample in `dimension` coordinates.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::TooSmall`] when `point_count < 2` and
    /// [`BenchSetupError::Core`] when the engine rejects the rows.
    pub fn generate(point_count: usize, dimension: usize, seed: u64) -> Result<Self, BenchSetupError> {
        ensure_graphable("two-sample fixture", point_count)?;
        let base = GaussianSpec::standard(dimension);
        let shifted = base.clone().shifted(2, CLASS_OFFSET);
        Ok(Self {
            a: PointSet::try_from_rows(base.sample(point_count, seed))?,
            b: PointSet::try_from_rows(shifted.sample(point_count, seed.wrapping_add(1)))?,
        })
    }

    /// Stacks both samples into one labelled set, `a` labelled 0.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Core`] if stacking fails.
    pub fn labelled(&self) -> Result<(PointSet, LabelVector), BenchSetupError> {
        let points = PointSet::stack(&self.a, &self.b)?;
        let labels = LabelVector::new(two_class_labels(self.a.len(), self.b.len()));
        Ok((points, labels))
    }
}

/// Well separated clusters, each holding two overlapping classes.
#[derive(Clone, Debug)]
pub struct ClusteredFixture {
    /// All points, cluster by cluster.
    pub points: PointSet,
    /// Class label per point.
    pub labels: LabelVector,
    /// Cluster id per point.
    pub membership: Vec<ClusterId>,
}

impl ClusteredFixture {
    /// Draws `cluster_count` clusters of `per_class` points per class.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::TooSmall`] when a cluster would hold fewer
    /// than two points and [`BenchSetupError::Core`] when the engine rejects
    /// the rows.
    pub fn generate(
        cluster_count: usize,
        per_class: usize,
        dimension: usize,
        seed: u64,
    ) -> Result<Self, BenchSetupError> {
        ensure_graphable("clustered fixture", per_class.saturating_mul(2))?;
        let mut rows = Vec::with_capacity(cluster_count * per_class * 2);
        let mut labels = Vec::with_capacity(rows.capacity());
        let mut membership = Vec::with_capacity(rows.capacity());

        for (cluster, offset) in (0..cluster_count).zip((0_u16..).map(f32::from)) {
            let centre = GaussianSpec::standard(dimension).shifted(1, offset * CLUSTER_SPACING);
            let other = centre.clone().shifted(2, CLASS_OFFSET);
            let cluster_seed = seed.wrapping_add(2 * cluster as u64);
            rows.extend(centre.sample(per_class, cluster_seed));
            rows.extend(other.sample(per_class, cluster_seed.wrapping_add(1)));
            labels.extend(two_class_labels(per_class, per_class));
            membership.extend(std::iter::repeat_n(
                ClusterId::new(cluster as u64),
                per_class * 2,
            ));
        }

        Ok(Self {
            points: PointSet::try_from_rows(rows)?,
            labels: LabelVector::new(labels),
            membership,
        })
    }
}

fn ensure_graphable(context: &'static str, got: usize) -> Result<(), BenchSetupError> {
    if got < 2 {
        return Err(BenchSetupError::TooSmall { context, got });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn two_sample_fixture_is_deterministic() {
        let first = TwoSampleFixture::generate(16, 4, 3).expect("fixture must generate");
        let second = TwoSampleFixture::generate(16, 4, 3).expect("fixture must generate");
        assert_eq!(first.a, second.a);
        assert_eq!(first.b, second.b);
        assert_eq!(first.a.dimension(), 4);

        let (points, labels) = first.labelled().expect("stacking must succeed");
        assert_eq!(points.len(), 32);
        assert_eq!(labels.get(15), Some(0));
        assert_eq!(labels.get(16), Some(1));
    }

    #[rstest]
    fn clustered_fixture_assigns_every_point() {
        let fixture = ClusteredFixture::generate(3, 5, 2, 9).expect("fixture must generate");
        assert_eq!(fixture.points.len(), 30);
        assert_eq!(fixture.labels.len(), 30);
        assert_eq!(fixture.membership[29], ClusterId::new(2));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn rejects_ungraphable_sizes(#[case] point_count: usize) {
        let err = TwoSampleFixture::generate(point_count, 2, 1).expect_err("too small");
        assert!(matches!(err, BenchSetupError::TooSmall { got, .. } if got == point_count));
    }
}
