//! Helpers shared by the integration suites.

use hpdiv_core::PointSet;
use hpdiv_test_support::samples::GaussianSpec;

pub const DIMENSION: usize = 8;

/// Draws `count` points from `spec` and wraps them in a [`PointSet`].
pub fn gaussian_points(spec: &GaussianSpec, count: usize, seed: u64) -> PointSet {
    PointSet::try_from_rows(spec.sample(count, seed)).expect("gaussian rows are valid")
}

/// Standard 8-D Gaussian and a copy shifted by `offset` in two coordinates.
pub fn shifted_pair(count: usize, offset: f32, seed: u64) -> (PointSet, PointSet) {
    let base = GaussianSpec::standard(DIMENSION);
    let shifted = GaussianSpec::standard(DIMENSION).shifted(2, offset);
    (
        gaussian_points(&base, count, seed),
        gaussian_points(&shifted, count, seed.wrapping_add(1)),
    )
}
