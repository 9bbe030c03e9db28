//! Deterministic Gaussian samples.
//!
//! Samples are drawn with a seeded [`SmallRng`] and a Box–Muller transform,
//! so a seed always yields the same rows on every platform the `rand`
//! stream is stable on.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Isotropic Gaussian with unit variance around `mean`.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianSpec {
    mean: Vec<f32>,
}

impl GaussianSpec {
    /// Centres the distribution at the origin of `dimension` coordinates.
    #[must_use]
    pub fn standard(dimension: usize) -> Self {
        Self {
            mean: vec![0.0; dimension],
        }
    }

    /// Centres the distribution at `mean`.
    #[must_use]
    pub fn centred_at(mean: Vec<f32>) -> Self {
        Self { mean }
    }

    /// Shifts the first `coordinates` mean components by `offset`.
    #[must_use]
    pub fn shifted(mut self, coordinates: usize, offset: f32) -> Self {
        for value in self.mean.iter_mut().take(coordinates) {
            *value += offset;
        }
        self
    }

    /// Returns the distribution mean.
    #[must_use]
    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    /// Draws `count` rows from the distribution with the given seed.
    ///
    /// # Examples
    /// ```
    /// use hpdiv_test_support::samples::GaussianSpec;
    ///
    /// let spec = GaussianSpec::standard(3).shifted(1, 10.0);
    /// let rows = spec.sample(4, 7);
    /// assert_eq!(rows.len(), 4);
    /// assert!(rows.iter().all(|row| row.len() == 3));
    /// assert_eq!(rows, spec.sample(4, 7));
    /// ```
    #[must_use]
    pub fn sample(&self, count: usize, seed: u64) -> Vec<Vec<f32>> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                self.mean
                    .iter()
                    .map(|&centre| centre + standard_normal(&mut rng) as f32)
                    .collect()
            })
            .collect()
    }
}

/// Draws one standard-normal value with the Box–Muller transform.
pub fn standard_normal(rng: &mut SmallRng) -> f64 {
    let u1 = rng.gen_range(f64::EPSILON..1.0);
    let u2 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Labels the first `first` rows `0` and the next `second` rows `1`.
#[must_use]
pub fn two_class_labels(first: usize, second: usize) -> Vec<usize> {
    std::iter::repeat_n(0, first)
        .chain(std::iter::repeat_n(1, second))
        .collect()
}
