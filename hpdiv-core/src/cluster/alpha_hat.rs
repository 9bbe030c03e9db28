//! Per-cluster alpha-hat coefficients.
//!
//! For class count `K`, per-cluster BER estimates `R` and sizes `n` with
//! total `T`:
//!
//! ```text
//! dev[c]       = |R[c]·K/(K-1) - 1|
//! meanDev      = Σ dev[c]·n[c]/T
//! alpha_hat[i] = alpha + beta/2 · (meanDev - dev[i])
//! ```

use tracing::{instrument, warn};

use crate::error::{HpdivError, Result};

/// Hyperparameters of the alpha-hat shift.
///
/// # Examples
/// ```
/// use hpdiv_core::AlphaHatParams;
///
/// let params = AlphaHatParams::new(0.3, 0.1)?;
/// assert_eq!(params.alpha(), 0.3);
/// assert!(AlphaHatParams::new(f64::NAN, 0.1).is_err());
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaHatParams {
    alpha: f64,
    beta: f64,
}

impl Default for AlphaHatParams {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            beta: 0.05,
        }
    }
}

impl AlphaHatParams {
    /// Validates and stores `alpha` and `beta`.
    ///
    /// # Errors
    /// Returns [`HpdivError::NonFiniteParameter`] when either value is NaN or
    /// infinite.
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        for (name, value) in [("alpha", alpha), ("beta", beta)] {
            if !value.is_finite() {
                return Err(HpdivError::NonFiniteParameter { name, value });
            }
        }
        Ok(Self { alpha, beta })
    }

    /// Returns the base coefficient.
    #[must_use]
    #[rustfmt::skip]
    pub fn alpha(&self) -> f64 { self.alpha }

    /// Returns the deviation scale.
    #[must_use]
    #[rustfmt::skip]
    pub fn beta(&self) -> f64 { self.beta }
}

/// Computes one alpha-hat coefficient per cluster.
///
/// BER estimates outside `[0, 1]` are clamped into range with a `warn`
/// event; they are noisy finite-sample statistics, not caller errors.
///
/// # Errors
/// Returns [`HpdivError::EmptyClusterSet`] when no clusters are given,
/// [`HpdivError::ClusterLengthMismatch`] when `rates` and `sizes` differ in
/// length, [`HpdivError::InvalidClassCount`] when `class_count < 2`,
/// [`HpdivError::ZeroTotalSize`] when every size is zero, and
/// [`HpdivError::NonFiniteRate`] for a NaN or infinite BER estimate.
///
/// # Examples
/// ```
/// use hpdiv_core::{AlphaHatParams, compute_alpha_hat};
///
/// let params = AlphaHatParams::new(0.2, 0.05)?;
/// let single = compute_alpha_hat(&params, 2, &[0.37], &[120])?;
/// assert_eq!(single, vec![0.2]);
///
/// let pair = compute_alpha_hat(&params, 2, &[0.5, 0.0], &[1, 1])?;
/// assert!((pair[0] - 0.2125).abs() < 1e-12);
/// assert!((pair[1] - 0.1875).abs() < 1e-12);
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
#[instrument(
    name = "core.compute_alpha_hat",
    err,
    skip(params, rates, sizes),
    fields(clusters = rates.len(), classes = class_count),
)]
pub fn compute_alpha_hat(
    params: &AlphaHatParams,
    class_count: usize,
    rates: &[f64],
    sizes: &[usize],
) -> Result<Vec<f64>> {
    if rates.is_empty() || sizes.is_empty() {
        return Err(HpdivError::EmptyClusterSet);
    }
    if rates.len() != sizes.len() {
        return Err(HpdivError::ClusterLengthMismatch {
            rates: rates.len(),
            sizes: sizes.len(),
        });
    }
    if class_count < 2 {
        return Err(HpdivError::InvalidClassCount { got: class_count });
    }
    let total: usize = sizes.iter().sum();
    if total == 0 {
        return Err(HpdivError::ZeroTotalSize);
    }

    let k = class_count as f64;
    let scale = k / (k - 1.0);
    let deviations = rates
        .iter()
        .enumerate()
        .map(|(cluster, &rate)| {
            let rate = clamp_rate(cluster, rate)?;
            Ok((rate * scale - 1.0).abs())
        })
        .collect::<Result<Vec<f64>>>()?;

    let total = total as f64;
    let mean_deviation: f64 = deviations
        .iter()
        .zip(sizes)
        .map(|(deviation, &size)| deviation * (size as f64 / total))
        .sum();

    let half_beta = params.beta / 2.0;
    Ok(deviations
        .iter()
        .map(|deviation| params.alpha + half_beta * (mean_deviation - deviation))
        .collect())
}

fn clamp_rate(cluster: usize, rate: f64) -> Result<f64> {
    if !rate.is_finite() {
        return Err(HpdivError::NonFiniteRate {
            cluster,
            value: rate,
        });
    }
    let clamped = rate.clamp(0.0, 1.0);
    if clamped != rate {
        warn!(cluster, rate, clamped, "BER estimate outside [0, 1] clamped");
    }
    Ok(clamped)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn three_clusters_follow_the_weighted_mean() {
        let params = AlphaHatParams::new(1.0, 2.0).expect("finite");
        // K = 3, scale 1.5: dev = [1.0, 0.25, 0.0].
        let out = compute_alpha_hat(&params, 3, &[0.0, 0.5, 2.0 / 3.0], &[1, 2, 1])
            .expect("valid input");
        let mean = (1.0 + 0.25 * 2.0 + 0.0) / 4.0;
        let expected = [1.0 + (mean - 1.0), 1.0 + (mean - 0.25), 1.0 + mean];
        for (got, want) in out.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }

    #[rstest]
    fn out_of_range_rates_are_clamped() {
        let params = AlphaHatParams::default();
        let clamped = compute_alpha_hat(&params, 2, &[1.7, -0.2], &[3, 5]).expect("clamp");
        let bounded = compute_alpha_hat(&params, 2, &[1.0, 0.0], &[3, 5]).expect("valid");
        assert_eq!(clamped, bounded);
    }

    #[rstest]
    fn zero_sized_clusters_carry_no_weight() {
        let params = AlphaHatParams::default();
        let out = compute_alpha_hat(&params, 2, &[0.1, 0.4], &[0, 10]).expect("valid input");
        assert_eq!(out[1], params.alpha());
        assert!(out[0] < params.alpha());
    }

    #[rstest]
    #[case::empty(&[], &[], 2, HpdivError::EmptyClusterSet)]
    #[case::mismatch(&[0.1, 0.2], &[1], 2, HpdivError::ClusterLengthMismatch { rates: 2, sizes: 1 })]
    #[case::one_class(&[0.1], &[1], 1, HpdivError::InvalidClassCount { got: 1 })]
    #[case::zero_total(&[0.1, 0.2], &[0, 0], 2, HpdivError::ZeroTotalSize)]
    #[case::nan(&[0.1, f64::NAN], &[1, 1], 2, HpdivError::NonFiniteRate { cluster: 1, value: f64::NAN })]
    fn rejects_invalid_input(
        #[case] rates: &[f64],
        #[case] sizes: &[usize],
        #[case] class_count: usize,
        #[case] expected: HpdivError,
    ) {
        let err = compute_alpha_hat(&AlphaHatParams::default(), class_count, rates, sizes)
            .expect_err("input is invalid");
        assert_eq!(err.code(), expected.code());
    }

    #[rstest]
    #[case::alpha(f64::INFINITY, 0.1, "alpha")]
    #[case::beta(0.1, f64::NAN, "beta")]
    fn params_reject_non_finite_values(#[case] alpha: f64, #[case] beta: f64, #[case] name: &str) {
        let err = AlphaHatParams::new(alpha, beta).expect_err("non-finite parameter");
        assert!(matches!(err, HpdivError::NonFiniteParameter { name: got, .. } if got == name));
    }

    proptest! {
        #[test]
        fn single_cluster_returns_alpha_exactly(
            alpha in -10.0_f64..10.0,
            beta in -10.0_f64..10.0,
            rate in -1.0_f64..2.0,
            size in 1_usize..10_000,
            class_count in 2_usize..10,
        ) {
            let params = AlphaHatParams::new(alpha, beta).expect("finite");
            let out = compute_alpha_hat(&params, class_count, &[rate], &[size])
                .expect("valid input");
            prop_assert_eq!(out, vec![alpha]);
        }

        #[test]
        fn weighted_mean_shift_is_zero(
            rates in prop::collection::vec(0.0_f64..1.0, 1..12),
            seed_sizes in prop::collection::vec(1_usize..500, 12),
            beta in 0.01_f64..5.0,
        ) {
            let sizes = &seed_sizes[..rates.len()];
            let params = AlphaHatParams::new(0.0, beta).expect("finite");
            let out = compute_alpha_hat(&params, 2, &rates, sizes).expect("valid input");
            let total: usize = sizes.iter().sum();
            let weighted: f64 = out
                .iter()
                .zip(sizes)
                .map(|(value, &size)| value * size as f64 / total as f64)
                .sum();
            prop_assert!(weighted.abs() < 1e-9);
        }
    }
}
