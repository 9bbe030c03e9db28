//! Lower bound on the multi-class Bayes error rate.

use tracing::{debug, instrument};

use crate::{
    cross_class::DivergenceMatrix,
    error::{HpdivError, Result},
};

/// Computes the BER lower bound from a `K×K` divergence matrix.
///
/// With `S` the sum of the entries over pairs `i < j`:
///
/// ```text
/// lb = (K-1)/K · sqrt(1 - (1 - 2·K/(K-1)·S))
/// ```
///
/// The radicand is evaluated in this unsimplified form and clamped into
/// `[0, 1]`, so the result always lies in `[0, (K-1)/K]`. A clamp is a
/// numeric adjustment, not a failure; it is reported as a `debug` event.
///
/// # Errors
/// Returns [`HpdivError::InvalidClassCount`] when `class_count < 2`,
/// [`HpdivError::ClassCountMismatch`] when the matrix covers a different
/// number of classes, and [`HpdivError::NonFiniteStatistic`] when `S` is
/// not finite.
///
/// # Examples
/// ```
/// use hpdiv_core::{DivergenceMatrix, ber_lower_bound};
///
/// let separated = DivergenceMatrix::zeros(3);
/// assert_eq!(ber_lower_bound(&separated, 3)?, 0.0);
///
/// let mixed = DivergenceMatrix::try_from_rows(vec![vec![0.0, 0.25], vec![0.25, 0.0]])?;
/// assert_eq!(ber_lower_bound(&mixed, 2)?, 0.5);
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
#[instrument(
    name = "core.ber_lower_bound",
    err,
    skip(matrix),
    fields(classes = class_count),
)]
pub fn ber_lower_bound(matrix: &DivergenceMatrix, class_count: usize) -> Result<f64> {
    if class_count < 2 {
        return Err(HpdivError::InvalidClassCount { got: class_count });
    }
    if matrix.class_count() != class_count {
        return Err(HpdivError::ClassCountMismatch {
            matrix: matrix.class_count(),
            class_count,
        });
    }

    let sum = matrix.off_diagonal_sum();
    if !sum.is_finite() {
        return Err(HpdivError::NonFiniteStatistic {
            quantity: "cross-class sum",
            value: sum,
        });
    }

    let k = class_count as f64;
    let scale = k / (k - 1.0);
    let radicand = 1.0 - (1.0 - 2.0 * scale * sum);
    let clamped = radicand.clamp(0.0, 1.0);
    if clamped != radicand {
        debug!(radicand, clamped, sum, "BER radicand clamped");
    }

    Ok((k - 1.0) / k * clamped.sqrt())
}
