use crate::error::{HpdivError, Result};

/// Computes the Euclidean distance between two vectors.
///
/// Squares are accumulated in `f64` before the final narrowing to `f32`.
///
/// # Examples
///
/// ```
/// use hpdiv_core::{HpdivError, euclidean_distance};
///
/// fn main() -> Result<(), HpdivError> {
///     let distance = euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0])?;
///     assert!((distance - 7.071_068).abs() < 1e-6);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`HpdivError::ZeroDimension`] when any input is empty.
/// - [`HpdivError::DimensionMismatch`] when input lengths differ.
/// - [`HpdivError::NonFiniteCoordinate`] when a value is NaN or infinite.
pub fn euclidean_distance(left: &[f32], right: &[f32]) -> Result<f32> {
    if left.is_empty() || right.is_empty() {
        return Err(HpdivError::ZeroDimension);
    }
    if left.len() != right.len() {
        return Err(HpdivError::DimensionMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    for (row, values) in [left, right].into_iter().enumerate() {
        if let Some(column) = values.iter().position(|value| !value.is_finite()) {
            return Err(HpdivError::NonFiniteCoordinate { row, column });
        }
    }

    Ok(unchecked_distance(left, right))
}

/// Distance between two already-validated rows of equal length.
pub(crate) fn unchecked_distance(left: &[f32], right: &[f32]) -> f32 {
    let mut sum = 0.0f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        let diff = f64::from(l) - f64::from(r);
        sum += diff * diff;
    }
    sum.sqrt() as f32
}
