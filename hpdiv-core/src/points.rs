//! Point and label containers consumed by every engine operation.

use crate::error::{HpdivError, Result};

/// Read access to an ordered collection of equal-length points.
///
/// Implemented by the owning [`PointSet`] and by borrowed [`PointView`]s, so
/// graph construction runs on cluster slices without copying coordinates.
///
/// # Examples
/// ```
/// use hpdiv_core::{PointSet, Points};
///
/// let points = PointSet::try_from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]])?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.dimension(), 2);
/// assert_eq!(points.point(1), Some(&[2.0_f32, 3.0][..]));
/// # Ok::<(), hpdiv_core::HpdivError>(())
/// ```
pub trait Points {
    /// Returns the number of points.
    fn len(&self) -> usize;

    /// Returns the shared dimension of every point.
    fn dimension(&self) -> usize;

    /// Returns the coordinates of point `index`, if present.
    fn point(&self, index: usize) -> Option<&[f32]>;

    /// Returns whether the collection holds no points.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned, validated, row-major point storage.
///
/// Construction rejects empty input, zero-dimensional rows, ragged rows, and
/// non-finite coordinates. The set is immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    rows: usize,
    dimension: usize,
    values: Vec<f32>,
}

impl PointSet {
    /// Builds a point set from one vector per point.
    ///
    /// # Errors
    /// Returns [`HpdivError::EmptyPointSet`] when `rows` is empty,
    /// [`HpdivError::ZeroDimension`] when the first row is empty,
    /// [`HpdivError::RaggedRow`] when a row's length differs from the first,
    /// and [`HpdivError::NonFiniteCoordinate`] for NaN or infinite values.
    ///
    /// # Examples
    /// ```
    /// use hpdiv_core::{HpdivError, PointSet};
    ///
    /// let err = PointSet::try_from_rows(vec![vec![0.0], vec![1.0, 2.0]]);
    /// assert!(matches!(err, Err(HpdivError::RaggedRow { row: 1, .. })));
    /// ```
    pub fn try_from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(HpdivError::EmptyPointSet);
        };
        let dimension = first.len();
        if dimension == 0 {
            return Err(HpdivError::ZeroDimension);
        }

        let mut values = Vec::with_capacity(rows.len().saturating_mul(dimension));
        for (row, coordinates) in rows.iter().enumerate() {
            if coordinates.len() != dimension {
                return Err(HpdivError::RaggedRow {
                    row,
                    expected: dimension,
                    found: coordinates.len(),
                });
            }
            values.extend_from_slice(coordinates);
        }

        Self::try_from_row_major(dimension, values)
    }

    /// Builds a point set from a contiguous row-major buffer.
    ///
    /// # Errors
    /// Returns [`HpdivError::ZeroDimension`] when `dimension == 0`,
    /// [`HpdivError::EmptyPointSet`] when `values` is empty,
    /// [`HpdivError::BufferShape`] when `values.len()` is not a multiple of
    /// `dimension`, and [`HpdivError::NonFiniteCoordinate`] for NaN or
    /// infinite values.
    pub fn try_from_row_major(dimension: usize, values: Vec<f32>) -> Result<Self> {
        if dimension == 0 {
            return Err(HpdivError::ZeroDimension);
        }
        if values.is_empty() {
            return Err(HpdivError::EmptyPointSet);
        }
        if values.len() % dimension != 0 {
            return Err(HpdivError::BufferShape {
                values: values.len(),
                dimension,
            });
        }
        if let Some(position) = values.iter().position(|value| !value.is_finite()) {
            return Err(HpdivError::NonFiniteCoordinate {
                row: position / dimension,
                column: position % dimension,
            });
        }

        Ok(Self {
            rows: values.len() / dimension,
            dimension,
            values,
        })
    }

    /// Pools two point sets, `first` rows before `second` rows.
    ///
    /// # Errors
    /// Returns [`HpdivError::DimensionMismatch`] when the sets disagree on
    /// dimension.
    ///
    /// # Examples
    /// ```
    /// use hpdiv_core::{PointSet, Points};
    ///
    /// let a = PointSet::try_from_rows(vec![vec![0.0]])?;
    /// let b = PointSet::try_from_rows(vec![vec![1.0], vec![2.0]])?;
    /// let pooled = PointSet::stack(&a, &b)?;
    /// assert_eq!(pooled.len(), 3);
    /// assert_eq!(pooled.point(2), Some(&[2.0_f32][..]));
    /// # Ok::<(), hpdiv_core::HpdivError>(())
    /// ```
    pub fn stack(first: &Self, second: &Self) -> Result<Self> {
        if first.dimension != second.dimension {
            return Err(HpdivError::DimensionMismatch {
                left: first.dimension,
                right: second.dimension,
            });
        }
        let mut values = Vec::with_capacity(first.values.len() + second.values.len());
        values.extend_from_slice(&first.values);
        values.extend_from_slice(&second.values);
        Ok(Self {
            rows: first.rows + second.rows,
            dimension: first.dimension,
            values,
        })
    }

    /// Returns the underlying row-major buffer.
    #[must_use]
    pub fn as_row_major(&self) -> &[f32] {
        &self.values
    }

    /// Borrows the points at `indices`, in the given order.
    ///
    /// Indices are not checked here; out-of-range entries read as missing
    /// points through [`Points::point`].
    #[must_use]
    pub fn view(&self, indices: Vec<usize>) -> PointView<'_> {
        PointView {
            source: self,
            indices,
        }
    }
}

impl Points for PointSet {
    fn len(&self) -> usize {
        self.rows
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn point(&self, index: usize) -> Option<&[f32]> {
        if index >= self.rows {
            return None;
        }
        let start = index.checked_mul(self.dimension)?;
        let end = start.checked_add(self.dimension)?;
        self.values.get(start..end)
    }
}

/// Borrowed, index-restricted view over a [`PointSet`].
#[derive(Clone, Debug)]
pub struct PointView<'a> {
    source: &'a PointSet,
    indices: Vec<usize>,
}

impl<'a> PointView<'a> {
    /// Returns the indices into the source set, in view order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the point set this view borrows from.
    #[must_use]
    pub fn source(&self) -> &'a PointSet {
        self.source
    }

    /// Copies the viewed points into a new [`PointSet`].
    ///
    /// # Errors
    /// Returns [`HpdivError::EmptyPointSet`] when the view is empty.
    pub fn to_point_set(&self) -> Result<PointSet> {
        let mut values = Vec::with_capacity(self.indices.len() * self.source.dimension);
        for &index in &self.indices {
            if let Some(point) = self.source.point(index) {
                values.extend_from_slice(point);
            }
        }
        PointSet::try_from_row_major(self.source.dimension, values)
    }
}

impl Points for PointView<'_> {
    fn len(&self) -> usize {
        self.indices.len()
    }

    fn dimension(&self) -> usize {
        self.source.dimension
    }

    fn point(&self, index: usize) -> Option<&[f32]> {
        let source_index = *self.indices.get(index)?;
        self.source.point(source_index)
    }
}

/// Class labels aligned by index with a point collection.
///
/// # Examples
/// ```
/// use hpdiv_core::LabelVector;
///
/// let labels = LabelVector::new(vec![0, 1, 1]);
/// assert_eq!(labels.len(), 3);
/// assert_eq!(labels.get(2), Some(1));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelVector(Vec<usize>);

impl LabelVector {
    /// Wraps the given labels.
    #[must_use]
    pub fn new(labels: Vec<usize>) -> Self {
        Self(labels)
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the label at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<usize> {
        self.0.get(index).copied()
    }

    /// Returns the labels as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Checks that every label lies in `[0, class_count)`.
    ///
    /// # Errors
    /// Returns [`HpdivError::LabelOutOfRange`] for the first offending label.
    pub fn validate(&self, class_count: usize) -> Result<()> {
        match self
            .0
            .iter()
            .enumerate()
            .find(|&(_, &label)| label >= class_count)
        {
            Some((index, &label)) => Err(HpdivError::LabelOutOfRange {
                index,
                label,
                class_count,
            }),
            None => Ok(()),
        }
    }
}

impl From<Vec<usize>> for LabelVector {
    fn from(labels: Vec<usize>) -> Self {
        Self::new(labels)
    }
}

impl FromIterator<usize> for LabelVector {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn rejects_empty_rows() {
        assert_eq!(
            PointSet::try_from_rows(Vec::new()),
            Err(HpdivError::EmptyPointSet)
        );
    }

    #[rstest]
    fn rejects_zero_dimension() {
        assert_eq!(
            PointSet::try_from_rows(vec![Vec::new()]),
            Err(HpdivError::ZeroDimension)
        );
    }

    #[rstest]
    #[case::nan(f32::NAN)]
    #[case::infinite(f32::INFINITY)]
    fn rejects_non_finite_coordinates(#[case] value: f32) {
        let err = PointSet::try_from_rows(vec![vec![0.0, 0.0], vec![1.0, value]])
            .expect_err("non-finite coordinate must be rejected");
        assert_eq!(err, HpdivError::NonFiniteCoordinate { row: 1, column: 1 });
    }

    #[rstest]
    fn rejects_uneven_buffer() {
        let err = PointSet::try_from_row_major(2, vec![0.0, 1.0, 2.0])
            .expect_err("buffer must divide into rows");
        assert_eq!(
            err,
            HpdivError::BufferShape {
                values: 3,
                dimension: 2
            }
        );
    }

    #[rstest]
    fn stack_rejects_dimension_mismatch() {
        let a = PointSet::try_from_rows(vec![vec![0.0]]).expect("valid set");
        let b = PointSet::try_from_rows(vec![vec![0.0, 1.0]]).expect("valid set");
        assert_eq!(
            PointSet::stack(&a, &b),
            Err(HpdivError::DimensionMismatch { left: 1, right: 2 })
        );
    }

    #[rstest]
    fn view_reads_through_indices() {
        let set = PointSet::try_from_rows(vec![vec![0.0], vec![1.0], vec![2.0]])
            .expect("valid set");
        let view = set.view(vec![2, 0]);
        assert_eq!(view.len(), 2);
        assert_eq!(view.point(0), Some(&[2.0_f32][..]));
        assert_eq!(view.point(1), Some(&[0.0_f32][..]));
        assert_eq!(view.point(2), None);
        let copied = view.to_point_set().expect("view is non-empty");
        assert_eq!(copied.as_row_major(), &[2.0, 0.0]);
    }

    #[rstest]
    fn validate_reports_first_out_of_range_label() {
        let labels = LabelVector::new(vec![0, 3, 5]);
        assert_eq!(
            labels.validate(3),
            Err(HpdivError::LabelOutOfRange {
                index: 1,
                label: 3,
                class_count: 3
            })
        );
        assert_eq!(labels.validate(6), Ok(()));
    }
}
