//! Point-set strategies for graph properties.
//!
//! Coordinates are drawn from a small integer grid so that equal distances
//! are common and tie-breaking is exercised on almost every case.

use proptest::prelude::*;

use crate::PointSet;

const MIN_POINTS: usize = 2;
const MAX_POINTS: usize = 40;
const MAX_DIMENSION: usize = 4;

pub(super) fn grid_points() -> impl Strategy<Value = PointSet> {
    (1..=MAX_DIMENSION).prop_flat_map(|dimension| {
        prop::collection::vec(
            prop::collection::vec((-3_i8..=3).prop_map(f32::from), dimension),
            MIN_POINTS..=MAX_POINTS,
        )
        .prop_map(|rows| PointSet::try_from_rows(rows).expect("grid rows are valid"))
    })
}

pub(super) fn grid_points_with_k() -> impl Strategy<Value = (PointSet, usize)> {
    grid_points().prop_flat_map(|points| {
        let len = crate::Points::len(&points);
        (Just(points), 1..len)
    })
}
