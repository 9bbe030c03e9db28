//! Statistical regression tests for the two divergence estimators.

mod common;

use common::shifted_pair;
use hpdiv_core::{DivergenceMethod, estimate_divergence};
use rstest::rstest;

const SAMPLES: usize = 400;

#[rstest]
#[case(17)]
#[case(29)]
fn one_nn_and_mst_agree_on_shifted_gaussians(#[case] seed: u64) {
    let (a, b) = shifted_pair(SAMPLES, 1.0, seed);
    let mst = estimate_divergence(&a, &b, DivergenceMethod::MinimumSpanningTree)
        .expect("mst estimate");
    let one_nn = estimate_divergence(&a, &b, DivergenceMethod::OneNearestNeighbour)
        .expect("1nn estimate");

    for estimate in [mst, one_nn] {
        assert!(
            (0.1..0.5).contains(&estimate.value),
            "{} estimate {} outside band",
            estimate.method,
            estimate.value
        );
    }
    assert!(
        (mst.value - one_nn.value).abs() < 0.12,
        "mst {} vs 1nn {}",
        mst.value,
        one_nn.value
    );
}

#[rstest]
fn identical_distributions_give_near_zero_divergence() {
    let (a, b) = shifted_pair(SAMPLES, 0.0, 41);
    for method in [
        DivergenceMethod::MinimumSpanningTree,
        DivergenceMethod::OneNearestNeighbour,
    ] {
        let estimate = estimate_divergence(&a, &b, method).expect("estimate");
        assert!(estimate.value.abs() < 0.2, "{method}: {}", estimate.value);
    }
}

#[rstest]
fn wider_separation_raises_the_estimate() {
    let (near_a, near_b) = shifted_pair(200, 0.5, 5);
    let (far_a, far_b) = shifted_pair(200, 3.0, 5);
    let near = estimate_divergence(&near_a, &near_b, DivergenceMethod::MinimumSpanningTree)
        .expect("estimate");
    let far = estimate_divergence(&far_a, &far_b, DivergenceMethod::MinimumSpanningTree)
        .expect("estimate");
    assert!(far.value > near.value + 0.3, "near {} far {}", near.value, far.value);
}

#[rstest]
fn distant_clouds_are_fully_separated() {
    let (a, b) = shifted_pair(100, 50.0, 3);
    let mst = estimate_divergence(&a, &b, DivergenceMethod::MinimumSpanningTree)
        .expect("estimate");
    let one_nn = estimate_divergence(&a, &b, DivergenceMethod::OneNearestNeighbour)
        .expect("estimate");

    assert_eq!(mst.cross_count, 1);
    assert!((mst.value - (1.0 - 1.0 / 100.0)).abs() < 1e-12);
    assert_eq!(one_nn.cross_count, 0);
    assert_eq!(one_nn.value, 1.0);
}

#[rstest]
fn unequal_sample_sizes_use_both_counts() {
    let (a, _) = shifted_pair(60, 0.0, 8);
    let (_, b) = shifted_pair(90, 50.0, 9);
    let estimate = estimate_divergence(&a, &b, DivergenceMethod::MinimumSpanningTree)
        .expect("estimate");
    let expected = 1.0 - 150.0 / (2.0 * 60.0 * 90.0);
    assert!((estimate.value - expected).abs() < 1e-12);
}
