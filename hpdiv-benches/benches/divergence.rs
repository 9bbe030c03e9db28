//! Henze-Penrose divergence benchmarks.
//!
//! Compares the 1-NN and MST estimators on the same pair of shifted
//! Gaussian samples. Both build the full pairwise distance matrix, so the
//! difference isolates Prim's `O(N²)` pass against the neighbour scan.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use hpdiv_benches::{error::BenchSetupError, params::SampleBenchParams, source::TwoSampleFixture};
use hpdiv_core::{DivergenceMethod, estimate_divergence};

const SEED: u64 = 42;
const DIMENSION: usize = 8;
const POINT_COUNTS: &[usize] = &[100, 400, 1_000];

fn divergence_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("estimate_divergence");
    group.sample_size(20);

    for &point_count in POINT_COUNTS {
        let fixture = TwoSampleFixture::generate(point_count, DIMENSION, SEED)?;
        let params = SampleBenchParams {
            point_count,
            dimension: DIMENSION,
        };

        for method in [
            DivergenceMethod::OneNearestNeighbour,
            DivergenceMethod::MinimumSpanningTree,
        ] {
            group.bench_with_input(
                BenchmarkId::new(method.as_str(), &params),
                &fixture,
                |b, fixture| {
                    b.iter(|| estimate_divergence(&fixture.a, &fixture.b, method));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn divergence(c: &mut Criterion) {
    if let Err(err) = divergence_impl(c) {
        panic!("divergence benchmark setup failed: {err}");
    }
}

criterion_group!(benches, divergence);
criterion_main!(benches);
