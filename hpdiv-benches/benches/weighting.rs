//! Cluster weighting benchmarks.
//!
//! Runs the full per-cluster chain (split, graph, cross-class counts, BER
//! bound, alpha-hat) for growing numbers of clusters. With the `parallel`
//! feature the clusters are evaluated on the rayon pool.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use hpdiv_benches::{
    error::BenchSetupError, params::WeightingBenchParams, source::ClusteredFixture,
};
use hpdiv_core::ClusterWeightingBuilder;

const SEED: u64 = 1_234;
const DIMENSION: usize = 8;
const PER_CLASS: usize = 100;
const CLUSTER_COUNTS: &[usize] = &[1, 4, 16];

fn weighting_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("cluster_weighting");
    group.sample_size(10);

    let weighting = ClusterWeightingBuilder::new().with_class_count(2).build()?;

    for &cluster_count in CLUSTER_COUNTS {
        let fixture = ClusteredFixture::generate(cluster_count, PER_CLASS, DIMENSION, SEED)?;
        let params = WeightingBenchParams {
            cluster_count,
            per_class: PER_CLASS,
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &fixture,
            |b, fixture| {
                b.iter(|| weighting.run(&fixture.points, &fixture.labels, &fixture.membership));
            },
        );
    }

    group.finish();
    Ok(())
}

fn cluster_weighting(c: &mut Criterion) {
    if let Err(err) = weighting_impl(c) {
        panic!("cluster weighting benchmark setup failed: {err}");
    }
}

criterion_group!(benches, cluster_weighting);
criterion_main!(benches);
