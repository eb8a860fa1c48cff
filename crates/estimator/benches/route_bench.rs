//! Criterion benchmarks for the route comparator.
//!
//! Benchmarks:
//!   - compare_routes over every mode at short / medium / long distances
//!   - full lookup through the mock distance provider
//!
//! Run with: cargo bench -p estimator --bench route_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use estimator::config::MockDistanceConfig;
use estimator::routes::{compare_routes, lookup_and_compare, MockDistanceProvider, RouteMode};

// ---------------------------------------------------------------------------
// Benchmark: compare_routes
// ---------------------------------------------------------------------------

fn bench_compare_routes(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_routes");
    group.sample_size(1000);
    for km in [1.5_f64, 12.0, 100.0] {
        group.bench_with_input(BenchmarkId::from_parameter(km), &km, |b, &km| {
            b.iter(|| black_box(compare_routes(black_box(km), &RouteMode::ALL)));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: lookup through the mock provider
// ---------------------------------------------------------------------------

fn bench_mock_lookup(c: &mut Criterion) {
    let provider = MockDistanceProvider::new(&MockDistanceConfig::default());
    c.bench_function("mock_lookup_and_compare", |b| {
        b.iter(|| {
            black_box(futures_lite::future::block_on(lookup_and_compare(
                &provider,
                black_box("Home"),
                black_box("Office"),
                &RouteMode::ALL,
            )))
        });
    });
}

criterion_group!(benches, bench_compare_routes, bench_mock_lookup);
criterion_main!(benches);
