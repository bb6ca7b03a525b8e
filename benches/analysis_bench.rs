//! Benchmarks for the full analysis pipeline
//!
//! Measures `analyze` over batch sizes typical of one shift up to a month of
//! inspection data, for individuals and subgrouped charts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use spc_stats::{analyze, AnalysisConfig, AnalysisRequest, Analyzer, MeasurementRecord, SubgroupSize};

fn make_request(n: usize, subgroup: usize, seed: u64) -> AnalysisRequest {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(10.02, 0.01).unwrap();
    let records = (0..n)
        .map(|i| {
            // Half the records carry text fields, as exported by the gauge station
            let value = normal.sample(&mut rng);
            if i % 2 == 0 {
                MeasurementRecord::new(1, value, 10.0, 10.05)
            } else {
                MeasurementRecord::new(2, format!("{value:.4}"), "10.0", "10.05")
            }
        })
        .collect();
    AnalysisRequest::new(records, SubgroupSize::new(subgroup).unwrap())
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for &n in &[50usize, 500, 5_000, 50_000] {
        for &subgroup in &[1usize, 5] {
            let request = make_request(n, subgroup, 42);
            group.throughput(Throughput::Elements(n as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("n{subgroup}"), n),
                &request,
                |b, request| b.iter(|| analyze(black_box(request))),
            );
        }
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_batch");
    let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();

    let requests: Vec<AnalysisRequest> = (0..32).map(|seed| make_request(1_000, 5, seed)).collect();
    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("32x1000", |b| {
        b.iter(|| analyzer.analyze_batch(black_box(&requests)))
    });

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_batch);
criterion_main!(benches);
