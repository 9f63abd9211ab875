//! Benchmarks for Buoydash series reductions
//!
//! Run with: cargo bench

use buoydash::series::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn create_test_samples(count: usize) -> Vec<Sample> {
    (0..count)
        .map(|i| {
            if i % 7 == 0 {
                None
            } else {
                Some(12.0 + (i as f64 * 0.1).sin())
            }
        })
        .collect()
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    for size in [337, 3370, 33700] {
        let samples = create_test_samples(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("mean_{}", size), |b| {
            b.iter(|| compute_mean(black_box(&samples)))
        });

        group.bench_function(format!("latest_{}", size), |b| {
            b.iter(|| find_latest_valid(black_box(&samples)))
        });
    }

    group.finish();
}

fn bench_trend(c: &mut Criterion) {
    let mut group = c.benchmark_group("trend");

    for size in [337, 3370] {
        let samples = create_test_samples(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("slope_{}", size), |b| {
            b.iter(|| trend_slope(black_box(&samples)))
        });

        group.bench_function(format!("rolling_hamming_{}", size), |b| {
            b.iter(|| rolling_mean(black_box(&samples), 6, WindowKind::Hamming, true, 6))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reduce, bench_trend);
criterion_main!(benches);
