//! Criterion benchmarks for whole-coast stepping.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use littoral_bench::{reference_climate, reference_profile, stress_profile};
use littoral_engine::Coast;

fn bench_step_10k(c: &mut Criterion) {
    let climate = reference_climate(42).unwrap();
    let mut coast = Coast::new(reference_profile(42), climate).unwrap();

    // Warm up: the first step fills every node cache
    coast.step().unwrap();

    c.bench_function("step_10k", |b| {
        b.iter(|| {
            let report = coast.step().unwrap();
            black_box(&report);
        });
    });
}

fn bench_step_100k(c: &mut Criterion) {
    let climate = reference_climate(42).unwrap();
    let mut coast = Coast::new(stress_profile(42), climate).unwrap();

    coast.step().unwrap();

    c.bench_function("step_100k", |b| {
        b.iter(|| {
            let report = coast.step().unwrap();
            black_box(&report);
        });
    });
}

fn bench_100_steps_10k(c: &mut Criterion) {
    c.bench_function("100_steps_10k", |b| {
        b.iter(|| {
            let climate = reference_climate(42).unwrap();
            let mut coast = Coast::new(reference_profile(42), climate).unwrap();
            let occ = coast.update(100).unwrap();
            black_box(&occ);
        });
    });
}

criterion_group!(benches, bench_step_10k, bench_step_100k, bench_100_steps_10k);
criterion_main!(benches);
