//! Benchmarks for report assembly
//!
//! The safe-ascent scan dominates: up to ~60 pressure/oxygen evaluations per
//! report.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ehsguard_core::{assess, find_safe_altitude_limit, heat_index, EnvironmentalReading, HealthProfile};

fn bench_calculators(c: &mut Criterion) {
    c.bench_function("heat_index", |b| {
        b.iter(|| heat_index(black_box(Some(33.0)), black_box(Some(80.0))))
    });

    c.bench_function("safe_altitude_full_scan", |b| {
        b.iter(|| find_safe_altitude_limit(black_box(Some(0.0)), black_box(0.0)))
    });
}

fn bench_assessment(c: &mut Criterion) {
    let reading = EnvironmentalReading::new()
        .with_temperature(29.0)
        .with_humidity(60.0)
        .with_pressure(1013.25)
        .with_noise(92.0, 90.0);
    let profile = HealthProfile::new(Some(64)).with_condition("asthma");

    c.bench_function("assess_anonymous", |b| {
        b.iter(|| assess(black_box(&reading), None))
    });

    c.bench_function("assess_with_profile", |b| {
        b.iter(|| assess(black_box(&reading), Some(black_box(&profile))))
    });
}

criterion_group!(benches, bench_calculators, bench_assessment);
criterion_main!(benches);
