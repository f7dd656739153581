//! Criterion benchmarks for the simulation engine.
//!
//! Benchmarks cover:
//! - Full runs at increasing trial counts
//! - Horizon length scaling
//! - Aggregation-only cost (sorting, histogram, cumulative curve)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use riskcast_sim::stats::{cumulative_curve, histogram, percentile_sorted, sorted_copy};
use riskcast_sim::{SimRng, SimulationEngine, SimulationParameters, ValueRange};

fn params(num_simulations: usize, duration: usize) -> SimulationParameters {
    SimulationParameters {
        initial_investment: 40_000.0,
        duration,
        revenue_range: ValueRange::new(15_000.0, 30_000.0),
        cost_range: ValueRange::new(8_000.0, 15_000.0),
        discount_rate: 0.10,
        num_simulations,
    }
}

fn bench_trial_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_by_trials");
    let engine = SimulationEngine::default();

    for &n in &[1_000usize, 10_000, 100_000] {
        let p = params(n, 5);
        group.bench_with_input(BenchmarkId::from_parameter(n), &p, |b, p| {
            b.iter(|| {
                let mut rng = SimRng::from_seed(42);
                black_box(engine.run_with_rng(p, &mut rng).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_duration(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_by_duration");
    let engine = SimulationEngine::default();

    for &duration in &[1usize, 10, 50] {
        let p = params(10_000, duration);
        group.bench_with_input(BenchmarkId::from_parameter(duration), &p, |b, p| {
            b.iter(|| {
                let mut rng = SimRng::from_seed(42);
                black_box(engine.run_with_rng(p, &mut rng).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let mut rng = SimRng::from_seed(7);
    let samples: Vec<f64> = (0..100_000)
        .map(|_| rng.uniform_inclusive(-50_000.0, 50_000.0))
        .collect();

    c.bench_function("aggregate_100k", |b| {
        b.iter(|| {
            let sorted = sorted_copy(black_box(&samples));
            let lo = percentile_sorted(&sorted, 2.5);
            let hi = percentile_sorted(&sorted, 97.5);
            let bins = histogram(&samples, sorted[0], sorted[sorted.len() - 1], 30);
            let curve = cumulative_curve(&sorted, 100);
            black_box((lo, hi, bins, curve))
        })
    });
}

criterion_group!(benches, bench_trial_count, bench_duration, bench_aggregation);
criterion_main!(benches);
