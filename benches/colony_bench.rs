//! Criterion benchmarks for the colony variants.
//!
//! Uses cities on a circle so that the instance is cheap to build and the
//! optimum is known, measuring pure engine overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_antcolony::colony::{AntColonySystem, ColonyConfig, ElitistAntSystem, PheromoneStore};
use u_antcolony::tsp::{City, DistanceTable};
use u_numflow::random::create_rng;

// ===========================================================================
// Instance
// ===========================================================================

fn circle(n: usize) -> Vec<City> {
    (0..n)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / n as f64;
            City::new(i as i64, 100.0 * a.cos(), 100.0 * a.sin())
        })
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_acs_circle(c: &mut Criterion) {
    let mut group = c.benchmark_group("acs_circle");
    group.sample_size(10);

    for &n in &[20usize, 50, 100] {
        let cities = circle(n);
        let config = ColonyConfig::default()
            .with_num_ants(10)
            .with_iterations(20)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(cities, config), |b, (ci, co)| {
            b.iter(|| {
                let mut acs = AntColonySystem::new(black_box(ci), co.clone()).unwrap();
                black_box(acs.optimize().unwrap())
            })
        });
    }
    group.finish();
}

fn bench_eas_circle(c: &mut Criterion) {
    let mut group = c.benchmark_group("eas_circle");
    group.sample_size(10);

    for &n in &[20usize, 50, 100] {
        let cities = circle(n);
        let config = ColonyConfig::default()
            .with_num_ants(10)
            .with_iterations(20)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(cities, config), |b, (ci, co)| {
            b.iter(|| {
                let mut eas = ElitistAntSystem::new(black_box(ci), co.clone()).unwrap();
                black_box(eas.optimize().unwrap())
            })
        });
    }
    group.finish();
}

fn bench_weighted_choice(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighted_choice");

    for &n in &[100usize, 1000] {
        let distances = DistanceTable::build(&circle(n));
        let mut store = PheromoneStore::new(n, &ColonyConfig::default().with_beta(5.0));
        store.initialize_uniform(1e-4);
        let candidates: Vec<usize> = (1..n).collect();
        let mut rng = create_rng(42);
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                black_box(store.weighted_choice(0, black_box(&candidates), &distances, &mut rng))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_acs_circle, bench_eas_circle, bench_weighted_choice);
criterion_main!(benches);
