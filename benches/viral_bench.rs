//! Criterion benchmarks for u-viral.
//!
//! Uses cities evenly spaced on a circle, so the optimum is known
//! and instance generation costs nothing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_viral::random::create_rng;
use u_viral::viral::operators::tail_swap_crossover;
use u_viral::{Chromosome, EdgeListGraph, ViralConfig, ViralRunner, VirusFragment};

fn circle(n: usize) -> EdgeListGraph {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let t = i as f64 * std::f64::consts::TAU / n as f64;
            (t.cos() * 100.0, t.sin() * 100.0)
        })
        .collect();
    EdgeListGraph::from_coordinates(&points)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_viral_circle(c: &mut Criterion) {
    let mut group = c.benchmark_group("viral_circle");
    group.sample_size(10);

    for (n, pop, gen) in [(16usize, 100usize, 50usize), (50, 200, 30), (100, 200, 20)] {
        let graph = circle(n);
        let config = ViralConfig {
            population_size: pop,
            max_population: pop * 4,
            virus_population_size: pop / 8,
            max_generations: gen,
            seed: Some(42),
            ..ViralConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", n, pop, gen), n),
            &(graph, config),
            |b, (g, c)| {
                b.iter(|| {
                    let result = ViralRunner::run(black_box(g), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_infect(c: &mut Criterion) {
    let mut group = c.benchmark_group("infect");

    for &n in &[50usize, 200, 1000] {
        let graph = circle(n);
        let route: Vec<usize> = (1..=n).rev().collect();
        let fragment: Vec<usize> = (1..=n / 8).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut rng = create_rng(42);
            let mut virus = VirusFragment::new(fragment.clone());
            b.iter(|| {
                let mut chromosome = Chromosome::new(route.clone(), &graph).unwrap();
                let outcome = virus.infect(&mut chromosome, &graph, &mut rng).unwrap();
                black_box(outcome)
            })
        });
    }
    group.finish();
}

fn bench_tail_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("tail_swap");

    for &n in &[50usize, 1000] {
        let p1: Vec<usize> = (1..=n).collect();
        let p2: Vec<usize> = (1..=n).rev().collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut rng = create_rng(42);
            b.iter(|| black_box(tail_swap_crossover(&p1, &p2, &mut rng)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_viral_circle, bench_infect, bench_tail_swap);
criterion_main!(benches);
