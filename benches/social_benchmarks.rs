use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use socialgraph::algo::{build_view_from_graph, friends_of_friends, influential_followers};
use socialgraph::{GeneratorConfig, GraphGenerator, SocialGraph};

fn graph(population: usize) -> SocialGraph {
    GraphGenerator::new(GeneratorConfig {
        population_size: population,
        ..GeneratorConfig::default()
    })
    .generate()
    .unwrap()
}

/// Benchmark full graph generation (names, resumes, follows)
fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_graph");
    group.sample_size(10);

    for size in [1_000, 10_000].iter() {
        let config = GeneratorConfig {
            population_size: *size,
            ..GeneratorConfig::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(size), &config, |b, config| {
            let generator = GraphGenerator::new(config.clone());
            b.iter(|| generator.generate().unwrap());
        });
    }
    group.finish();
}

/// Benchmark friends-of-friends over every user
fn bench_friends_of_friends(c: &mut Criterion) {
    let mut group = c.benchmark_group("friends_of_friends");

    for size in [1_000, 10_000].iter() {
        let view = build_view_from_graph(&graph(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &view, |b, view| {
            b.iter(|| {
                (0..view.node_count)
                    .map(|idx| friends_of_friends(view, idx).len())
                    .sum::<usize>()
            });
        });
    }
    group.finish();
}

/// Benchmark the influential-followers ranking
fn bench_influential_followers(c: &mut Criterion) {
    let mut group = c.benchmark_group("influential_followers");

    for size in [1_000, 10_000].iter() {
        let view = build_view_from_graph(&graph(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &view, |b, view| {
            b.iter(|| influential_followers(view, 12));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generation,
    bench_friends_of_friends,
    bench_influential_followers
);
criterion_main!(benches);
