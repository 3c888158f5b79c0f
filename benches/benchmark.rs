// Route finding, component discovery and codec throughput on random layouts
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use wardgraph::{HospitalGraph, PathStrategy};
use wardgraph_storage::{decode, encode};

fn generate_random_graph(nodes: usize, edges_per_node: usize) -> HospitalGraph {
    let mut rng = StdRng::seed_from_u64(42);
    let mut graph = HospitalGraph::new();
    for i in 0..nodes {
        graph.add_node(format!("Location {}", i), "Department").unwrap();
    }
    for id in 1..=nodes as u64 {
        for _ in 0..edges_per_node {
            let other = rng.random_range(1..=nodes as u64);
            graph.add_edge(id, other, rng.random_range(1..100)).unwrap();
        }
    }
    graph
}

fn benchmark_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");

    for size in [100, 1000, 5000].iter() {
        let graph = generate_random_graph(*size, 3);
        let target = *size as u64;

        for strategy in [PathStrategy::FewestHops, PathStrategy::LeastWeight] {
            group.bench_with_input(BenchmarkId::new(strategy.to_string(), size), size, |b, _| {
                b.iter(|| graph.shortest_path(black_box(1), black_box(target), strategy).unwrap());
            });
        }
    }

    group.finish();
}

fn benchmark_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("components");

    for size in [100, 1000, 5000].iter() {
        // Sparse enough to leave several islands
        let graph = generate_random_graph(*size, 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(graph.connected_components()));
        });
    }

    group.finish();
}

fn benchmark_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let graph = generate_random_graph(2000, 3);
    let text = encode(&graph);

    group.bench_function("encode", |b| b.iter(|| encode(black_box(&graph))));
    group.bench_function("decode", |b| b.iter(|| decode(black_box(&text))));

    group.finish();
}

criterion_group!(benches, benchmark_shortest_path, benchmark_components, benchmark_codec);
criterion_main!(benches);
