//! Benchmarks for graph analysis on generated module graphs.
//!
//! Each module depends on up to `fan_out` modules with lower indices, which
//! keeps the base graph acyclic. The cyclic variant adds back edges.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use modscope::DependencyGraph;

/// Create a layered graph with `size` modules.
fn create_graph(size: usize, fan_out: usize, with_cycles: bool) -> DependencyGraph {
    let modules = (0..size).map(|i| {
        let mut deps: Vec<String> = (1..=fan_out)
            .filter(|step| i >= *step * 3)
            .map(|step| format!("Module{}", i - step * 3))
            .collect();
        if with_cycles && i % 10 == 0 && i + 5 < size {
            deps.push(format!("Module{}", i + 5));
        }
        (format!("Module{}", i), deps)
    });

    DependencyGraph::new(modules)
}

/// Benchmark cycle detection on acyclic and cyclic graphs
fn bench_detect_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_cycles");

    for size in [10, 50, 100, 200].iter() {
        let acyclic = create_graph(*size, 3, false);
        let cyclic = create_graph(*size, 3, true);

        group.bench_with_input(BenchmarkId::new("acyclic", size), size, |b, _| {
            b.iter(|| black_box(acyclic.detect_cycles()));
        });
        group.bench_with_input(BenchmarkId::new("cyclic", size), size, |b, _| {
            b.iter(|| black_box(cyclic.detect_cycles()));
        });
    }

    group.finish();
}

/// Benchmark Kahn's topological sort
fn bench_topological_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("topological_order");

    for size in [10, 50, 100, 200, 1000].iter() {
        let graph = create_graph(*size, 3, false);

        group.bench_with_input(BenchmarkId::new("modules", size), size, |b, _| {
            b.iter(|| black_box(graph.topological_order()));
        });
    }

    group.finish();
}

/// Benchmark degree statistics
fn bench_degree_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("degree_statistics");

    for size in [10, 100, 1000].iter() {
        let graph = create_graph(*size, 5, false);

        group.bench_with_input(BenchmarkId::new("modules", size), size, |b, _| {
            b.iter(|| black_box(graph.degree_statistics()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_detect_cycles,
    bench_topological_order,
    bench_degree_statistics
);
criterion_main!(benches);
