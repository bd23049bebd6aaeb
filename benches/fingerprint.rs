/// Fingerprinting and grouping benchmarks
///
/// Measures traversal cost on wide fan-in graphs, where the children of a
/// shared node are pushed once per parent, and the full analysis pipeline.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;
use tracegroup::call_graph::CallGraph;
use tracegroup::config::FingerprintScheme;
use tracegroup::fingerprint::{fingerprint_key, traverse};
use tracegroup::trace::Trace;
use tracegroup::Analyzer;

/// Layered graph where every node links to every node of the next level
fn layered_graph(depth: usize, width: usize) -> CallGraph {
    let mut graph = CallGraph::new("1.1");
    let mut previous = vec!["1.1".to_string()];
    for level in 2..=depth {
        let current: Vec<String> = (1..=width).map(|j| format!("{}.{}", level, j)).collect();
        for parent in &previous {
            for child in &current {
                graph.add_edge(parent, child);
            }
        }
        previous = current;
    }
    graph
}

fn bench_traverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("traverse");
    group.measurement_time(Duration::from_secs(5));

    for width in [1usize, 2, 3] {
        let graph = layered_graph(6, width);
        group.throughput(Throughput::Elements(graph.node_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &graph, |b, graph| {
            b.iter(|| black_box(traverse(graph)));
        });
    }

    group.finish();
}

fn bench_fingerprint_schemes(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint_key");
    let graph = layered_graph(5, 3);

    group.bench_function("branch_digits", |b| {
        b.iter(|| black_box(fingerprint_key(&graph, FingerprintScheme::BranchDigits)));
    });
    group.bench_function("node_sequence", |b| {
        b.iter(|| black_box(fingerprint_key(&graph, FingerprintScheme::NodeSequence)));
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(1000));

    let traces: Vec<Trace> = (0..1000)
        .map(|i| {
            let depth = 2 + i % 4;
            let graph = layered_graph(depth, 1 + i % 2);
            Trace::new(format!("t{}", i), graph, (i % 97) as f64, Vec::new())
        })
        .collect();

    group.bench_function("run_1000_traces", |b| {
        b.iter(|| {
            let mut batch = traces.clone();
            black_box(Analyzer::default().run(&mut batch).unwrap());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_traverse,
    bench_fingerprint_schemes,
    bench_pipeline
);
criterion_main!(benches);
