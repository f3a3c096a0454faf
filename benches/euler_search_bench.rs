use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use arcgraph::algs::articulation::find_articulation_points;
use arcgraph::algs::euler::EulerPathSearch;
use arcgraph::topology::graph::Graph;
use arcgraph::topology::load::Record;

/// Two rings of `rungs` nodes joined by doubled rungs; every node has degree 4.
fn build_ring_ladder(rungs: usize) -> Graph {
    let mut g = Graph::new();
    let top = |i: usize| format!("t{:03}", i % rungs);
    let bot = |i: usize| format!("b{:03}", i % rungs);
    let records = (0..rungs).flat_map(|i| {
        [
            Record::edge(top(i), top(i + 1)),
            Record::edge(bot(i), bot(i + 1)),
            Record::edge(top(i), bot(i)),
            Record::edge(top(i), bot(i)),
        ]
    });
    g.load(records.map(Ok)).expect("ladder loads");
    g
}

fn build_path(n: usize) -> Graph {
    let mut g = Graph::new();
    g.load((1..n).map(|i| Ok(Record::edge(format!("p{:05}", i - 1), format!("p{i:05}")))))
        .expect("path loads");
    g
}

fn bench_euler_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("euler_search");

    for &rungs in &[3usize, 4, 5] {
        let g = build_ring_ladder(rungs);
        group.bench_with_input(BenchmarkId::new("first_path", rungs), &rungs, |b, _| {
            b.iter(|| {
                let out = EulerPathSearch::new(&g).max_paths(Some(1)).run();
                black_box(out)
            });
        });
        group.bench_with_input(BenchmarkId::new("first_100", rungs), &rungs, |b, _| {
            b.iter(|| {
                let out = EulerPathSearch::new(&g).max_paths(Some(100)).run();
                black_box(out)
            });
        });
    }

    group.finish();
}

fn bench_articulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("articulation_points");

    for &n in &[1_000usize, 10_000] {
        let g = build_path(n);
        group.bench_with_input(BenchmarkId::new("path", n), &n, |b, _| {
            b.iter(|| black_box(find_articulation_points(&g)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_euler_search, bench_articulation);
criterion_main!(benches);
