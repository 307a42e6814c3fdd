use criterion::{criterion_group, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use rans_core::stats::Statistics;

use crate::benchmarks::get_symbols;

fn build_bench(c: &mut Criterion) {
    let symbols = get_symbols();
    let mut group = c.benchmark_group("stats");
    group.throughput(criterion::Throughput::Elements(symbols.len() as u64));

    group.bench_function("build", |b| {
        b.iter(|| Statistics::build(&symbols).unwrap())
    });
    group.finish()
}

fn rescale_bench(c: &mut Criterion) {
    let symbols = get_symbols();
    let mut group = c.benchmark_group("stats");

    group.bench_function("rescale p=14", |b| {
        b.iter_batched(
            || Statistics::build(&symbols).unwrap(),
            |mut stats| stats.rescale(14).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish()
}

criterion_group! {
    name = stats_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = build_bench, rescale_bench
}
