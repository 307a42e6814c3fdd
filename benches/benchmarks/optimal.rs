use criterion::{criterion_group, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use rans_core::optimal::optimal_renormalize;
use rans_core::stats::Statistics;

use crate::benchmarks::get_symbols;

fn optimal_renormalize_bench(c: &mut Criterion) {
    let symbols = get_symbols();
    let stats = Statistics::build(&symbols).unwrap();
    let raw: Vec<u64> = stats.freqs().iter().map(|&f| f as u64).collect();

    let mut group = c.benchmark_group("optimal");
    group.throughput(criterion::Throughput::Elements(raw.len() as u64));

    group.bench_function("optimal_renormalize p=14", |b| {
        b.iter(|| optimal_renormalize(&raw, 14).unwrap())
    });
    group.finish()
}

criterion_group! {
    name = optimal_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = optimal_renormalize_bench
}
