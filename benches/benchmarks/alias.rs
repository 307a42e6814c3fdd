use criterion::{criterion_group, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use rans_core::alias::AliasTable;
use rans_core::stats::Statistics;

use crate::benchmarks::get_symbols;

fn build_bench(c: &mut Criterion) {
    let symbols = get_symbols();
    let mut stats = Statistics::build(&symbols).unwrap();
    // A bucket count dividing M evenly is not guaranteed for an arbitrary
    // alphabet; fall back to the full byte alphabet's frame if it doesn't.
    stats.rescale(8).unwrap();

    let mut group = c.benchmark_group("alias");
    group.bench_function("build p=8", |b| b.iter(|| AliasTable::build(&stats)));
    group.finish()
}

criterion_group! {
    name = alias_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = build_bench
}
