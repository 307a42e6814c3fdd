use criterion::{criterion_group, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use rans_core::coder::config::Rans32Byte;
use rans_core::model::EncModel;
use rans_core::stats::Statistics;

use crate::benchmarks::get_symbols;

fn model4encoder_building_bench(c: &mut Criterion) {
    let symbols = get_symbols();
    let mut stats = Statistics::build(&symbols).unwrap();
    stats.rescale(14).unwrap();

    let mut group = c.benchmark_group("descriptor");
    group.throughput(criterion::Throughput::Elements(stats.len() as u64));

    group.bench_function("enc model from stats, p=14", |b| {
        b.iter(|| EncModel::<Rans32Byte>::from_stats(&stats, 14).unwrap())
    });
    group.finish()
}

criterion_group! {
    name = descriptor_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = model4encoder_building_bench
}
