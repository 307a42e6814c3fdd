use criterion::{criterion_group, BatchSize, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use rans_core::coder::config::Rans32Byte;
use rans_core::coder::io::{BackwardWriter, ForwardReader};
use rans_core::coder::single::Coder;
use rans_core::model::{DecModel, EncModel};
use rans_core::stats::Statistics;

use crate::benchmarks::get_symbols;

fn encode_bench(c: &mut Criterion) {
    let symbols = get_symbols();
    let mut stats = Statistics::build(&symbols).unwrap();
    stats.rescale(14).unwrap();
    let min_symbol = stats.min_symbol();
    let model = EncModel::<Rans32Byte>::from_stats(&stats, 14).unwrap();

    let mut group = c.benchmark_group("coder");
    group.throughput(criterion::Throughput::Elements(symbols.len() as u64));

    group.bench_function("encode_all", |b| {
        b.iter(|| {
            let mut x = Coder::<Rans32Byte>::enc_init();
            let mut out = BackwardWriter::new();
            for &sym in symbols.iter().rev() {
                let idx = (sym - min_symbol) as usize;
                let desc = model.symbol(idx).unwrap();
                Coder::<Rans32Byte>::enc_put_symbol(&mut x, &mut out, desc, 14).unwrap();
            }
            Coder::<Rans32Byte>::enc_flush(x, &mut out).unwrap();
            out
        })
    });
    group.finish()
}

fn decode_bench(c: &mut Criterion) {
    let symbols = get_symbols();
    let mut stats = Statistics::build(&symbols).unwrap();
    stats.rescale(14).unwrap();
    let min_symbol = stats.min_symbol();
    let enc_model = EncModel::<Rans32Byte>::from_stats(&stats, 14).unwrap();
    let dec_model = DecModel::from_stats(&stats);

    let mut x = Coder::<Rans32Byte>::enc_init();
    let mut out = BackwardWriter::new();
    for &sym in symbols.iter().rev() {
        let idx = (sym - min_symbol) as usize;
        let desc = enc_model.symbol(idx).unwrap();
        Coder::<Rans32Byte>::enc_put_symbol(&mut x, &mut out, desc, 14).unwrap();
    }
    Coder::<Rans32Byte>::enc_flush(x, &mut out).unwrap();
    let granules = out.into_granules();

    let mut group = c.benchmark_group("coder");
    group.throughput(criterion::Throughput::Elements(symbols.len() as u64));

    group.bench_function("decode_all", |b| {
        b.iter_batched(
            || ForwardReader::from_granules(granules.clone()),
            |mut inp| {
                let mut dx = Coder::<Rans32Byte>::dec_init(&mut inp).unwrap();
                for _ in 0..symbols.len() {
                    let slot = Coder::<Rans32Byte>::dec_get(dx, 14);
                    let sym_idx = dec_model.symbol_for_slot(slot);
                    let desc = dec_model.descriptor(sym_idx as usize);
                    Coder::<Rans32Byte>::dec_advance_symbol(&mut dx, &mut inp, desc, 14).unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish()
}

criterion_group! {
    name = coder_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = encode_bench, decode_bench
}
