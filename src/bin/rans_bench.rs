//! Benchmark/verification harness for the rANS codec (external collaborator,
//! §6 of the design document: argument parsing, file I/O, timers and JSON
//! output are thin wrappers around the library, not bespoke subsystems).
//!
//! `rans-bench <filename> [<probability_bits>]` reads the file as a
//! contiguous sequence of bytes, encodes it, decodes it back, verifies the
//! round trip and prints a JSON throughput summary.

use std::fs;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use rans_core::coder::config::Rans32Byte;
use rans_core::coder::io::{BackwardWriter, ForwardReader};
use rans_core::coder::single::Coder;
use rans_core::model::{DecModel, EncModel};
use rans_core::serialize;
use rans_core::stats::Statistics;

#[derive(Parser, Debug)]
#[command(about = "Round-trip a file through the rANS codec and report throughput")]
struct Args {
    /// File to compress. Read as a flat sequence of 8-bit symbols.
    filename: String,

    /// Probability-bit count (frame size is 2^p). Must be in 1..=16.
    #[arg(default_value_t = 14)]
    probability_bits: u32,
}

#[derive(Serialize)]
struct Summary {
    filename: String,
    probability_bits: u32,
    input_bytes: usize,
    compressed_bytes: usize,
    model_bytes: usize,
    ratio: f64,
    encode_ns: u128,
    decode_ns: u128,
    encode_mb_per_s: f64,
    decode_mb_per_s: f64,
    roundtrip_ok: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let bytes = fs::read(&args.filename)
        .with_context(|| format!("reading {}", args.filename))?;
    if bytes.is_empty() {
        bail!("{} is empty; rANS needs at least one symbol", args.filename);
    }

    let symbols: Vec<i64> = bytes.iter().map(|&b| b as i64).collect();

    let mut stats = Statistics::build(&symbols)?;
    stats.rescale(args.probability_bits)?;
    let model_bytes = serialize::serialize(&stats, args.probability_bits)?.len();

    let enc_model = EncModel::<Rans32Byte>::from_stats(&stats, args.probability_bits)?;
    let dec_model = DecModel::from_stats(&stats);
    let min_symbol = stats.min_symbol();

    log::debug!(
        "built statistics over {} symbols, alphabet size {}, p={}",
        symbols.len(),
        stats.len(),
        args.probability_bits
    );

    let encode_start = Instant::now();
    let mut x = Coder::<Rans32Byte>::enc_init();
    let mut out = BackwardWriter::new();
    for &sym in symbols.iter().rev() {
        let idx = (sym - min_symbol) as usize;
        let desc = enc_model.symbol(idx)?;
        Coder::<Rans32Byte>::enc_put_symbol(&mut x, &mut out, desc, args.probability_bits)?;
    }
    Coder::<Rans32Byte>::enc_flush(x, &mut out)?;
    let granules = out.into_granules();
    let encode_ns = encode_start.elapsed().as_nanos();

    let decode_start = Instant::now();
    let mut inp = ForwardReader::from_granules(granules.clone());
    let mut dx = Coder::<Rans32Byte>::dec_init(&mut inp)?;
    let mut decoded = Vec::with_capacity(symbols.len());
    for _ in 0..symbols.len() {
        let slot = Coder::<Rans32Byte>::dec_get(dx, args.probability_bits);
        let sym_idx = dec_model.symbol_for_slot(slot);
        let desc = dec_model.descriptor(sym_idx as usize);
        Coder::<Rans32Byte>::dec_advance_symbol(&mut dx, &mut inp, desc, args.probability_bits)?;
        decoded.push((sym_idx as i64 + min_symbol) as u8);
    }
    let decode_ns = decode_start.elapsed().as_nanos();

    let roundtrip_ok = decoded == bytes;
    if roundtrip_ok {
        println!("decode ok");
    } else {
        println!("ERROR: bad decoder");
    }

    let mb = bytes.len() as f64 / (1024.0 * 1024.0);
    let summary = Summary {
        filename: args.filename.clone(),
        probability_bits: args.probability_bits,
        input_bytes: bytes.len(),
        compressed_bytes: granules.len(),
        model_bytes,
        ratio: granules.len() as f64 / bytes.len() as f64,
        encode_ns,
        decode_ns,
        encode_mb_per_s: mb / (encode_ns as f64 / 1e9),
        decode_mb_per_s: mb / (decode_ns as f64 / 1e9),
        roundtrip_ok,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !roundtrip_ok {
        std::process::exit(1);
    }
    Ok(())
}
