//! Shared fixtures for the black-box integration tests: seeded symbol
//! sequences drawn from a couple of distributions realistic for an entropy
//! coder test suite (uniform byte noise, and a skewed Zipfian alphabet that
//! exercises donor-stealing during rescale).

use rand::prelude::{Distribution, SmallRng};
use rand::{Rng, SeedableRng};
use rand_distr::Zipf;

/// Length of the symbol sequences produced by [`zipf_symbols`]/[`uniform_bytes`].
pub const SYMBOL_LIST_LENGTH: usize = 100_000;

/// Maximum value the Zipfian distribution in [`zipf_symbols`] can produce.
const MAXIMUM_SYMBOL: u64 = 1 << 8;

/// A skewed sequence of `i64` symbols in `[0, MAXIMUM_SYMBOL)`, heavily
/// biased toward small values -- the kind of distribution that forces
/// donor-stealing during [`rans_core::stats::Statistics::rescale`].
pub fn zipf_symbols(seed: u64) -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let distribution = Zipf::new(MAXIMUM_SYMBOL, 1.2).unwrap();
    (0..SYMBOL_LIST_LENGTH)
        .map(|_| distribution.sample(&mut rng) as i64)
        .collect()
}

/// A uniform sequence of bytes (as `i64` symbols), the worst case for
/// compression but a good stress test for round-trip correctness.
pub fn uniform_bytes(seed: u64) -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..SYMBOL_LIST_LENGTH)
        .map(|_| rng.gen_range(0..256i64))
        .collect()
}
