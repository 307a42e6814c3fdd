pub mod alias;
pub mod coder;
pub mod descriptor;
pub mod optimal;
pub mod stats;

use rand::prelude::{Distribution, SmallRng};
use rand::SeedableRng;
use rand_distr::Zipf;

/// Size of the symbol list used by the benchmarks below.
pub const SYMBOL_LIST_LENGTH: usize = 500_000;

/// Maximum value the Zipfian distribution can output.
const MAXIMUM_SYMBOL: u64 = 1 << 8;

/// A skewed, reproducible symbol stream shared by every benchmark group.
pub fn get_symbols() -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(0xBE5E);
    let distribution = Zipf::new(MAXIMUM_SYMBOL, 1.1).unwrap();
    (0..SYMBOL_LIST_LENGTH)
        .map(|_| distribution.sample(&mut rng) as i64)
        .collect()
}
