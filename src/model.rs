use crate::coder::config::Config;
use crate::coder::symbol::{DecSymbol, EncSymbol};
use crate::error::{Error, Result};
use crate::stats::Statistics;

/// Encoder-side model (components B): one [`EncSymbol`] descriptor per
/// symbol in the alphabet, built from an already-rescaled [`Statistics`].
///
/// Symbols with zero frequency have no descriptor — the caller is never
/// meant to encode them, and [`EncModel::symbol`] reports that plainly
/// instead of constructing a poisoned one.
#[readonly::make]
pub struct EncModel<C: Config> {
    #[readonly]
    pub p: u32,
    symbols: Vec<Option<EncSymbol<C>>>,
}

impl<C: Config> EncModel<C> {
    pub fn from_stats(stats: &Statistics, p: u32) -> Result<Self> {
        if stats.total() != 1 << p {
            return Err(Error::InvalidDescriptor {
                reason: format!(
                    "statistics total {} does not match frame 2^{p}",
                    stats.total()
                ),
            });
        }

        let symbols = (0..stats.len())
            .map(|i| {
                let freq = stats.freqs()[i];
                if freq == 0 {
                    Ok(None)
                } else {
                    EncSymbol::new(stats.cum_freqs()[i], freq, p).map(Some)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { p, symbols })
    }

    pub fn symbol(&self, symbol_index: usize) -> Result<&EncSymbol<C>> {
        self.symbols
            .get(symbol_index)
            .and_then(|s| s.as_ref())
            .ok_or_else(|| Error::InvalidDescriptor {
                reason: format!("symbol {symbol_index} has zero frequency or is out of range"),
            })
    }
}

/// Decoder-side model (component C): a `(start, freq)` per symbol plus a
/// brute-force cumulative-slot-to-symbol map of length `M`, the simplest of
/// the three cum-to-symbol backends this design space admits (the other
/// being [`crate::alias::AliasTable`], trading memory for O(1) lookup
/// without an O(M) table).
pub struct DecModel {
    decoders: Vec<Option<DecSymbol>>,
    slot_to_symbol: Vec<u32>,
}

impl DecModel {
    pub fn from_stats(stats: &Statistics) -> Self {
        let m = stats.total() as usize;
        let mut slot_to_symbol = vec![0u32; m];

        for sym in 0..stats.len() {
            let (lo, hi) = (stats.cum_freqs()[sym], stats.cum_freqs()[sym + 1]);
            for slot in lo..hi {
                slot_to_symbol[slot as usize] = sym as u32;
            }
        }

        let decoders = (0..stats.len())
            .map(|i| {
                let freq = stats.freqs()[i];
                (freq > 0).then(|| DecSymbol::new(stats.cum_freqs()[i], freq).unwrap())
            })
            .collect();

        Self {
            decoders,
            slot_to_symbol,
        }
    }

    pub fn symbol_for_slot(&self, slot: u32) -> u32 {
        self.slot_to_symbol[slot as usize]
    }

    pub fn descriptor(&self, symbol_index: usize) -> &DecSymbol {
        self.decoders[symbol_index]
            .as_ref()
            .expect("symbol_for_slot only ever returns symbols with nonzero frequency")
    }
}
