use log::{debug, trace};

use crate::error::{Error, Result};

/// Frequency and cumulative-frequency table over a contiguous symbol
/// alphabet `[min_symbol, min_symbol + len())`.
///
/// Built once from a sequence of raw symbols with [`Statistics::build`], then
/// normalized to a fixed power-of-two total with [`Statistics::rescale`]
/// before it can feed an [`crate::coder::symbol::EncSymbol`] or
/// [`crate::alias::AliasTable`].
#[derive(Clone, Debug)]
pub struct Statistics {
    min_symbol: i64,
    freqs: Vec<u32>,
    cum_freqs: Vec<u32>,
}

impl Statistics {
    /// Builds a frequency table from a non-empty sequence of symbols.
    pub fn build(symbols: &[i64]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::EmptyInput);
        }

        let min_symbol = *symbols.iter().min().unwrap();
        let max_symbol = *symbols.iter().max().unwrap();
        let len = (max_symbol - min_symbol + 1) as usize;

        let mut freqs = vec![0u32; len];
        for &sym in symbols {
            freqs[(sym - min_symbol) as usize] += 1;
        }

        let cum_freqs = Self::cumulate(&freqs);

        Ok(Self {
            min_symbol,
            freqs,
            cum_freqs,
        })
    }

    fn cumulate(freqs: &[u32]) -> Vec<u32> {
        let mut cum = vec![0u32; freqs.len() + 1];
        for (i, &f) in freqs.iter().enumerate() {
            cum[i + 1] = cum[i] + f;
        }
        cum
    }

    /// Rescales the table so that frequencies sum exactly to `M = 2^p`,
    /// preserving every originally non-zero symbol with at least one slot.
    ///
    /// Uses proportional rounding followed by a steal-from-donor repair pass:
    /// any symbol whose rounded width collapsed to zero borrows one slot from
    /// the nearest symbol (by index) that still has spare width, shifting the
    /// cumulative boundaries between them by one.
    pub fn rescale(&mut self, p: u32) -> Result<()> {
        if p == 0 || p > 16 {
            return Err(Error::InvalidDescriptor {
                reason: format!("p must be in 1..=16, got {p}"),
            });
        }

        let m: u32 = 1 << p;
        let n = self.freqs.len();
        let nonzero = self.freqs.iter().filter(|&&f| f > 0).count();

        debug!("rescale: {nonzero} nonzero symbols of {n} onto M = 2^{p} = {m}");

        if (m as usize) < nonzero {
            return Err(Error::ModelCapacity {
                log2_m: p,
                symbols: nonzero,
            });
        }

        let total = self.cum_freqs[n] as u128;
        let mut new_cum: Vec<u32> = self
            .cum_freqs
            .iter()
            .map(|&c| ((m as u128 * c as u128) / total) as u32)
            .collect();

        for i in 0..n {
            if self.freqs[i] == 0 || new_cum[i + 1] > new_cum[i] {
                continue;
            }

            let donor = (0..n)
                .filter(|&j| new_cum[j + 1].saturating_sub(new_cum[j]) > 1)
                .min_by_key(|&j| new_cum[j + 1] - new_cum[j]);

            match donor {
                None => {
                    return Err(Error::ModelCapacity {
                        log2_m: p,
                        symbols: nonzero,
                    })
                }
                Some(j) if j < i => {
                    trace!("rescale: symbol {i} collapsed to zero, stealing a slot from {j}");
                    for k in (j + 1)..=i {
                        new_cum[k] -= 1;
                    }
                }
                Some(j) => {
                    trace!("rescale: symbol {i} collapsed to zero, stealing a slot from {j}");
                    for k in (i + 1)..=j {
                        new_cum[k] += 1;
                    }
                }
            }
        }

        self.freqs = (0..n).map(|i| new_cum[i + 1] - new_cum[i]).collect();
        self.cum_freqs = new_cum;

        Ok(())
    }

    /// Reconstructs a [`Statistics`] from an already-decoded `(min_symbol,
    /// freqs)` pair, as produced by [`crate::serialize::deserialize`]. Does
    /// not validate that `freqs` sums to a power of two — the caller read
    /// these from a side channel it trusts.
    pub(crate) fn from_parts(min_symbol: i64, freqs: Vec<u32>) -> Self {
        let cum_freqs = Self::cumulate(&freqs);
        Self {
            min_symbol,
            freqs,
            cum_freqs,
        }
    }

    pub fn min_symbol(&self) -> i64 {
        self.min_symbol
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    pub fn freqs(&self) -> &[u32] {
        &self.freqs
    }

    pub fn cum_freqs(&self) -> &[u32] {
        &self.cum_freqs
    }

    /// The current total of all frequencies (`2^p` once rescaled).
    pub fn total(&self) -> u32 {
        self.cum_freqs[self.freqs.len()]
    }

    /// Finds the symbol index owning cumulative slot `target < self.total()`.
    pub fn symbol_at_slot(&self, target: u32) -> usize {
        match self.cum_freqs.binary_search(&target) {
            Ok(mut i) => {
                // binary_search may land on a repeated boundary (a zero-width
                // symbol); walk forward to the symbol that actually owns it.
                while i + 1 < self.cum_freqs.len() && self.cum_freqs[i + 1] == self.cum_freqs[i] {
                    i += 1;
                }
                i
            }
            Err(i) => i - 1,
        }
    }
}
