use crate::coder::config::Config;
use crate::coder::int::RansStateInt;
use crate::error::{Error, Result};

/// Precomputed per-symbol encoder descriptor (component B): a fixed-point
/// reciprocal of `freq` that turns the division in the rANS state update
/// into a multiply-high, following Alverson's integer-division-by-reciprocal
/// construction.
#[derive(Clone, Copy, Debug)]
pub struct EncSymbol<C: Config> {
    pub freq: u32,
    pub cmpl_freq: u32,
    pub rcp_freq: C::State,
    pub rcp_shift: u32,
    pub bias: u32,
}

impl<C: Config> EncSymbol<C> {
    /// Builds the descriptor for a symbol occupying slots `[start, start+freq)`
    /// of a frame of size `M = 2^p`.
    pub fn new(start: u32, freq: u32, p: u32) -> Result<Self> {
        if !(1..=16).contains(&p) {
            return Err(Error::InvalidDescriptor {
                reason: format!("p must be in 1..=16, got {p}"),
            });
        }
        if freq == 0 {
            return Err(Error::InvalidDescriptor {
                reason: "freq must be nonzero".to_string(),
            });
        }

        let m = 1u32 << p;
        match start.checked_add(freq) {
            Some(end) if end <= m => {}
            _ => {
                return Err(Error::InvalidDescriptor {
                    reason: format!("start({start}) + freq({freq}) exceeds frame {m}"),
                })
            }
        }

        let cmpl_freq = m - freq;
        let w = C::State::BITS;

        let (rcp_freq, rcp_shift, bias) = if freq >= 2 {
            // shift = ceil(log2(freq)); (freq - 1).leading_zeros() works for
            // any freq >= 2 representable in u32.
            let shift = 32 - (freq - 1).leading_zeros();
            let numerator: u128 = (1u128 << (shift as u128 + w as u128 - 1)) + freq as u128 - 1;
            let rcp_freq_128 = numerator / freq as u128;
            debug_assert!(
                w >= 64 || (rcp_freq_128 >> w) == 0,
                "rcp_freq does not fit in the {w}-bit state"
            );
            (C::State::from_u64(rcp_freq_128 as u64), shift - 1, start)
        } else {
            // freq == 1: the exact update x_new = x*M + start is recovered by
            // forcing q = mulhi(x, 2^w - 1) >> 0 = x - 1 and shifting the
            // bias to absorb the discrepancy (see module docs for the
            // derivation this mirrors).
            let max_state = C::State::from_u64(u64::MAX >> (64 - w));
            (max_state, 0, start + m - 1)
        };

        Ok(Self {
            freq,
            cmpl_freq,
            rcp_freq,
            rcp_shift,
            bias,
        })
    }
}

/// Decoder descriptor (component C): the `(start, freq)` pair needed to
/// invert one encode step. Pair this with a cumulative-frequency-to-symbol
/// map (either the brute-force table in [`crate::model::DecModel`] or
/// [`crate::alias::AliasTable`]) to go from a decoded slot back to a symbol.
#[derive(Clone, Copy, Debug)]
pub struct DecSymbol {
    pub start: u32,
    pub freq: u32,
}

impl DecSymbol {
    pub fn new(start: u32, freq: u32) -> Result<Self> {
        if freq == 0 {
            return Err(Error::InvalidDescriptor {
                reason: "freq must be nonzero".to_string(),
            });
        }
        Ok(Self { start, freq })
    }
}
