use std::collections::VecDeque;

use log::debug;

use crate::coder::config::Config;
use crate::coder::int::RansStateInt;
use crate::coder::io::{BackwardWriter, ForwardReader};
use crate::coder::single::Coder;
use crate::error::{Error, Result};
use crate::stats::Statistics;

/// Alias-table decoder (component E): O(1) cumulative-slot-to-symbol lookup
/// without the O(M) table [`crate::model::DecModel`] needs, built with a
/// queue-based formulation of Vose's algorithm.
///
/// One bucket per distinct (nonzero-frequency) symbol, each holding exactly
/// `t = M / bucket_count` slots split into a primary half and (if the
/// symbol's own frequency is smaller than `t`) an alias half borrowed from a
/// symbol whose frequency exceeds `t`. This is an equivalent, not
/// byte-for-byte identical, formulation of the historical pointer-sweep
/// construction: the externally observable contract — every symbol ends up
/// owning exactly its frequency's worth of slots across the table — is what
/// this type guarantees, not any particular bucket assignment.
pub struct AliasTable {
    t: u32,
    divider: Vec<u32>,
    bucket_freq: Vec<u32>,
    bucket_base: Vec<u32>,
    bucket_symbol: Vec<u32>,
    alias_remap: Vec<u32>,
}

impl AliasTable {
    /// Builds a table with one bucket per symbol carrying non-zero
    /// frequency. Fails with [`Error::AliasNotDivisible`] if the frame size
    /// isn't a multiple of that bucket count.
    pub fn build(stats: &Statistics) -> Result<Self> {
        let m = stats.total();
        let freqs = stats.freqs();
        let starts = stats.cum_freqs();

        let symbols: Vec<usize> = (0..stats.len()).filter(|&i| freqs[i] > 0).collect();
        let n = symbols.len();

        if n == 0 || m % (n as u32) != 0 {
            return Err(Error::AliasNotDivisible {
                frame_size: m,
                buckets: n,
            });
        }
        let t = m / n as u32;
        debug!("alias build: {n} buckets of {t} slots each (M = {m})");

        let mut remaining = vec![0u32; freqs.len()];
        let mut consumed = vec![0u32; freqs.len()];
        let mut small: VecDeque<usize> = VecDeque::new();
        let mut large: VecDeque<usize> = VecDeque::new();

        for &s in &symbols {
            remaining[s] = freqs[s];
            if freqs[s] < t {
                small.push_back(s);
            } else {
                large.push_back(s);
            }
        }

        let mut divider = vec![0u32; n];
        let mut bucket_freq = vec![0u32; 2 * n];
        let mut bucket_base = vec![0u32; 2 * n];
        let mut bucket_symbol = vec![0u32; 2 * n];
        let mut alias_remap = vec![0u32; m as usize];

        let mut fill_piece = |alias_remap: &mut Vec<u32>, sym: usize, len: u32, bucket_offset: u32| {
            for k in 0..len {
                alias_remap[(starts[sym] + consumed[sym] + k) as usize] = bucket_offset + k;
            }
            consumed[sym] += len;
            remaining[sym] -= len;
        };

        for bucket in 0..n {
            let bucket_start = bucket as u32 * t;

            if let Some(s) = small.pop_front() {
                let primary_len = remaining[s];
                divider[bucket] = primary_len;
                bucket_freq[2 * bucket] = freqs[s];
                bucket_base[2 * bucket] = consumed[s];
                bucket_symbol[2 * bucket] = s as u32;
                fill_piece(&mut alias_remap, s, primary_len, bucket_start);

                let need = t - primary_len;
                if need > 0 {
                    let donor = large
                        .pop_front()
                        .expect("Vose invariant: a donor with spare frequency always exists here");

                    bucket_freq[2 * bucket + 1] = freqs[donor];
                    bucket_base[2 * bucket + 1] = consumed[donor];
                    bucket_symbol[2 * bucket + 1] = donor as u32;
                    fill_piece(&mut alias_remap, donor, need, bucket_start + primary_len);

                    if remaining[donor] > 0 {
                        if remaining[donor] < t {
                            small.push_back(donor);
                        } else {
                            large.push_back(donor);
                        }
                    }
                }
            } else {
                let s = large
                    .pop_front()
                    .expect("Vose invariant: total remaining frequency always fills whole buckets");
                divider[bucket] = t;
                bucket_freq[2 * bucket] = freqs[s];
                bucket_base[2 * bucket] = consumed[s];
                bucket_symbol[2 * bucket] = s as u32;
                fill_piece(&mut alias_remap, s, t, bucket_start);

                if remaining[s] > 0 {
                    if remaining[s] < t {
                        small.push_back(s);
                    } else {
                        large.push_back(s);
                    }
                }
            }
        }

        Ok(Self {
            t,
            divider,
            bucket_freq,
            bucket_base,
            bucket_symbol,
            alias_remap,
        })
    }

    /// Maps a symbol's own cumulative slot (`C[sym] + local`) to its slot in
    /// alias-table space, for use by the encoder.
    pub fn encode_slot(&self, cum_slot: u32) -> u32 {
        self.alias_remap[cum_slot as usize]
    }

    /// Maps an alias-table-space slot back to `(symbol, symbol_total_freq,
    /// symbol_local_slot)`.
    pub fn decode(&self, x_m: u32) -> (u32, u32, u32) {
        let bucket = (x_m / self.t) as usize;
        let local = x_m % self.t;
        let half = usize::from(local >= self.divider[bucket]);
        let idx = 2 * bucket + half;
        let within = if half == 0 {
            local
        } else {
            local - self.divider[bucket]
        };

        (
            self.bucket_symbol[idx],
            self.bucket_freq[idx],
            within + self.bucket_base[idx],
        )
    }
}

/// Encodes one symbol through an [`AliasTable`] instead of the direct
/// `(start, freq)` cumulative update; renormalizes exactly like
/// [`Coder::enc_put`].
pub fn alias_enc_put<C: Config>(
    x: &mut C::State,
    out: &mut BackwardWriter<C::Granule>,
    table: &AliasTable,
    start: u32,
    freq: u32,
    p: u32,
) -> Result<()> {
    debug_assert!(freq > 0);
    let b = C::GRANULE_BITS;
    let mask = (1u64 << b) - 1;
    let x_max = ((C::L >> p) << b) * freq as u64;

    let mut xv = x.to_u64();
    while xv >= x_max {
        let granule = C::Granule::try_from(xv & mask)
            .ok()
            .expect("granule value always fits GRANULE_BITS by construction");
        out.push(granule)?;
        xv >>= b;
    }

    let q = xv / freq as u64;
    let r = (xv - q * freq as u64) as u32;
    let x_m = table.encode_slot(start + r);
    *x = C::State::from_u64((q << p) | x_m as u64);
    Ok(())
}

/// Decodes one symbol through an [`AliasTable`], returning its index.
/// Renormalizes exactly like [`Coder::dec_renorm`].
pub fn alias_dec_advance<C: Config>(
    x: &mut C::State,
    inp: &mut ForwardReader<C::Granule>,
    table: &AliasTable,
    p: u32,
) -> Result<u32> {
    let xv = x.to_u64();
    let x_m = (xv & ((1u64 << p) - 1)) as u32;
    let (sym, freq, local) = table.decode(x_m);
    let new_x = freq as u64 * (xv >> p) + local as u64;
    *x = C::State::from_u64(new_x);
    Coder::<C>::dec_renorm(x, inp)?;
    Ok(sym)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coder::config::Rans32Byte;

    #[test]
    fn every_symbol_keeps_its_frequency_worth_of_slots() {
        // 4 distinct symbols so the bucket count (a power of two) divides
        // M = 16 evenly; alias buckets only ever work out when the number of
        // distinct symbols is itself a power of two, since M always is.
        let symbols = [0i64, 0, 0, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3];
        let mut stats = Statistics::build(&symbols).unwrap();
        stats.rescale(4).unwrap();
        let table = AliasTable::build(&stats).unwrap();

        let mut counts = vec![0u32; stats.len()];
        for x_m in 0..stats.total() {
            let (sym, _, _) = table.decode(x_m);
            counts[sym as usize] += 1;
        }
        assert_eq!(counts, stats.freqs());
    }

    #[test]
    fn alias_coder_roundtrips_against_cum_table() {
        let symbols = [0i64, 1, 2, 3, 1, 0, 3, 2, 2, 1, 0, 3];
        let mut stats = Statistics::build(&symbols).unwrap();
        stats.rescale(4).unwrap();
        let table = AliasTable::build(&stats).unwrap();
        let p = 4;

        let mut x = Coder::<Rans32Byte>::enc_init();
        let mut out = BackwardWriter::new();
        for &s in symbols.iter().rev() {
            let idx = s as usize;
            alias_enc_put::<Rans32Byte>(
                &mut x,
                &mut out,
                &table,
                stats.cum_freqs()[idx],
                stats.freqs()[idx],
                p,
            )
            .unwrap();
        }
        Coder::<Rans32Byte>::enc_flush(x, &mut out).unwrap();

        let mut inp = ForwardReader::from_granules(out.into_granules());
        let mut dx = Coder::<Rans32Byte>::dec_init(&mut inp).unwrap();
        let mut decoded = Vec::new();
        for _ in 0..symbols.len() {
            let sym = alias_dec_advance::<Rans32Byte>(&mut dx, &mut inp, &table, p).unwrap();
            decoded.push(sym as i64);
        }
        assert_eq!(decoded, symbols);
    }

    #[test]
    fn rejects_indivisible_frame() {
        // 3 distinct symbols but M = 8 isn't a multiple of 3.
        let mut stats = Statistics::build(&[0, 1, 2]).unwrap();
        stats.rescale(3).unwrap();
        assert!(matches!(
            AliasTable::build(&stats),
            Err(Error::AliasNotDivisible { .. })
        ));
    }
}
