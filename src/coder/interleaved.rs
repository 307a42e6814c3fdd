use std::marker::PhantomData;

use crate::coder::config::Config;
use crate::coder::int::RansStateInt;
use crate::coder::io::{BackwardWriter, ForwardReader};
use crate::coder::single::Coder;
use crate::coder::symbol::{DecSymbol, EncSymbol};
use crate::error::Result;

/// `N` independent rANS states sharing one output stream, exploiting
/// instruction-level parallelism between otherwise-unrelated dependency
/// chains.
///
/// Generalizes the historically two-state interleaved coder to arbitrary
/// `N`, reducing to it exactly at `N = 2`: the trailing `count % N` symbols
/// (the tail of the original sequence) are absorbed into state 0 alone
/// before the main loop, groups of `N` are encoded assigning the group's
/// last-positioned symbol to the highest-indexed state, and flush order is
/// the reverse of init order. `N = 1` degenerates to the ordinary
/// single-state coder.
pub struct InterleavedCoder<C, const N: usize>(PhantomData<C>);

impl<C: Config, const N: usize> InterleavedCoder<C, N> {
    /// Encodes `descriptors` (one per symbol, in original sequence order)
    /// and returns the final states (in `0..N` order) plus the granule
    /// stream.
    pub fn encode_all(descriptors: &[EncSymbol<C>], p: u32) -> Result<([C::State; N], Vec<C::Granule>)> {
        assert!(N >= 1, "InterleavedCoder requires at least one stream");
        let n = descriptors.len();
        let tail = n % N;

        let mut states = [Coder::<C>::enc_init(); N];
        let mut out = BackwardWriter::new();

        for i in (n - tail..n).rev() {
            Coder::<C>::enc_put_symbol(&mut states[0], &mut out, &descriptors[i], p)?;
        }

        let mut i = n - tail;
        while i >= N {
            i -= N;
            for k in (0..N).rev() {
                Coder::<C>::enc_put_symbol(&mut states[k], &mut out, &descriptors[i + k], p)?;
            }
        }

        for k in (0..N).rev() {
            Coder::<C>::enc_flush(states[k], &mut out)?;
        }

        Ok((states, out.into_granules()))
    }

    /// Decodes `count` symbols from `granules`. `slot_to_symbol` maps a
    /// decoded cumulative-frequency slot to `(symbol_id, descriptor)`; it is
    /// called once per symbol regardless of how decoding is scheduled across
    /// the `N` interleaved states.
    pub fn decode_all(
        granules: Vec<C::Granule>,
        count: usize,
        p: u32,
        mut slot_to_symbol: impl FnMut(u32) -> (u32, DecSymbol),
    ) -> Result<Vec<u32>> {
        assert!(N >= 1, "InterleavedCoder requires at least one stream");
        let mut inp = ForwardReader::from_granules(granules);
        let mut states = [C::State::from_u64(0); N];

        for state in states.iter_mut() {
            *state = Coder::<C>::dec_init(&mut inp)?;
        }

        let tail = count % N;
        let full_count = count - tail;
        let mut decoded = vec![0u32; count];
        let mut sym_ids = [0u32; N];
        let mut pos = 0usize;

        while pos < full_count {
            for k in 0..N {
                let slot = Coder::<C>::dec_get(states[k], p);
                let (sym_id, ds) = slot_to_symbol(slot);
                Coder::<C>::dec_advance_step(&mut states[k], ds.start, ds.freq, p);
                sym_ids[k] = sym_id;
            }
            for state in states.iter_mut() {
                Coder::<C>::dec_renorm(state, &mut inp)?;
            }
            decoded[pos..pos + N].copy_from_slice(&sym_ids);
            pos += N;
        }

        for slot_out in decoded.iter_mut().skip(pos).take(tail) {
            let slot = Coder::<C>::dec_get(states[0], p);
            let (sym_id, ds) = slot_to_symbol(slot);
            Coder::<C>::dec_advance_symbol(&mut states[0], &mut inp, &ds, p)?;
            *slot_out = sym_id;
        }

        Ok(decoded)
    }
}
