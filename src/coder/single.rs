use std::marker::PhantomData;

use crate::coder::config::Config;
use crate::coder::int::RansStateInt;
use crate::coder::io::{BackwardWriter, ForwardReader};
use crate::coder::symbol::{DecSymbol, EncSymbol};
use crate::error::Result;

/// Namespace for the six rANS primitives (component D), generic over a
/// [`Config`] binding state width to stream granularity.
///
/// Carries no data of its own — every method takes the coder state
/// explicitly, so a caller can run any number of independent states against
/// one shared [`BackwardWriter`]/[`ForwardReader`] (see
/// [`crate::coder::interleaved`]).
pub struct Coder<C>(PhantomData<C>);

impl<C: Config> Coder<C> {
    pub fn enc_init() -> C::State {
        C::State::from_u64(C::L)
    }

    /// Encodes one symbol by `(start, freq)`, performing the division
    /// directly. Bit-identical to [`Self::enc_put_symbol`] for the same
    /// inputs; kept for symbols whose descriptor wasn't precomputed.
    pub fn enc_put(
        x: &mut C::State,
        out: &mut BackwardWriter<C::Granule>,
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
            Self::emit_granule(out, xv & mask)?;
            xv >>= b;
        }

        let q = xv / freq as u64;
        let r = xv - q * freq as u64;
        *x = C::State::from_u64((q << p) + r + start as u64);
        Ok(())
    }

    /// Encodes one symbol using its precomputed [`EncSymbol`] descriptor,
    /// replacing the division with a multiply-high.
    pub fn enc_put_symbol(
        x: &mut C::State,
        out: &mut BackwardWriter<C::Granule>,
        sym: &EncSymbol<C>,
        p: u32,
    ) -> Result<()> {
        let b = C::GRANULE_BITS;
        let mask = (1u64 << b) - 1;
        let x_max = ((C::L >> p) << b) * sym.freq as u64;

        let mut xv = x.to_u64();
        while xv >= x_max {
            Self::emit_granule(out, xv & mask)?;
            xv >>= b;
        }

        let xstate = C::State::from_u64(xv);
        let q = xstate.mul_hi(sym.rcp_freq) >> sym.rcp_shift;
        let bias = C::State::from_u64(sym.bias as u64);
        let cmpl = C::State::from_u64(sym.cmpl_freq as u64);
        *x = xstate + bias + q * cmpl;
        Ok(())
    }

    pub fn enc_flush(x: C::State, out: &mut BackwardWriter<C::Granule>) -> Result<()> {
        let b = C::GRANULE_BITS;
        let granules = C::State::BITS / b;
        let xv = x.to_u64();
        let mask = (1u64 << b) - 1;

        for k in (0..granules).rev() {
            Self::emit_granule(out, (xv >> (k * b)) & mask)?;
        }
        Ok(())
    }

    pub fn dec_init(inp: &mut ForwardReader<C::Granule>) -> Result<C::State> {
        let b = C::GRANULE_BITS;
        let granules = C::State::BITS / b;
        let mut xv = 0u64;

        for k in 0..granules {
            let g = inp.pop()?;
            xv |= g.into() << (k * b);
        }
        Ok(C::State::from_u64(xv))
    }

    /// The cumulative-frequency slot the current state maps to; feed this
    /// into a cum-to-symbol lookup (table or alias) to find the symbol.
    pub fn dec_get(x: C::State, p: u32) -> u32 {
        (x.to_u64() & ((1u64 << p) - 1)) as u32
    }

    /// Inverts one encode step for a decoded `(start, freq)` and
    /// renormalizes. Equivalent to [`Self::dec_advance_step`] followed by
    /// [`Self::dec_renorm`], provided for the common single-stream case.
    pub fn dec_advance(
        x: &mut C::State,
        inp: &mut ForwardReader<C::Granule>,
        start: u32,
        freq: u32,
        p: u32,
    ) -> Result<()> {
        Self::dec_advance_step(x, start, freq, p);
        Self::dec_renorm(x, inp)
    }

    pub fn dec_advance_symbol(
        x: &mut C::State,
        inp: &mut ForwardReader<C::Granule>,
        sym: &DecSymbol,
        p: u32,
    ) -> Result<()> {
        Self::dec_advance(x, inp, sym.start, sym.freq, p)
    }

    /// Inverts one encode step without renormalizing; used by
    /// [`crate::coder::interleaved::InterleavedCoder`] to defer
    /// renormalization of a whole group of states to one pass.
    pub fn dec_advance_step(x: &mut C::State, start: u32, freq: u32, p: u32) {
        let xv = x.to_u64();
        let slot = xv & ((1u64 << p) - 1);
        let new_x = freq as u64 * (xv >> p) + slot - start as u64;
        *x = C::State::from_u64(new_x);
    }

    pub fn dec_renorm(x: &mut C::State, inp: &mut ForwardReader<C::Granule>) -> Result<()> {
        let b = C::GRANULE_BITS;
        let mut xv = x.to_u64();
        while xv < C::L {
            let g = inp.pop()?;
            xv = (xv << b) | g.into();
        }
        *x = C::State::from_u64(xv);
        Ok(())
    }

    fn emit_granule(out: &mut BackwardWriter<C::Granule>, v: u64) -> Result<()> {
        let granule = C::Granule::try_from(v)
            .ok()
            .expect("granule value always fits GRANULE_BITS by construction");
        out.push(granule)
    }
}
