use crate::coder::int::RansStateInt;

/// Binds a coder state type to a stream granule type and the normalization
/// interval lower bound `L`, as a zero-sized marker.
///
/// The three implementors below are the three historically-supported
/// configurations of the reference coder this crate generalizes: byte-stream
/// 32-bit state, word-stream 32-bit state, and word-stream 64-bit state. `L`
/// does not follow one formula across all three (`2^23`, `2^16`, `2^31`), so
/// each is spelled out rather than derived.
pub trait Config {
    type State: RansStateInt;
    type Granule: Copy + Into<u64> + TryFrom<u64>;

    /// Lower bound of the normalization interval `[L, L*B)`.
    const L: u64;

    /// Bits per emitted/consumed granule (8, 16, or 32).
    const GRANULE_BITS: u32;
}

/// 32-bit state, byte-granular stream. `L = 2^23`.
#[derive(Clone, Copy, Debug)]
pub struct Rans32Byte;

impl Config for Rans32Byte {
    type State = u32;
    type Granule = u8;
    const L: u64 = 1 << 23;
    const GRANULE_BITS: u32 = 8;
}

/// 32-bit state, 16-bit-word-granular stream. `L = 2^16`, matching this
/// crate's native frame-size bound (`p <= 16`): a single renormalization step
/// per symbol suffices, never a loop.
#[derive(Clone, Copy, Debug)]
pub struct Rans32Word;

impl Config for Rans32Word {
    type State = u32;
    type Granule = u16;
    const L: u64 = 1 << 16;
    const GRANULE_BITS: u32 = 16;
}

/// 64-bit state, 32-bit-word-granular stream. `L = 2^31`.
#[derive(Clone, Copy, Debug)]
pub struct Rans64Word32;

impl Config for Rans64Word32 {
    type State = u64;
    type Granule = u32;
    const L: u64 = 1 << 31;
    const GRANULE_BITS: u32 = 32;
}
