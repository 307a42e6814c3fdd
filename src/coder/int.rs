use num_traits::Unsigned;

/// An unsigned integer usable as rANS coder state (`u32` or `u64`).
///
/// Encoding and decoding only ever need four things from the state type: its
/// bit width, the high half of a full-width multiply (for the divisionless
/// [`crate::coder::symbol::EncSymbol`] fast path), and lossless round trips
/// through `u64` for the handful of places arithmetic is easier to express
/// generically in a fixed-width integer.
pub trait RansStateInt:
    Unsigned
    + Copy
    + PartialOrd
    + std::fmt::Debug
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::BitOr<Output = Self>
    + std::ops::BitAnd<Output = Self>
    + std::ops::Shl<u32, Output = Self>
    + std::ops::Shr<u32, Output = Self>
{
    /// Bit width of the state (32 or 64).
    const BITS: u32;

    /// The high `BITS` bits of the full `2*BITS`-bit product `self * rhs`.
    fn mul_hi(self, rhs: Self) -> Self;

    fn to_u64(self) -> u64;

    /// Truncating conversion from `u64`; callers only ever pass values already
    /// known to fit in `Self::BITS` bits.
    fn from_u64(v: u64) -> Self;
}

impl RansStateInt for u32 {
    const BITS: u32 = 32;

    fn mul_hi(self, rhs: Self) -> Self {
        (((self as u64) * (rhs as u64)) >> 32) as u32
    }

    fn to_u64(self) -> u64 {
        self as u64
    }

    fn from_u64(v: u64) -> Self {
        v as u32
    }
}

impl RansStateInt for u64 {
    const BITS: u32 = 64;

    fn mul_hi(self, rhs: Self) -> Self {
        (((self as u128) * (rhs as u128)) >> 64) as u64
    }

    fn to_u64(self) -> u64 {
        self
    }

    fn from_u64(v: u64) -> Self {
        v
    }
}
