use thiserror::Error;

/// Errors produced while building or using the statistics, descriptor and
/// alias-table types in this crate.
///
/// Encode/decode hot paths (see [`crate::coder`]) do not return errors: by the
/// time a descriptor exists it has already been validated here, and a corrupt
/// byte stream is simply undetectable by the coder kernel alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// [`crate::stats::Statistics::build`] was called with zero symbols.
    #[error("cannot build a frequency table from an empty symbol sequence")]
    EmptyInput,

    /// The requested frame size is too small to hold one slot per distinct
    /// symbol, or no donor with spare slots could be found during rescale.
    #[error("frame size 2^{log2_m} cannot represent {symbols} distinct symbols")]
    ModelCapacity { log2_m: u32, symbols: usize },

    /// A symbol descriptor would be invalid: `start + freq` overflowed the
    /// frame, `freq` was zero for a symbol the caller intends to encode, or
    /// the requested probability-bit count `p` fell outside `1..=16`.
    #[error("invalid symbol descriptor: {reason}")]
    InvalidDescriptor { reason: String },

    /// Alias-table construction requires `frame_size % bucket_count == 0`.
    #[error("frame size {frame_size} is not divisible by bucket count {buckets}")]
    AliasNotDivisible { frame_size: u32, buckets: usize },

    /// The encoder ran out of room in the caller-provided output buffer.
    #[error("output buffer exhausted after writing {written} granules")]
    BufferExhausted { written: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
