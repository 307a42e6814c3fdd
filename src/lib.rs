//! A range Asymmetric Numeral Systems (rANS) entropy codec.
//!
//! rANS compresses a sequence of discrete symbols to a bit rate close to the
//! Shannon entropy of their distribution and reconstructs the original
//! sequence losslessly from the compressed byte stream. This crate provides
//! the core subsystems that make that work:
//!
//! - [`stats`] — frequency/cumulative-frequency tables and rescaling to a
//!   fixed power-of-two frame.
//! - [`coder::symbol`] — precomputed per-symbol encoder/decoder descriptors
//!   (fixed-point reciprocals replacing divisions with multiply-high).
//! - [`coder`] — the rANS state machine: init/put/flush for encoding,
//!   init/get/advance/renorm for decoding, plus an interleaved multi-stream
//!   variant.
//! - [`alias`] — an O(1) alias-table decoder, an alternative to the
//!   cumulative-frequency-to-symbol table in [`model::DecModel`].
//! - [`optimal`] — a memoized convex search for the minimum-bit-cost integer
//!   frequency assignment, an alternative to [`stats::Statistics::rescale`]'s
//!   cheaper proportional rounding.
//! - [`serialize`] — the model side channel a decoder needs to rebuild
//!   [`stats::Statistics`] without re-scanning the original symbols.
//!
//! The crate is not self-synchronizing or self-delimiting: corrupted input
//! surfaces as silently wrong symbols, not as a decode error. Callers needing
//! integrity should wrap the byte stream in a checksum of their own.

pub mod alias;
pub mod coder;
pub mod error;
pub mod model;
pub mod optimal;
pub mod serialize;
pub mod stats;

pub use error::{Error, Result};
