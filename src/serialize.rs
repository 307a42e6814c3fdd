use bitvec::field::BitField;
use bitvec::prelude::{BitVec, Msb0};
use bitvec::view::BitView;

use crate::error::{Error, Result};
use crate::stats::Statistics;

/// Model side-channel (component G): the minimum a decoder needs to rebuild
/// [`Statistics`] without re-scanning the original symbol sequence.
///
/// Layout: `min_symbol` (4 bytes, little-endian, signed), `N` (4 bytes,
/// little-endian, the full alphabet length including zero-frequency gaps),
/// `p` (1 byte), then `N` fixed-width frequency fields packed MSB-first and
/// padded to a byte boundary. The field width is `max(1, p+1)` bits — wide
/// enough for the single-symbol-alphabet edge case where `F[0] = 2^p`, one
/// bit past `p` itself.
const HEADER_LEN: usize = 4 + 4 + 1;

pub fn serialize(stats: &Statistics, p: u32) -> Result<Vec<u8>> {
    let min_symbol = i32::try_from(stats.min_symbol()).map_err(|_| Error::InvalidDescriptor {
        reason: format!("min_symbol {} does not fit in 32 bits", stats.min_symbol()),
    })?;
    let n = u32::try_from(stats.len()).map_err(|_| Error::InvalidDescriptor {
        reason: format!("alphabet length {} does not fit in 32 bits", stats.len()),
    })?;
    let width = field_width(p);

    let mut out = Vec::with_capacity(HEADER_LEN + (n as usize * width).div_ceil(8));
    out.extend_from_slice(&min_symbol.to_le_bytes());
    out.extend_from_slice(&n.to_le_bytes());
    out.push(p as u8);

    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(stats.len() * width);
    for &f in stats.freqs() {
        let mut field = BitVec::<u8, Msb0>::repeat(false, width);
        field.store_be(f);
        bits.extend_from_bitslice(&field);
    }

    out.extend_from_slice(bits.as_raw_slice());
    Ok(out)
}

pub fn deserialize(data: &[u8]) -> Result<Statistics> {
    if data.len() < HEADER_LEN {
        return Err(Error::InvalidDescriptor {
            reason: "model side-channel shorter than its header".to_string(),
        });
    }

    let min_symbol = i32::from_le_bytes(data[0..4].try_into().unwrap()) as i64;
    let n = u32::from_le_bytes(data[4..8].try_into().unwrap()) as usize;
    let p = data[8] as u32;
    let width = field_width(p);

    let payload = &data[HEADER_LEN..];
    let needed_bits = n * width;
    if payload.len() * 8 < needed_bits {
        return Err(Error::InvalidDescriptor {
            reason: "model side-channel truncated before the last frequency field".to_string(),
        });
    }

    let bits = payload.view_bits::<Msb0>();
    let mut freqs = Vec::with_capacity(n);
    for i in 0..n {
        let start = i * width;
        let field = &bits[start..start + width];
        freqs.push(field.load_be::<u32>());
    }

    Ok(Statistics::from_parts(min_symbol, freqs))
}

fn field_width(p: u32) -> usize {
    std::cmp::max(1, p as usize + 1)
}
