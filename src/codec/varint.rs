//! Unsigned LEB128 varints
//!
//! 7 data bits per byte, least significant group first, continuation bit set
//! on every byte except the last.

use crate::error::DecodeError;

/// Maximum encoded length of a u64
pub const MAX_VARINT_LEN: usize = 10;

/// Encode a u64 as unsigned LEB128
pub fn varint_encode(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    varint_encode_into(value, &mut out);
    out
}

/// Append the LEB128 encoding of `value` to `out`
pub fn varint_encode_into(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Decode an unsigned LEB128 value from the front of `data`
///
/// Returns the value and the number of bytes consumed.
pub fn varint_decode(data: &[u8]) -> Result<(u64, usize), DecodeError> {
    let mut value: u64 = 0;

    for (i, &byte) in data.iter().enumerate().take(MAX_VARINT_LEN) {
        let bits = u64::from(byte & 0x7f);
        let shift = 7 * i as u32;

        // the tenth byte may only carry the top bit of a u64
        if i == MAX_VARINT_LEN - 1 && bits > 1 {
            return Err(DecodeError::VarintOverflow);
        }
        value |= bits << shift;

        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    if data.len() >= MAX_VARINT_LEN {
        Err(DecodeError::VarintOverflow)
    } else {
        Err(DecodeError::TruncatedVarint(data.len()))
    }
}
