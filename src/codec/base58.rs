//! Base58 and Base58Check
//!
//! Bitcoin alphabet, big-integer encoding. Every leading zero byte maps to a
//! leading '1' and back.

use subtle::ConstantTimeEq;

use super::hash::{checksum4, CHECKSUM_LEN};
use crate::error::DecodeError;

/// Bitcoin Base58 alphabet (no 0, O, I, l)
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Encode bytes as Base58
pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode a Base58 string
pub fn base58_decode(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    if let Some((index, character)) = encoded
        .chars()
        .enumerate()
        .find(|(_, c)| !BASE58_ALPHABET.contains(*c))
    {
        return Err(DecodeError::InvalidCharacter { character, index });
    }

    bs58::decode(encoded).into_vec().map_err(|e| match e {
        bs58::decode::Error::InvalidCharacter { character, index } => {
            DecodeError::InvalidCharacter { character, index }
        }
        _ => DecodeError::InvalidCharacter {
            character: encoded.chars().next().unwrap_or_default(),
            index: 0,
        },
    })
}

/// Encode `version || payload || checksum4(version || payload)` as Base58
pub fn base58_check(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);

    let checksum = checksum4(&data);
    data.extend_from_slice(&checksum);

    base58_encode(&data)
}

/// Decode a Base58Check string into `(version, payload)`, verifying the checksum
pub fn base58_check_decode(encoded: &str) -> Result<(u8, Vec<u8>), DecodeError> {
    let data = base58_decode(encoded)?;
    let (body, checksum) = split_checksum(&data)?;

    if !verify_checksum(body, checksum) {
        return Err(DecodeError::ChecksumMismatch);
    }

    Ok((body[0], body[1..].to_vec()))
}

/// Split decoded Base58Check bytes into body and trailing checksum
pub fn split_checksum(data: &[u8]) -> Result<(&[u8], &[u8]), DecodeError> {
    // version byte + checksum at minimum
    let min = 1 + CHECKSUM_LEN;
    if data.len() < min {
        return Err(DecodeError::TooShort {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(data.split_at(data.len() - CHECKSUM_LEN))
}

/// Constant-time comparison of a trailing checksum against the recomputed one
pub fn verify_checksum(body: &[u8], checksum: &[u8]) -> bool {
    checksum4(body)[..].ct_eq(checksum).into()
}
