//! Hash functions
//!
//! Massa uses two unrelated hashes: BLAKE3 for addresses and signing digests,
//! and Bitcoin-style double SHA-256 for the 4-byte Base58Check checksum.

use sha2::{Digest, Sha256};

/// Length of the Base58Check checksum suffix
pub const CHECKSUM_LEN: usize = 4;

/// First four bytes of SHA-256(SHA-256(data))
pub fn checksum4(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);

    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&second[..CHECKSUM_LEN]);
    out
}

/// BLAKE3 with a 32-byte output
pub fn blake3_32(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// BLAKE3 over the concatenation of several slices, without an intermediate buffer
pub fn blake3_32_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}
