//! Codec Module
//!
//! Pure encoding primitives shared by every other component:
//! - Base58 (Bitcoin alphabet) and Base58Check
//! - Unsigned LEB128 varints
//! - Double-SHA-256 checksums and BLAKE3-32 hashing

mod base58;
mod hash;
mod varint;

pub use base58::*;
pub use hash::*;
pub use varint::*;
