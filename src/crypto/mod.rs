//! Cryptographic primitives for the Massa wallet
//!
//! - Ed25519 key generation, signing and verification over BLAKE3 digests
//! - SLIP-0010 hardened-only key derivation

pub mod ed25519;
pub mod slip10;

pub use ed25519::*;
pub use slip10::*;
