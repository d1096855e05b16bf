//! Ed25519 Curve Operations
//!
//! Massa signs the BLAKE3 digest of a message rather than the message itself,
//! so `sign_digest`/`verify_digest` take the 32-byte hash directly.

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

use crate::error::CryptoError;

pub const PUBLIC_KEY_LEN: usize = 32;
pub const SECRET_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

/// Derive the Ed25519 public key for a 32-byte seed (RFC 8032 key generation)
///
/// SHA-512 the seed, clamp the low half, multiply the base point by it.
pub fn ed25519_public_key(seed: &[u8; SECRET_KEY_LEN]) -> [u8; PUBLIC_KEY_LEN] {
    let mut hash = Zeroizing::new([0u8; 64]);
    hash.copy_from_slice(&Sha512::digest(seed));

    let mut scalar_bytes = Zeroizing::new([0u8; 32]);
    scalar_bytes.copy_from_slice(&hash[..32]);
    scalar_bytes[0] &= 248;
    scalar_bytes[31] &= 127;
    scalar_bytes[31] |= 64;

    // the base point has prime order l, so reducing mod l keeps the product
    let scalar = Scalar::from_bytes_mod_order(*scalar_bytes);
    EdwardsPoint::mul_base(&scalar).compress().to_bytes()
}

/// Sign a 32-byte digest with a raw Ed25519 seed
pub fn sign_digest(
    secret_key: &[u8; SECRET_KEY_LEN],
    digest: &[u8; 32],
) -> Result<[u8; SIGNATURE_LEN], CryptoError> {
    let signing_key = SigningKey::from_bytes(secret_key);
    let signature = signing_key
        .try_sign(digest)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    Ok(signature.to_bytes())
}

/// Verify an Ed25519 signature over a 32-byte digest
pub fn verify_digest(
    public_key: &[u8; PUBLIC_KEY_LEN],
    digest: &[u8; 32],
    signature: &[u8; SIGNATURE_LEN],
) -> Result<bool, CryptoError> {
    let verifying_key = VerifyingKey::from_bytes(public_key)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
    let sig = Signature::from_bytes(signature);

    Ok(verifying_key.verify(digest, &sig).is_ok())
}
