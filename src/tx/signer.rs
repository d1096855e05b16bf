//! Operation Signer
//!
//! Massa signs the BLAKE3 digest of
//! `BE64(chain_id) || version(0) || public_key || operation_bytes`
//! with Ed25519. The signature travels as Base58Check(0, sig) without a
//! letter prefix.

use serde::{Deserialize, Serialize};

use crate::codec::{base58_check, base58_check_decode, blake3_32};
use crate::crypto::{
    ed25519_public_key, sign_digest, verify_digest, PUBLIC_KEY_LEN, SECRET_KEY_LEN,
    SIGNATURE_LEN,
};
use crate::error::{CryptoError, ValidationError};
use crate::wallet::{public_key_string, KEY_VERSION};

use super::builder::{Operation, SerializationStrategy};

/// A signed operation ready for `send_operations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOperation {
    /// `P...` string of the signer
    pub creator_public_key: String,
    /// Base58Check signature, no prefix
    pub signature: String,
    /// Operation bytes that were signed (without chain id or public key)
    pub serialized_content: Vec<u8>,
}

/// Assemble the byte string whose BLAKE3 digest gets signed
pub fn build_signing_message(
    chain_id: u64,
    public_key: &[u8; PUBLIC_KEY_LEN],
    operation: &[u8],
) -> Vec<u8> {
    let mut message = Vec::with_capacity(8 + 1 + PUBLIC_KEY_LEN + operation.len());
    message.extend_from_slice(&chain_id.to_be_bytes());
    message.push(KEY_VERSION);
    message.extend_from_slice(public_key);
    message.extend_from_slice(operation);
    message
}

/// Ed25519 signature over `blake3_32(message)`
pub fn sign(
    private_key: &[u8; SECRET_KEY_LEN],
    message: &[u8],
) -> Result<[u8; SIGNATURE_LEN], CryptoError> {
    sign_digest(private_key, &blake3_32(message))
}

/// Check a signature produced by `sign`
///
/// An undecodable public key counts as a failed verification.
pub fn verify(
    public_key: &[u8; PUBLIC_KEY_LEN],
    message: &[u8],
    signature: &[u8; SIGNATURE_LEN],
) -> bool {
    verify_digest(public_key, &blake3_32(message), signature).unwrap_or(false)
}

/// Package public key, signature and content for submission
pub fn encode_signed_operation(
    public_key: &[u8; PUBLIC_KEY_LEN],
    signature: &[u8; SIGNATURE_LEN],
    operation: &[u8],
) -> SignedOperation {
    SignedOperation {
        creator_public_key: public_key_string(public_key),
        signature: base58_check(KEY_VERSION, signature),
        serialized_content: operation.to_vec(),
    }
}

/// Decode a signature string back into raw bytes
pub fn decode_signature_string(s: &str) -> Result<[u8; SIGNATURE_LEN], ValidationError> {
    let (version, payload) = base58_check_decode(s.trim())?;
    if version != KEY_VERSION {
        return Err(ValidationError::Version(version));
    }
    payload
        .as_slice()
        .try_into()
        .map_err(|_| ValidationError::Length {
            expected: SIGNATURE_LEN,
            actual: payload.len(),
        })
}

/// Serialize, sign and package an operation in one step
pub fn sign_operation(
    private_key: &[u8; SECRET_KEY_LEN],
    operation: &Operation,
    chain_id: u64,
    strategy: SerializationStrategy,
) -> Result<SignedOperation, CryptoError> {
    let public_key = ed25519_public_key(private_key);
    let content = operation.to_bytes(strategy);

    let message = build_signing_message(chain_id, &public_key, &content);
    let signature = sign(private_key, &message)?;

    Ok(encode_signed_operation(&public_key, &signature, &content))
}
