//! SLIP-0010 Ed25519 Key Derivation
//!
//! Ed25519 has no public-derivation-friendly structure, so SLIP-0010 only
//! defines hardened children. Any index without the hardened bit is refused.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::ed25519::{ed25519_public_key, PUBLIC_KEY_LEN, SECRET_KEY_LEN};
use crate::error::{CryptoError, DerivationError};

type HmacSha512 = Hmac<Sha512>;

/// Hardened offset for BIP-32 style indices
pub const HARDENED: u32 = 0x8000_0000;

/// HMAC key for the master node
const MASTER_HMAC_KEY: &[u8] = b"ed25519 seed";

/// Set the hardened bit on an index
pub const fn hardened(index: u32) -> u32 {
    index | HARDENED
}

/// Whether an index carries the hardened bit
pub const fn is_hardened(index: u32) -> bool {
    index & HARDENED != 0
}

/// A node of the derivation tree
///
/// SECURITY: private key and chain code are wiped when the node is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    pub private_key: [u8; SECRET_KEY_LEN],
    pub chain_code: [u8; 32],
    pub public_key: [u8; PUBLIC_KEY_LEN],
}

impl ExtendedKey {
    fn from_hmac_output(output: &[u8; 64]) -> Self {
        let (key, chain) = output.split_at(32);

        let mut private_key = [0u8; SECRET_KEY_LEN];
        private_key.copy_from_slice(key);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(chain);
        let public_key = ed25519_public_key(&private_key);

        Self {
            private_key,
            chain_code,
            public_key,
        }
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("private_key", &"[REDACTED]")
            .field("chain_code", &"[REDACTED]")
            .field("public_key", &hex::encode(self.public_key))
            .finish()
    }
}

/// Derive the master node: `I = HMAC-SHA512("ed25519 seed", seed)`
pub fn master_key(seed: &[u8]) -> Result<ExtendedKey, CryptoError> {
    let mut mac = HmacSha512::new_from_slice(MASTER_HMAC_KEY).map_err(|_| CryptoError::Hmac)?;
    mac.update(seed);
    let mut output = Zeroizing::new([0u8; 64]);
    output.copy_from_slice(&mac.finalize().into_bytes());

    Ok(ExtendedKey::from_hmac_output(&output))
}

/// Derive a hardened child: `I = HMAC-SHA512(chain_code, 0x00 || key || ser32(index))`
///
/// The child key is `I[0..32]` directly; there is no scalar addition as in
/// secp256k1 BIP-32.
pub fn child_key(parent: &ExtendedKey, index: u32) -> Result<ExtendedKey, DerivationError> {
    if !is_hardened(index) {
        return Err(DerivationError::NonHardenedUnsupported(index));
    }

    let mut mac =
        HmacSha512::new_from_slice(&parent.chain_code).map_err(|_| CryptoError::Hmac)?;
    mac.update(&[0x00]);
    mac.update(&parent.private_key);
    mac.update(&index.to_be_bytes());
    let mut output = Zeroizing::new([0u8; 64]);
    output.copy_from_slice(&mac.finalize().into_bytes());

    Ok(ExtendedKey::from_hmac_output(&output))
}

/// Walk a sequence of (already hardened) indices from the master node
pub fn derive_path(seed: &[u8], indices: &[u32]) -> Result<ExtendedKey, DerivationError> {
    let mut node = master_key(seed)?;
    for &index in indices {
        node = child_key(&node, index)?;
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    // SLIP-0010 test vector 1 for ed25519
    const SEED: &str = "000102030405060708090a0b0c0d0e0f";

    #[test]
    fn test_slip10_master() {
        let seed = hex::decode(SEED).unwrap();
        let master = master_key(&seed).unwrap();

        assert_eq!(
            hex::encode(master.private_key),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(master.chain_code),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
        assert_eq!(
            hex::encode(master.public_key),
            "a4b2856bfec510abab89753fac1ac0e1112364e7d250545963f135f2a33188ed"
        );
    }

    #[test]
    fn test_slip10_first_hardened_child() {
        let seed = hex::decode(SEED).unwrap();
        let child = derive_path(&seed, &[hardened(0)]).unwrap();

        assert_eq!(
            hex::encode(child.private_key),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(child.chain_code),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
        assert_eq!(
            hex::encode(child.public_key),
            "8c8a13df77a28f3445213a0f432fde644acaa215fc72dcdf300d5efaa85d350c"
        );
    }

    #[test]
    fn test_non_hardened_rejected() {
        let master = master_key(&[0u8; 64]).unwrap();
        assert_eq!(
            child_key(&master, 44).unwrap_err(),
            DerivationError::NonHardenedUnsupported(44)
        );
        assert!(derive_path(&[0u8; 64], &[hardened(44), 632]).is_err());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let seed = [5u8; 64];
        let a = derive_path(&seed, &[hardened(44), hardened(632)]).unwrap();
        let b = derive_path(&seed, &[hardened(44), hardened(632)]).unwrap();
        assert_eq!(a.private_key, b.private_key);
        assert_eq!(a.public_key, b.public_key);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let master = master_key(&[1u8; 64]).unwrap();
        let debug = format!("{:?}", master);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&hex::encode(master.private_key)));
    }
}
