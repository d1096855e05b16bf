//! Key Derivation
//!
//! Derives Massa keys from a BIP-39 mnemonic along `m/44'/632'/a'/0'/i'`.
//!
//! SECURITY: seeds and extended keys are zeroized when dropped.

use zeroize::Zeroizing;

use super::address::{AddressFormat, MassaAddress};
use super::derivation_path::MassaPath;
use super::mnemonic::{seed_from_mnemonic_with_iterations, DEFAULT_PBKDF2_ITERATIONS};
use crate::crypto::{derive_path, ExtendedKey, SECRET_KEY_LEN};
use crate::error::DerivationError;

/// A derived key pair with its display form
pub struct DerivedKey {
    pub private_key: Zeroizing<[u8; SECRET_KEY_LEN]>,
    pub public_key: [u8; 32],
    pub address: MassaAddress,
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("private_key", &"[REDACTED]")
            .field("address", &self.address)
            .finish()
    }
}

/// Walk the Massa path from a 64-byte seed
pub fn derive_key(seed: &[u8], path: &MassaPath) -> Result<ExtendedKey, DerivationError> {
    derive_path(seed, &path.indices())
}

/// Derive the key pair and address for a mnemonic at `path`
pub fn derive_from_mnemonic(
    mnemonic: &str,
    passphrase: &str,
    path: &MassaPath,
    format: AddressFormat,
    iterations: u32,
) -> Result<DerivedKey, DerivationError> {
    let seed = seed_from_mnemonic_with_iterations(mnemonic, passphrase, iterations)?;
    let node = derive_key(seed.as_slice(), path)?;

    Ok(DerivedKey {
        private_key: Zeroizing::new(node.private_key),
        public_key: node.public_key,
        address: MassaAddress::from_public_key(
            &node.public_key,
            format,
            Some(path.to_string()),
        ),
    })
}

/// Derive the address at `m/44'/632'/account'/0'/index'`
///
/// Uses the legacy address construction and 2048 PBKDF2 rounds, matching the
/// addresses existing wallets show for the same phrase.
pub fn derive_address(
    mnemonic: &str,
    passphrase: &str,
    account: u32,
    index: u32,
) -> Result<MassaAddress, DerivationError> {
    let path = MassaPath::new(account, index)?;
    derive_from_mnemonic(
        mnemonic,
        passphrase,
        &path,
        AddressFormat::Legacy,
        DEFAULT_PBKDF2_ITERATIONS,
    )
    .map(|key| key.address)
}
