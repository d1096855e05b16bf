//! Massa Wallet Core Library
//!
//! Hierarchical-deterministic wallet engine for the Massa blockchain.
//!
//! # Architecture
//!
//! This crate provides:
//! - **codec**: Base58/Base58Check, LEB128 varints, checksums, BLAKE3
//! - **crypto**: Ed25519 keys and signatures, SLIP-0010 derivation
//! - **wallet**: Mnemonics, derivation paths, address/key strings, amounts
//! - **tx**: Operation serialization and signing
//! - **config**: Network and compatibility settings
//! - **ffi**: C-ABI exports for mobile and desktop hosts
//!
//! # FFI Usage
//!
//! All public FFI functions are in the `ffi` module and follow this pattern:
//! - Input: JSON string (null-terminated C string)
//! - Output: JSON string (must be freed with `massa_free_string`)
//!
//! # Security
//!
//! This crate uses `zeroize` to clear sensitive data from memory.
//! Private keys, seeds and entropy held by the core are zeroed when dropped.
//!
//! # Example
//!
//! ```rust,no_run
//! use massa_wallet_core::{config::WalletConfig, wallet};
//!
//! let config = WalletConfig::default();
//! let created = wallet::create_wallet(12, &config)?;
//! let key = wallet::restore_wallet(&created.mnemonic, "", 0, 0, &config)?;
//! assert_eq!(key.address, created.account);
//! # Ok::<(), massa_wallet_core::MassaError>(())
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod ffi;
pub mod tx;
pub mod types;
pub mod utils;
pub mod wallet;

// Re-export key types for convenience
pub use config::{ChecksumPolicy, Network, WalletConfig};
pub use error::{ErrorCode, MassaError, MassaResult};
pub use types::*;

pub use tx::{SerializationStrategy, SignedOperation};
pub use wallet::{
    create_wallet, derive_address, import_private_key, restore_wallet, sign_transfer,
    AddressFormat, MassaAddress, MassaPath,
};

// Re-export FFI functions at crate root
pub use ffi::{
    massa_free_string, massa_generate_wallet, massa_import_private_key, massa_restore_wallet,
    massa_sign_transfer, massa_validate_mnemonic,
};
