//! Wallet Configuration
//!
//! Plain owned settings passed into every wallet operation:
//! - Network selection and its chain id
//! - PBKDF2 iteration count for seed derivation
//! - Default address format for derived and imported keys
//! - Checksum policies for mnemonic and private key import
//! - Ordered serialization strategies for transfer signing

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::tx::SerializationStrategy;
use crate::wallet::mnemonic::DEFAULT_PBKDF2_ITERATIONS;
use crate::wallet::AddressFormat;

/// Massa mainnet chain id
pub const MAINNET_CHAIN_ID: u64 = 77_658_377;

/// Massa buildnet chain id
pub const BUILDNET_CHAIN_ID: u64 = 77_658_366;

/// Massa networks the wallet can sign for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Buildnet,
}

impl Network {
    pub fn chain_id(self) -> u64 {
        match self {
            Self::Mainnet => MAINNET_CHAIN_ID,
            Self::Buildnet => BUILDNET_CHAIN_ID,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Buildnet => "buildnet",
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            MAINNET_CHAIN_ID => Some(Self::Mainnet),
            BUILDNET_CHAIN_ID => Some(Self::Buildnet),
            _ => None,
        }
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "buildnet" => Ok(Self::Buildnet),
            other => Err(format!("Unknown network '{}'", other)),
        }
    }
}

/// Whether embedded checksums are verified on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumPolicy {
    /// Reject input whose checksum does not match
    #[default]
    Enforce,
    /// Accept input on structure alone (compatibility with lenient wallets)
    Skip,
}

/// Wallet settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub network: Network,
    /// PBKDF2-HMAC-SHA512 rounds for mnemonic seeds
    pub pbkdf2_iterations: u32,
    /// Address construction for derived and imported keys
    pub address_format: AddressFormat,
    pub mnemonic_checksum: ChecksumPolicy,
    /// Checksum handling for imported `S...` private keys
    pub key_checksum: ChecksumPolicy,
    /// Tried in order by `sign_transfer` until one is accepted
    pub serialization_strategies: Vec<SerializationStrategy>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl WalletConfig {
    /// Mainnet preset
    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
            address_format: AddressFormat::Legacy,
            mnemonic_checksum: ChecksumPolicy::Enforce,
            key_checksum: ChecksumPolicy::Enforce,
            serialization_strategies: SerializationStrategy::default_order(),
        }
    }

    /// Buildnet preset
    pub fn buildnet() -> Self {
        Self {
            network: Network::Buildnet,
            ..Self::mainnet()
        }
    }

    /// Accept anything lenient wallets accept (checksums skipped)
    pub fn permissive(network: Network) -> Self {
        Self {
            network,
            mnemonic_checksum: ChecksumPolicy::Skip,
            key_checksum: ChecksumPolicy::Skip,
            ..Self::mainnet()
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.network.chain_id()
    }

    /// Validate settings before use
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pbkdf2_iterations == 0 {
            return Err(ValidationError::Iterations);
        }
        if self.serialization_strategies.is_empty() {
            return Err(ValidationError::Strategies);
        }
        Ok(())
    }
}
