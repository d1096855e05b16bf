//! Massa Address and Key Formatting
//!
//! String encodings shared with other Massa wallets:
//! - Address: `AU` + Base58(varint(0) || blake3 hash || checksum4)
//! - Public key: `P` + Base58Check(0, pk)
//! - Private key: `S` + Base58Check(0, sk)
//!
//! Two address constructions exist. `Standard` hashes the raw public key.
//! `Legacy` hashes the version-prefixed public key, which is what deployed
//! wallets have always produced; existing user addresses depend on it.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::codec::{
    base58_check, base58_check_decode, base58_decode, blake3_32, blake3_32_parts,
    split_checksum, varint_encode, verify_checksum, CHECKSUM_LEN,
};
use crate::config::ChecksumPolicy;
use crate::crypto::{ed25519_public_key, PUBLIC_KEY_LEN, SECRET_KEY_LEN};
use crate::error::{DecodeError, ValidationError};

/// Prefix of user (externally owned) addresses
pub const USER_ADDRESS_PREFIX: &str = "AU";

/// Prefix of smart contract addresses
pub const CONTRACT_ADDRESS_PREFIX: &str = "AS";

pub const PUBLIC_KEY_PREFIX: &str = "P";
pub const PRIVATE_KEY_PREFIX: &str = "S";

/// Version byte used for addresses and keys
pub const KEY_VERSION: u8 = 0;

/// version || 32-byte payload || checksum
pub const VERSIONED_DECODED_LEN: usize = 1 + 32 + CHECKSUM_LEN;

/// How the address hash is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressFormat {
    /// blake3(pk)
    Standard,
    /// blake3(varint(0) || pk)
    #[default]
    Legacy,
}

impl std::str::FromStr for AddressFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("Unknown address format '{}'", other)),
        }
    }
}

/// Address kind, from its two-letter prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    User,
    SmartContract,
}

impl AddressKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::User => USER_ADDRESS_PREFIX,
            Self::SmartContract => CONTRACT_ADDRESS_PREFIX,
        }
    }

    /// Type byte in the wire encoding (0 for user, 1 otherwise)
    pub fn wire_type(self) -> u8 {
        match self {
            Self::User => 0,
            Self::SmartContract => 1,
        }
    }
}

/// A decoded address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAddress {
    pub kind: AddressKind,
    pub version: u8,
    pub hash: [u8; 32],
}

/// Display form of a derived or imported key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassaAddress {
    pub address: String,
    pub public_key: String,
    /// `m/44'/632'/a'/0'/i'` for derived keys, `None` for imported ones
    pub derivation_path: Option<String>,
}

impl MassaAddress {
    /// Format a public key as address + `P...` string
    pub fn from_public_key(
        public_key: &[u8; PUBLIC_KEY_LEN],
        format: AddressFormat,
        derivation_path: Option<String>,
    ) -> Self {
        Self {
            address: generate_address(public_key, format),
            public_key: public_key_string(public_key),
            derivation_path,
        }
    }
}

/// Build an `AU...` address for a public key
pub fn generate_address(public_key: &[u8; PUBLIC_KEY_LEN], format: AddressFormat) -> String {
    let version = varint_encode(u64::from(KEY_VERSION));
    let hash = match format {
        AddressFormat::Standard => blake3_32(public_key),
        AddressFormat::Legacy => blake3_32_parts(&[version.as_slice(), public_key.as_slice()]),
    };

    format!("{}{}", USER_ADDRESS_PREFIX, base58_check(KEY_VERSION, &hash))
}

/// `P` + Base58Check(0, pk)
pub fn public_key_string(public_key: &[u8; PUBLIC_KEY_LEN]) -> String {
    format!("{}{}", PUBLIC_KEY_PREFIX, base58_check(KEY_VERSION, public_key))
}

/// `S` + Base58Check(0, sk)
pub fn private_key_string(private_key: &[u8; SECRET_KEY_LEN]) -> Zeroizing<String> {
    Zeroizing::new(format!(
        "{}{}",
        PRIVATE_KEY_PREFIX,
        base58_check(KEY_VERSION, private_key)
    ))
}

/// Decode a `P...` string back into the raw public key
pub fn decode_public_key_string(s: &str) -> Result<[u8; PUBLIC_KEY_LEN], ValidationError> {
    let body = s
        .trim()
        .strip_prefix(PUBLIC_KEY_PREFIX)
        .ok_or(ValidationError::Prefix {
            expected: PUBLIC_KEY_PREFIX,
        })?;

    let (version, payload) = base58_check_decode(body)?;
    if version != KEY_VERSION {
        return Err(ValidationError::Version(version));
    }
    to_array(&payload)
}

/// Import an `S...` private key string
///
/// Returns the raw key together with its Massa address in `format`. Under
/// `ChecksumPolicy::Skip` the trailing checksum is not verified, only the
/// prefix, length and version.
pub fn import_from_private_key_string(
    s: &str,
    policy: ChecksumPolicy,
    format: AddressFormat,
) -> Result<(Zeroizing<[u8; SECRET_KEY_LEN]>, MassaAddress), ValidationError> {
    let body = s
        .trim()
        .strip_prefix(PRIVATE_KEY_PREFIX)
        .ok_or(ValidationError::Prefix {
            expected: PRIVATE_KEY_PREFIX,
        })?;

    let decoded = Zeroizing::new(base58_decode(body)?);
    if decoded.len() != VERSIONED_DECODED_LEN {
        return Err(ValidationError::Length {
            expected: VERSIONED_DECODED_LEN,
            actual: decoded.len(),
        });
    }
    if decoded[0] != KEY_VERSION {
        return Err(ValidationError::Version(decoded[0]));
    }

    if policy == ChecksumPolicy::Enforce {
        let (data, checksum) = split_checksum(&decoded)?;
        if !verify_checksum(data, checksum) {
            return Err(DecodeError::ChecksumMismatch.into());
        }
    }

    let mut private_key = Zeroizing::new([0u8; SECRET_KEY_LEN]);
    private_key.copy_from_slice(&decoded[1..1 + SECRET_KEY_LEN]);

    let public_key = ed25519_public_key(&private_key);
    let address = MassaAddress::from_public_key(&public_key, format, None);

    Ok((private_key, address))
}

/// Decode and checksum-verify an `AU...`/`AS...` address
pub fn parse_address(address: &str) -> Result<ParsedAddress, ValidationError> {
    let trimmed = address.trim();

    let (kind, body) = if let Some(body) = trimmed.strip_prefix(USER_ADDRESS_PREFIX) {
        (AddressKind::User, body)
    } else if let Some(body) = trimmed.strip_prefix(CONTRACT_ADDRESS_PREFIX) {
        (AddressKind::SmartContract, body)
    } else {
        return Err(ValidationError::AddressPrefix);
    };

    let decoded = base58_decode(body)?;
    if decoded.len() != VERSIONED_DECODED_LEN {
        return Err(ValidationError::AddressLength(decoded.len()));
    }

    let (data, checksum) = split_checksum(&decoded)?;
    if !verify_checksum(data, checksum) {
        return Err(DecodeError::ChecksumMismatch.into());
    }

    Ok(ParsedAddress {
        kind,
        version: data[0],
        hash: to_array(&data[1..])?,
    })
}

/// Whether a string is a well-formed Massa address
pub fn is_valid_address(address: &str) -> bool {
    parse_address(address).is_ok()
}

fn to_array(bytes: &[u8]) -> Result<[u8; 32], ValidationError> {
    bytes.try_into().map_err(|_| ValidationError::Length {
        expected: 32,
        actual: bytes.len(),
    })
}
