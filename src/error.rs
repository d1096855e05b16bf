//! Unified error types for the Massa wallet core
//!
//! Each component reports failures through its own typed family so callers
//! can match precisely. The `MassaError` envelope collapses any family into a
//! serializable code + message pair for the FFI and CLI boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Malformed Base58 / varint / checksum input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid base58 character '{character}' at index {index}")]
    InvalidCharacter { character: char, index: usize },

    #[error("Varint is truncated after {0} bytes")]
    TruncatedVarint(usize),

    #[error("Varint does not fit in 64 bits")]
    VarintOverflow,

    #[error("Payload too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("Checksum mismatch")]
    ChecksumMismatch,
}

/// Input that decodes but violates a wallet rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Mnemonic must have 12 or 24 words, got {0}")]
    WordCount(usize),

    #[error("Word '{0}' is not in the BIP-39 English wordlist")]
    UnknownWord(String),

    #[error("Mnemonic checksum does not match")]
    MnemonicChecksum,

    #[error("Entropy must be 16 or 32 bytes, got {0}")]
    EntropyLength(usize),

    #[error("Expected prefix '{expected}'")]
    Prefix { expected: &'static str },

    #[error("Expected {expected} decoded bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("Unsupported version byte {0}")]
    Version(u8),

    #[error("Address must start with 'AU' or 'AS'")]
    AddressPrefix,

    #[error("Address decodes to {0} bytes, expected 37")]
    AddressLength(usize),

    #[error("Invalid derivation path: {0}")]
    DerivationPath(String),

    #[error("PBKDF2 iteration count must be positive")]
    Iterations,

    #[error("At least one serialization strategy is required")]
    Strategies,

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Key derivation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DerivationError {
    #[error("Index {0:#010x} is not hardened; SLIP-10 Ed25519 supports hardened derivation only")]
    NonHardenedUnsupported(u32),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Decimal amount conversion failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("Amount '{0}' is not a decimal number")]
    Format(String),

    #[error("Amount has {0} fractional digits; at most 9 are allowed")]
    Precision(usize),

    #[error("Amount does not fit in 63 bits of nanoMAS")]
    Overflow,
}

/// Unexpected failures inside the signing primitives
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("HMAC initialisation failed")]
    Hmac,
}

/// Operation building, signing and submission failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    #[error(transparent)]
    Amount(#[from] ArithmeticError),

    #[error(transparent)]
    Address(#[from] ValidationError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("All {attempts} serialization strategies were rejected; last reason: {last_reason}")]
    Rejected { attempts: usize, last_reason: String },
}

/// Failures reported by a `SecretStore` backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Secret store unavailable: {0}")]
    Backend(String),

    #[error("Stored secret '{name}' is corrupt: {reason}")]
    Corrupt { name: String, reason: String },
}

/// Main error type crossing the FFI / CLI boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassaError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl MassaError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, msg)
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Rejected, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for MassaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for MassaError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    InvalidInput,
    DecodeError,
    InvalidMnemonic,
    InvalidPrivateKey,
    InvalidAddress,
    InvalidAmount,

    // Key errors
    DerivationError,
    CryptoError,

    // Submission and storage
    Rejected,
    StorageError,

    // Parse errors
    ParseError,

    // Internal
    Internal,
}

/// Result type alias for boundary operations
pub type MassaResult<T> = Result<T, MassaError>;

impl From<DecodeError> for MassaError {
    fn from(e: DecodeError) -> Self {
        MassaError::new(ErrorCode::DecodeError, e.to_string())
    }
}

impl From<ValidationError> for MassaError {
    fn from(e: ValidationError) -> Self {
        let code = match e {
            ValidationError::Decode(_) => ErrorCode::DecodeError,
            ValidationError::WordCount(_)
            | ValidationError::UnknownWord(_)
            | ValidationError::MnemonicChecksum
            | ValidationError::EntropyLength(_) => ErrorCode::InvalidMnemonic,
            ValidationError::Prefix { .. }
            | ValidationError::Length { .. }
            | ValidationError::Version(_) => ErrorCode::InvalidPrivateKey,
            ValidationError::AddressPrefix | ValidationError::AddressLength(_) => {
                ErrorCode::InvalidAddress
            }
            ValidationError::DerivationPath(_)
            | ValidationError::Iterations
            | ValidationError::Strategies => {
                ErrorCode::InvalidInput
            }
        };
        MassaError::new(code, e.to_string())
    }
}

impl From<DerivationError> for MassaError {
    fn from(e: DerivationError) -> Self {
        match e {
            DerivationError::Validation(inner) => inner.into(),
            DerivationError::Crypto(inner) => inner.into(),
            other => MassaError::new(ErrorCode::DerivationError, other.to_string()),
        }
    }
}

impl From<ArithmeticError> for MassaError {
    fn from(e: ArithmeticError) -> Self {
        MassaError::new(ErrorCode::InvalidAmount, e.to_string())
    }
}

impl From<CryptoError> for MassaError {
    fn from(e: CryptoError) -> Self {
        MassaError::new(ErrorCode::CryptoError, e.to_string())
    }
}

impl From<TransactionError> for MassaError {
    fn from(e: TransactionError) -> Self {
        match e {
            TransactionError::Amount(inner) => inner.into(),
            TransactionError::Address(inner) => inner.into(),
            TransactionError::Crypto(inner) => inner.into(),
            rejected @ TransactionError::Rejected { .. } => {
                MassaError::rejected(rejected.to_string())
            }
        }
    }
}

impl From<StoreError> for MassaError {
    fn from(e: StoreError) -> Self {
        MassaError::new(ErrorCode::StorageError, e.to_string())
    }
}

impl From<serde_json::Error> for MassaError {
    fn from(e: serde_json::Error) -> Self {
        MassaError::parse_error(format!("Invalid JSON: {}", e))
    }
}
