//! Shared types for the Massa wallet core
//!
//! Data structures that cross the FFI / CLI boundary are defined here
//! for consistent serialization.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::MassaError;
use crate::tx::{SerializationStrategy, SignedOperation};
use crate::wallet::MassaAddress;

// =============================================================================
// Network Types
// =============================================================================

/// Snapshot of node status supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub chain_id: u64,
    /// Next slot period as reported by the node
    pub next_period: u64,
}

// =============================================================================
// Transaction Types
// =============================================================================

/// Periods an operation stays valid after `next_period`
pub const DEFAULT_VALIDITY_PERIODS: u64 = 10;

/// A MAS transfer to sign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// `AU...` or `AS...` recipient
    pub recipient: String,
    /// Decimal MAS, e.g. "1.5"
    pub amount: String,
    /// Decimal MAS, e.g. "0.01"
    pub fee: String,
    /// Overrides `next_period + DEFAULT_VALIDITY_PERIODS`
    #[serde(default)]
    pub expire_period: Option<u64>,
}

impl TransferRequest {
    pub fn new(
        recipient: impl Into<String>,
        amount: impl Into<String>,
        fee: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            amount: amount.into(),
            fee: fee.into(),
            expire_period: None,
        }
    }

    pub fn with_expire_period(mut self, expire_period: u64) -> Self {
        self.expire_period = Some(expire_period);
        self
    }

    /// Expiry period to serialize for the given network status
    pub fn resolve_expire_period(&self, status: &NetworkStatus) -> u64 {
        self.expire_period
            .unwrap_or_else(|| status.next_period.saturating_add(DEFAULT_VALIDITY_PERIODS))
    }
}

/// A strategy the network refused, with its reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyRejection {
    pub strategy: SerializationStrategy,
    pub reason: String,
}

/// Result of `sign_transfer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutcome {
    /// Strategy whose operation was accepted
    pub strategy: SerializationStrategy,
    pub operation: SignedOperation,
    pub expire_period: u64,
    /// Earlier strategies, in the order they were tried
    pub rejected: Vec<StrategyRejection>,
}

// =============================================================================
// Wallet Types
// =============================================================================

/// A freshly generated wallet
///
/// SECURITY: contains the mnemonic; never log it.
#[derive(Clone, Serialize, Deserialize)]
pub struct WalletResponse {
    pub mnemonic: Zeroizing<String>,
    pub account: MassaAddress,
}

impl std::fmt::Debug for WalletResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletResponse")
            .field("mnemonic", &"[REDACTED]")
            .field("account", &self.account)
            .finish()
    }
}

/// A derived or imported key as handed to the host for storage
///
/// SECURITY: contains the `S...` private key; never log it.
#[derive(Clone, Serialize, Deserialize)]
pub struct KeyResponse {
    pub account: MassaAddress,
    pub private_key: Zeroizing<String>,
}

impl std::fmt::Debug for KeyResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyResponse")
            .field("account", &self.account)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// A single-strategy signing result for hosts that submit themselves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignResponse {
    pub strategy: SerializationStrategy,
    pub operation: SignedOperation,
    pub expire_period: u64,
    /// Strategy to retry with if the network rejects this one
    pub next_strategy: Option<SerializationStrategy>,
}

/// Outcome of mnemonic validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnemonicValidation {
    pub valid: bool,
    pub word_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// API Response
// =============================================================================

/// Envelope returned by every FFI function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<MassaError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: MassaError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"code":"internal","message":"Serialization failed"}}"#.to_string()
        })
    }
}
