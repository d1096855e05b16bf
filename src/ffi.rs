//! FFI Layer for the Massa wallet core
//!
//! All C-ABI exports are defined here. Every function follows the same shape:
//! - Input: JSON string (null-terminated C string)
//! - Output: JSON string (must be freed with `massa_free_string`)
//!
//! Error handling: every response carries a `success` field. On error,
//! `success: false` and the `error` object holds a snake_case `code` plus a
//! message.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use serde::Deserialize;
use zeroize::Zeroizing;

use crate::config::{ChecksumPolicy, WalletConfig};
use crate::error::{MassaError, MassaResult};
use crate::tx::SerializationStrategy;
use crate::types::*;
use crate::wallet::{self, mnemonic};
use crate::{log_debug, log_info, log_warn};

const MODULE: &str = "ffi";

// =============================================================================
// Memory Management
// =============================================================================

/// Free a string returned by any massa_* function
///
/// # Safety
/// The pointer must have been returned by a massa_* function and not freed yet
#[unsafe(no_mangle)]
pub extern "C" fn massa_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(s));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Copy a C string into an owned, zeroize-on-drop Rust string
fn parse_input(input: *const c_char) -> MassaResult<Zeroizing<String>> {
    if input.is_null() {
        return Err(MassaError::invalid_input("Null input pointer"));
    }

    let c_str = unsafe { CStr::from_ptr(input) };
    c_str
        .to_str()
        .map(|s| Zeroizing::new(s.to_string()))
        .map_err(|_| MassaError::invalid_input("Invalid UTF-8 string"))
}

/// Parse a JSON request; a null pointer or blank string means `{}`
fn parse_request<T: for<'de> Deserialize<'de>>(input: *const c_char, allow_empty: bool) -> MassaResult<T> {
    let json = if input.is_null() && allow_empty {
        Zeroizing::new(String::new())
    } else {
        parse_input(input)?
    };

    let body = if json.trim().is_empty() && allow_empty {
        "{}"
    } else {
        json.as_str()
    };

    Ok(serde_json::from_str(body)?)
}

/// Serialize a result into the `ApiResponse` envelope
fn respond<T: serde::Serialize>(operation: &'static str, result: MassaResult<T>) -> *mut c_char {
    let json = match result {
        Ok(data) => {
            log_debug!(MODULE, "Request succeeded", operation = operation);
            ApiResponse::ok(data).to_json()
        }
        Err(error) => {
            log_warn!(
                MODULE,
                "Request failed",
                operation = operation,
                code = format!("{:?}", error.code),
            );
            ApiResponse::<()>::err(error).to_json()
        }
    };
    string_to_ptr(json)
}

/// Convert Rust string to C string pointer
fn string_to_ptr(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => {
            let fallback =
                ApiResponse::<()>::err(MassaError::internal("String conversion failed")).to_json();
            CString::new(fallback)
                .map(CString::into_raw)
                .unwrap_or(std::ptr::null_mut())
        }
    }
}

// =============================================================================
// Wallet Operations
// =============================================================================

/// Generate a new mnemonic and its first account
///
/// # Input
/// ```json
/// { "word_count": 24, "config": { "network": "mainnet" } }
/// ```
/// Both fields are optional; a null pointer behaves like `{}` (12 words).
///
/// # Output
/// ```json
/// {
///   "success": true,
///   "data": {
///     "mnemonic": "word1 word2 ...",
///     "account": { "address": "AU...", "public_key": "P...", "derivation_path": "m/44'/632'/0'/0'/0'" }
///   }
/// }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn massa_generate_wallet(input: *const c_char) -> *mut c_char {
    #[derive(Deserialize)]
    struct GenerateRequest {
        #[serde(default = "default_word_count")]
        word_count: usize,
        #[serde(default)]
        config: WalletConfig,
    }

    fn default_word_count() -> usize {
        12
    }

    let result = parse_request::<GenerateRequest>(input, true).and_then(|request| {
        let wallet = wallet::create_wallet(request.word_count, &request.config)?;
        log_info!(
            MODULE,
            "Wallet generated",
            words = request.word_count,
            address = wallet.account.address,
        );
        Ok(wallet)
    });

    respond("generate_wallet", result)
}

/// Re-derive a key from a mnemonic
///
/// # Input
/// ```json
/// { "mnemonic": "word1 ...", "passphrase": "", "account": 0, "index": 0, "config": {} }
/// ```
///
/// # Output
/// ```json
/// { "success": true, "data": { "account": { "address": "AU...", ... }, "private_key": "S..." } }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn massa_restore_wallet(input: *const c_char) -> *mut c_char {
    #[derive(Deserialize)]
    struct RestoreRequest {
        mnemonic: Zeroizing<String>,
        #[serde(default)]
        passphrase: Zeroizing<String>,
        #[serde(default)]
        account: u32,
        #[serde(default)]
        index: u32,
        #[serde(default)]
        config: WalletConfig,
    }

    let result = parse_request::<RestoreRequest>(input, false).and_then(|request| {
        let key = wallet::restore_wallet(
            &request.mnemonic,
            &request.passphrase,
            request.account,
            request.index,
            &request.config,
        )?;
        log_info!(
            MODULE,
            "Wallet restored",
            account = request.account,
            index = request.index,
            address = key.address.address,
        );
        Ok(KeyResponse {
            private_key: wallet::private_key_string(&key.private_key),
            account: key.address,
        })
    });

    respond("restore_wallet", result)
}

/// Check a mnemonic phrase
///
/// # Input
/// ```json
/// { "mnemonic": "word1 ...", "checksum": "enforce" }
/// ```
///
/// # Output
/// ```json
/// { "success": true, "data": { "valid": false, "word_count": 12, "error": "Mnemonic checksum does not match" } }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn massa_validate_mnemonic(input: *const c_char) -> *mut c_char {
    #[derive(Deserialize)]
    struct ValidateRequest {
        mnemonic: Zeroizing<String>,
        #[serde(default)]
        checksum: ChecksumPolicy,
    }

    let result = parse_request::<ValidateRequest>(input, false).map(|request| {
        let word_count = request.mnemonic.split_whitespace().count();
        match mnemonic::check(&request.mnemonic, request.checksum) {
            Ok(()) => MnemonicValidation {
                valid: true,
                word_count,
                error: None,
            },
            Err(e) => MnemonicValidation {
                valid: false,
                word_count,
                error: Some(e.to_string()),
            },
        }
    });

    respond("validate_mnemonic", result)
}

/// Import an `S...` private key
///
/// # Input
/// ```json
/// { "private_key": "S1...", "config": { "key_checksum": "skip" } }
/// ```
///
/// # Output
/// ```json
/// { "success": true, "data": { "address": "AU...", "public_key": "P...", "derivation_path": null } }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn massa_import_private_key(input: *const c_char) -> *mut c_char {
    #[derive(Deserialize)]
    struct ImportRequest {
        private_key: Zeroizing<String>,
        #[serde(default)]
        config: WalletConfig,
    }

    let result = parse_request::<ImportRequest>(input, false).and_then(|request| {
        let (_, address) = wallet::import_private_key(&request.private_key, &request.config)?;
        log_info!(MODULE, "Private key imported", address = address.address);
        Ok(address)
    });

    respond("import_private_key", result)
}

/// Sign a transfer with one serialization strategy
///
/// The host submits the operation itself. When the network rejects it, the
/// host calls again with `strategy` set to the returned `next_strategy`.
///
/// # Input
/// ```json
/// {
///   "private_key": "S1...",
///   "transfer": { "recipient": "AU...", "amount": "1.5", "fee": "0.01" },
///   "status": { "chain_id": 77658377, "next_period": 990 },
///   "strategy": "current",
///   "config": {}
/// }
/// ```
///
/// # Output
/// ```json
/// {
///   "success": true,
///   "data": {
///     "strategy": "current",
///     "operation": { "creator_public_key": "P...", "signature": "1...", "serialized_content": [128, ...] },
///     "expire_period": 1000,
///     "next_strategy": "legacy"
///   }
/// }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn massa_sign_transfer(input: *const c_char) -> *mut c_char {
    #[derive(Deserialize)]
    struct SignRequest {
        private_key: Zeroizing<String>,
        transfer: TransferRequest,
        status: NetworkStatus,
        #[serde(default)]
        strategy: Option<SerializationStrategy>,
        #[serde(default)]
        config: WalletConfig,
    }

    let result = parse_request::<SignRequest>(input, false).and_then(|request| {
        let order = &request.config.serialization_strategies;
        let strategy = match request.strategy {
            Some(strategy) => strategy,
            None => *order
                .first()
                .ok_or_else(|| MassaError::invalid_input("No serialization strategy configured"))?,
        };
        let next_strategy = order
            .iter()
            .position(|s| *s == strategy)
            .and_then(|i| order.get(i + 1))
            .copied();

        let (private_key, _) = wallet::import_private_key(&request.private_key, &request.config)?;
        let single = WalletConfig {
            serialization_strategies: vec![strategy],
            ..request.config.clone()
        };
        let outcome = wallet::sign_transfer(
            &private_key,
            &request.transfer,
            &request.status,
            &single,
            |_, _| Ok(()),
        )?;

        log_info!(
            MODULE,
            "Transfer signed",
            strategy = outcome.strategy,
            recipient = request.transfer.recipient,
            amount = request.transfer.amount,
            expire_period = outcome.expire_period,
            signature = outcome.operation.signature,
        );

        Ok(SignResponse {
            strategy: outcome.strategy,
            operation: outcome.operation,
            expire_period: outcome.expire_period,
            next_strategy,
        })
    });

    respond("sign_transfer", result)
}
