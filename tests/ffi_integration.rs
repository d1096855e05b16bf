//! FFI Integration Tests
//!
//! Drives the C-ABI exports the way a mobile host does:
//! - Wallet creation and restore
//! - Key import under both checksum policies
//! - Transfer signing with strategy fallback
//! - Error envelopes

use massa_wallet_core::codec::{base58_decode, base58_encode};
use massa_wallet_core::ffi::*;
use massa_wallet_core::{
    ErrorCode, KeyResponse, MassaAddress, MassaError, MnemonicValidation, SignResponse,
    WalletResponse,
};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

const ABANDON_12: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const SECRET_KEY: &str = "S1erANgziQrtH6KWhQEXzyLhnQeo5HVsWhv5Qj9hNtLxBGn7PSV";
const LEGACY_ADDRESS: &str = "AU12HZrAy4GVZfiPfY4VMLRucGP8rj2J4rKU9CykjNzzovRrSrsoU";

// MARK: - Helper Functions

fn call_ffi(func: extern "C" fn(*const c_char) -> *mut c_char, input: &str) -> String {
    let c_input = CString::new(input).unwrap();
    let result = func(c_input.as_ptr());
    assert!(!result.is_null());
    let output = unsafe { CStr::from_ptr(result) }
        .to_string_lossy()
        .into_owned();
    massa_free_string(result);
    output
}

fn parse_result<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, MassaError> {
    #[derive(serde::Deserialize)]
    struct Response<T> {
        success: bool,
        data: Option<T>,
        error: Option<MassaError>,
    }

    let response: Response<T> =
        serde_json::from_str(json).unwrap_or_else(|e| panic!("Parse error: {} in {}", e, json));

    if response.success {
        Ok(response.data.expect("No data in response"))
    } else {
        Err(response.error.expect("No error in failed response"))
    }
}

fn sign_request(strategy: Option<&str>, chain_id: u64, network: &str) -> String {
    let strategy = strategy
        .map(|s| format!(r#""strategy": "{}","#, s))
        .unwrap_or_default();
    format!(
        r#"{{
            "private_key": "{}",
            "transfer": {{ "recipient": "{}", "amount": "1.5", "fee": "0.01" }},
            "status": {{ "chain_id": {}, "next_period": 990 }},
            {}
            "config": {{ "network": "{}" }}
        }}"#,
        SECRET_KEY, LEGACY_ADDRESS, chain_id, strategy, network
    )
}

// MARK: - Wallet Tests

#[test]
fn test_generated_wallet_restores_same_account() {
    let created: WalletResponse =
        parse_result(&call_ffi(massa_generate_wallet, r#"{"word_count": 24}"#)).unwrap();
    assert_eq!(created.mnemonic.split(' ').count(), 24);

    let input = serde_json::json!({ "mnemonic": created.mnemonic }).to_string();
    let restored: KeyResponse = parse_result(&call_ffi(massa_restore_wallet, &input)).unwrap();
    assert_eq!(restored.account, created.account);
    assert!(restored.private_key.starts_with('S'));
}

#[test]
fn test_restore_with_passphrase_changes_account() {
    let plain = serde_json::json!({ "mnemonic": ABANDON_12 }).to_string();
    let salted = serde_json::json!({ "mnemonic": ABANDON_12, "passphrase": "TREZOR" }).to_string();

    let plain: KeyResponse = parse_result(&call_ffi(massa_restore_wallet, &plain)).unwrap();
    let salted: KeyResponse = parse_result(&call_ffi(massa_restore_wallet, &salted)).unwrap();

    assert_eq!(
        plain.account.address,
        "AU1gySkK4GW5vRWeyuhqx7XowRsYpxQYcaYsu7jL5MKrSy9thHHG"
    );
    assert_ne!(plain.account.address, salted.account.address);
    assert_ne!(plain.private_key, salted.private_key);
}

#[test]
fn test_restore_rejects_unhardenable_index() {
    let input = serde_json::json!({ "mnemonic": ABANDON_12, "index": 0x8000_0000u32 }).to_string();
    let err = parse_result::<KeyResponse>(&call_ffi(massa_restore_wallet, &input)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_validate_mnemonic_reports_reason() {
    let input = serde_json::json!({ "mnemonic": "abandon zzzz" }).to_string();
    let result: MnemonicValidation =
        parse_result(&call_ffi(massa_validate_mnemonic, &input)).unwrap();
    assert!(!result.valid);
    assert!(result.error.is_some());

    let input = serde_json::json!({ "mnemonic": ABANDON_12 }).to_string();
    let result: MnemonicValidation =
        parse_result(&call_ffi(massa_validate_mnemonic, &input)).unwrap();
    assert!(result.valid);
    assert_eq!(result.word_count, 12);
}

// MARK: - Import Tests

fn key_with_zeroed_checksum() -> String {
    let mut raw = base58_decode(&SECRET_KEY[1..]).unwrap();
    let len = raw.len();
    raw[len - 4..].copy_from_slice(&[0, 0, 0, 0]);
    format!("S{}", base58_encode(&raw))
}

#[test]
fn test_import_checksum_policies() {
    let broken = key_with_zeroed_checksum();

    let strict = serde_json::json!({ "private_key": broken }).to_string();
    let err = parse_result::<MassaAddress>(&call_ffi(massa_import_private_key, &strict)).unwrap_err();
    assert_eq!(err.code, ErrorCode::DecodeError);

    let lenient = serde_json::json!({
        "private_key": broken,
        "config": { "key_checksum": "skip" }
    })
    .to_string();
    let account: MassaAddress =
        parse_result(&call_ffi(massa_import_private_key, &lenient)).unwrap();
    assert_eq!(account.address, LEGACY_ADDRESS);
}

#[test]
fn test_import_rejects_wrong_prefix() {
    let input = serde_json::json!({ "private_key": LEGACY_ADDRESS }).to_string();
    let err = parse_result::<MassaAddress>(&call_ffi(massa_import_private_key, &input)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidPrivateKey);
}

// MARK: - Signing Tests

#[test]
fn test_strategy_fallback_flow() {
    let first: SignResponse =
        parse_result(&call_ffi(massa_sign_transfer, &sign_request(None, 77658377, "mainnet")))
            .unwrap();
    assert_eq!(first.strategy.name(), "current");
    assert_eq!(first.expire_period, 1000);
    assert_eq!(
        first.operation.signature,
        "1HLKgRFRP5poweiHtpUxEhFJQpAsmgzBBPmbr2oyaF614escoqbJCbMBWagUzz8YNcYyYjkACathvGHQkZLRKbok1bxrrq"
    );

    // host got a rejection and retries with the suggested strategy
    let next = first.next_strategy.expect("a fallback strategy").name();
    let retry: SignResponse = parse_result(&call_ffi(
        massa_sign_transfer,
        &sign_request(Some(next), 77658377, "mainnet"),
    ))
    .unwrap();
    assert_eq!(retry.strategy.name(), "legacy");
    assert_eq!(retry.next_strategy, None);
    assert_eq!(
        retry.operation.serialized_content,
        first.operation.serialized_content
    );
}

#[test]
fn test_buildnet_signature_differs() {
    let mainnet: SignResponse =
        parse_result(&call_ffi(massa_sign_transfer, &sign_request(None, 77658377, "mainnet")))
            .unwrap();
    let buildnet: SignResponse = parse_result(&call_ffi(
        massa_sign_transfer,
        &sign_request(None, 77658366, "buildnet"),
    ))
    .unwrap();

    assert_eq!(
        mainnet.operation.serialized_content,
        buildnet.operation.serialized_content
    );
    assert_ne!(mainnet.operation.signature, buildnet.operation.signature);
}

#[test]
fn test_chain_id_mismatch_rejected() {
    let err = parse_result::<SignResponse>(&call_ffi(
        massa_sign_transfer,
        &sign_request(None, 77658366, "mainnet"),
    ))
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.message.contains("77658366"));
}

#[test]
fn test_bad_amount_error_code() {
    let input = sign_request(None, 77658377, "mainnet").replace("\"1.5\"", "\"1.2.3\"");
    let err = parse_result::<SignResponse>(&call_ffi(massa_sign_transfer, &input)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidAmount);
}

#[test]
fn test_malformed_json_error_code() {
    let err = parse_result::<SignResponse>(&call_ffi(massa_sign_transfer, "{ not json")).unwrap_err();
    assert_eq!(err.code, ErrorCode::ParseError);
}
