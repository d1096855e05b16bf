//! Wallet Module
//!
//! Mnemonic handling, key derivation, address formatting, amount conversion
//! and the high-level wallet operations the FFI and CLI are built on.

pub mod mnemonic;
mod address;
mod amount;
mod derivation;
mod derivation_path;
mod store;

pub use address::*;
pub use amount::*;
pub use derivation::*;
pub use derivation_path::*;
pub use store::*;

use zeroize::Zeroizing;

use crate::config::{Network, WalletConfig};
use crate::crypto::SECRET_KEY_LEN;
use crate::error::{MassaError, MassaResult, TransactionError};
use crate::tx::{sign_operation, Operation, SerializationStrategy, SignedOperation};
use crate::types::{NetworkStatus, StrategyRejection, TransferOutcome, TransferRequest, WalletResponse};

/// Generate a new mnemonic and its first account (`m/44'/632'/0'/0'/0'`)
pub fn create_wallet(word_count: usize, config: &WalletConfig) -> MassaResult<WalletResponse> {
    config.validate()?;

    let mnemonic = Zeroizing::new(mnemonic::generate(word_count)?.join(" "));
    let key = derive_from_mnemonic(
        &mnemonic,
        "",
        &MassaPath::default(),
        config.address_format,
        config.pbkdf2_iterations,
    )?;

    Ok(WalletResponse {
        mnemonic,
        account: key.address,
    })
}

/// Re-derive the key at `account`/`index` from an existing mnemonic
pub fn restore_wallet(
    phrase: &str,
    passphrase: &str,
    account: u32,
    index: u32,
    config: &WalletConfig,
) -> MassaResult<DerivedKey> {
    config.validate()?;
    mnemonic::check(phrase, config.mnemonic_checksum)?;

    let path = MassaPath::new(account, index)?;
    Ok(derive_from_mnemonic(
        phrase,
        passphrase,
        &path,
        config.address_format,
        config.pbkdf2_iterations,
    )?)
}

/// Import an `S...` private key string
pub fn import_private_key(
    s: &str,
    config: &WalletConfig,
) -> MassaResult<(Zeroizing<[u8; SECRET_KEY_LEN]>, MassaAddress)> {
    Ok(import_from_private_key_string(
        s,
        config.key_checksum,
        config.address_format,
    )?)
}

/// Sign a transfer, trying serialization strategies in configured order
///
/// `accept` submits each candidate and returns `Err(reason)` when the network
/// rejects it; the next strategy is tried only after a rejection. The outcome
/// names the strategy that was accepted and every rejection before it.
pub fn sign_transfer<F>(
    private_key: &[u8; SECRET_KEY_LEN],
    request: &TransferRequest,
    status: &NetworkStatus,
    config: &WalletConfig,
    mut accept: F,
) -> MassaResult<TransferOutcome>
where
    F: FnMut(SerializationStrategy, &SignedOperation) -> Result<(), String>,
{
    config.validate()?;
    if status.chain_id != config.chain_id() {
        let reported = Network::from_chain_id(status.chain_id)
            .map(Network::name)
            .unwrap_or("unknown network");
        return Err(MassaError::invalid_input(format!(
            "Node reports chain id {} ({}) but wallet is configured for {} ({})",
            status.chain_id,
            reported,
            config.network.name(),
            config.chain_id()
        )));
    }

    let expire_period = request.resolve_expire_period(status);
    let operation = Operation::transfer(
        expire_period,
        &request.fee,
        &request.recipient,
        &request.amount,
    )?;

    let mut rejected = Vec::new();
    for &strategy in &config.serialization_strategies {
        let signed = sign_operation(private_key, &operation, status.chain_id, strategy)
            .map_err(TransactionError::from)?;

        match accept(strategy, &signed) {
            Ok(()) => {
                return Ok(TransferOutcome {
                    strategy,
                    operation: signed,
                    expire_period,
                    rejected,
                })
            }
            Err(reason) => rejected.push(StrategyRejection { strategy, reason }),
        }
    }

    let last_reason = rejected
        .last()
        .map(|r| r.reason.clone())
        .unwrap_or_default();
    Err(TransactionError::Rejected {
        attempts: rejected.len(),
        last_reason,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChecksumPolicy, Network};
    use crate::error::ErrorCode;
    use crate::tx::{build_signing_message, decode_signature_string, verify};

    const ABANDON_12: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const VECTOR_KEY: &str = "S1erANgziQrtH6KWhQEXzyLhnQeo5HVsWhv5Qj9hNtLxBGn7PSV";
    const RECIPIENT: &str = "AU12HZrAy4GVZfiPfY4VMLRucGP8rj2J4rKU9CykjNzzovRrSrsoU";

    fn mainnet_status() -> NetworkStatus {
        NetworkStatus {
            chain_id: 77_658_377,
            next_period: 990,
        }
    }

    #[test]
    fn test_create_wallet() {
        let config = WalletConfig::default();
        let wallet = create_wallet(24, &config).unwrap();
        assert_eq!(wallet.mnemonic.split(' ').count(), 24);
        assert!(mnemonic::validate(&wallet.mnemonic));

        let restored = restore_wallet(&wallet.mnemonic, "", 0, 0, &config).unwrap();
        assert_eq!(restored.address, wallet.account);

        assert_eq!(
            create_wallet(13, &config).unwrap_err().code,
            ErrorCode::InvalidMnemonic
        );
    }

    #[test]
    fn test_restore_respects_checksum_policy() {
        let bad_checksum = ABANDON_12.replace("about", "abandon");

        let err = restore_wallet(&bad_checksum, "", 0, 0, &WalletConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMnemonic);

        let lenient = WalletConfig::permissive(Network::Mainnet);
        assert_eq!(lenient.mnemonic_checksum, ChecksumPolicy::Skip);
        assert!(restore_wallet(&bad_checksum, "", 0, 0, &lenient).is_ok());
    }

    #[test]
    fn test_restore_vector() {
        let key = restore_wallet(ABANDON_12, "", 0, 0, &WalletConfig::default()).unwrap();
        assert_eq!(key.address.address, "AU1gySkK4GW5vRWeyuhqx7XowRsYpxQYcaYsu7jL5MKrSy9thHHG");
    }

    #[test]
    fn test_import_private_key() {
        let (_, address) = import_private_key(VECTOR_KEY, &WalletConfig::default()).unwrap();
        assert_eq!(address.address, RECIPIENT);

        let err = import_private_key("P12uBYzKKNVSuB6pE7LU5QkRMY3KTgQBtcUKZd6u61746tCn6e5A", &WalletConfig::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrivateKey);
    }

    #[test]
    fn test_sign_transfer_first_strategy_accepted() {
        let config = WalletConfig::default();
        let (sk, _) = import_private_key(VECTOR_KEY, &config).unwrap();
        let request = TransferRequest::new(RECIPIENT, "1.5", "0.01");

        let mut seen = Vec::new();
        let outcome = sign_transfer(&sk, &request, &mainnet_status(), &config, |strategy, _| {
            seen.push(strategy);
            Ok(())
        })
        .unwrap();

        assert_eq!(seen, vec![SerializationStrategy::Current]);
        assert_eq!(outcome.strategy, SerializationStrategy::Current);
        assert_eq!(outcome.expire_period, 1000);
        assert!(outcome.rejected.is_empty());
        assert_eq!(
            outcome.operation.signature,
            "1HLKgRFRP5poweiHtpUxEhFJQpAsmgzBBPmbr2oyaF614escoqbJCbMBWagUzz8YNcYyYjkACathvGHQkZLRKbok1bxrrq"
        );

        let pk = decode_public_key_string(&outcome.operation.creator_public_key).unwrap();
        let message = build_signing_message(77_658_377, &pk, &outcome.operation.serialized_content);
        let signature = decode_signature_string(&outcome.operation.signature).unwrap();
        assert!(verify(&pk, &message, &signature));
    }

    #[test]
    fn test_sign_transfer_falls_through_in_order() {
        let config = WalletConfig::default();
        let (sk, _) = import_private_key(VECTOR_KEY, &config).unwrap();
        let request = TransferRequest::new(RECIPIENT, "1", "0").with_expire_period(5);

        let outcome = sign_transfer(&sk, &request, &mainnet_status(), &config, |strategy, _| {
            match strategy {
                SerializationStrategy::Current => Err("invalid operation".to_string()),
                SerializationStrategy::Legacy => Ok(()),
            }
        })
        .unwrap();

        assert_eq!(outcome.strategy, SerializationStrategy::Legacy);
        assert_eq!(
            outcome.rejected,
            vec![StrategyRejection {
                strategy: SerializationStrategy::Current,
                reason: "invalid operation".into(),
            }]
        );
    }

    #[test]
    fn test_sign_transfer_all_rejected() {
        let config = WalletConfig::default();
        let (sk, _) = import_private_key(VECTOR_KEY, &config).unwrap();
        let request = TransferRequest::new(RECIPIENT, "1", "0");

        let err = sign_transfer(&sk, &request, &mainnet_status(), &config, |_, _| {
            Err("node says no".to_string())
        })
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::Rejected);
        assert!(err.message.contains("All 2 serialization strategies"));
        assert!(err.message.contains("node says no"));
    }

    #[test]
    fn test_sign_transfer_chain_mismatch() {
        let (sk, _) = import_private_key(VECTOR_KEY, &WalletConfig::default()).unwrap();
        let request = TransferRequest::new(RECIPIENT, "1", "0");

        let err = sign_transfer(
            &sk,
            &request,
            &mainnet_status(),
            &WalletConfig::buildnet(),
            |_, _| Ok(()),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("77658377 (mainnet)"));

        let unknown = NetworkStatus {
            chain_id: 1,
            next_period: 990,
        };
        let err = sign_transfer(&sk, &request, &unknown, &WalletConfig::default(), |_, _| Ok(()))
            .unwrap_err();
        assert!(err.message.contains("1 (unknown network)"));
    }

    #[test]
    fn test_sign_transfer_bad_amount() {
        let (sk, _) = import_private_key(VECTOR_KEY, &WalletConfig::default()).unwrap();
        let request = TransferRequest::new(RECIPIENT, "0.1234567891", "0");

        let err = sign_transfer(&sk, &request, &mainnet_status(), &WalletConfig::default(), |_, _| {
            Ok(())
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
    }
}
