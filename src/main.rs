use std::io::{self, BufRead};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use zeroize::Zeroizing;

use massa_wallet_core::config::{ChecksumPolicy, Network, WalletConfig};
use massa_wallet_core::tx::SerializationStrategy;
use massa_wallet_core::types::{KeyResponse, NetworkStatus, SignResponse, TransferRequest};
use massa_wallet_core::utils::logging;
use massa_wallet_core::wallet::{self, AddressFormat};
use massa_wallet_core::log_info;

const MODULE: &str = "cli";

/// Massa HD wallet: generate, derive, import and sign offline
#[derive(Parser)]
#[command(name = "massa-wallet-core", version)]
struct Cli {
    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log request details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct WalletArgs {
    /// Network (mainnet, buildnet)
    #[arg(long, default_value = "mainnet")]
    network: Network,

    /// Address construction (legacy, standard)
    #[arg(long, default_value = "legacy")]
    format: AddressFormat,

    /// Accept input whose embedded checksum does not match
    #[arg(long)]
    skip_checksum: bool,
}

impl WalletArgs {
    fn config(&self) -> WalletConfig {
        let policy = if self.skip_checksum {
            ChecksumPolicy::Skip
        } else {
            ChecksumPolicy::Enforce
        };
        WalletConfig {
            network: self.network,
            address_format: self.format,
            mnemonic_checksum: policy,
            key_checksum: policy,
            ..WalletConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new mnemonic and its first address
    Generate {
        /// Number of words (12 or 24)
        #[arg(long, default_value_t = 12)]
        words: usize,

        #[command(flatten)]
        opts: WalletArgs,
    },
    /// Derive an address from a mnemonic (read from stdin when omitted)
    Derive {
        #[arg(long)]
        mnemonic: Option<String>,

        #[arg(long, default_value = "")]
        passphrase: String,

        #[arg(long, default_value_t = 0)]
        account: u32,

        #[arg(long, default_value_t = 0)]
        index: u32,

        #[command(flatten)]
        opts: WalletArgs,
    },
    /// Show the address of an `S...` private key
    Import {
        private_key: String,

        #[command(flatten)]
        opts: WalletArgs,
    },
    /// Sign a MAS transfer for submission
    Sign {
        /// `S...` private key of the sender
        #[arg(long)]
        private_key: String,

        /// Recipient address
        #[arg(long)]
        to: String,

        /// Amount in MAS (e.g. 1.5)
        #[arg(long)]
        amount: String,

        /// Fee in MAS (e.g. 0.01)
        #[arg(long, default_value = "0")]
        fee: String,

        /// Next period reported by the node
        #[arg(long)]
        next_period: u64,

        /// Explicit expiry period (defaults to next period + 10)
        #[arg(long)]
        expire_period: Option<u64>,

        /// Serialization strategy (current, legacy)
        #[arg(long, default_value = "current")]
        strategy: String,

        #[command(flatten)]
        opts: WalletArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_from_env();
    if cli.verbose {
        logging::enable_debug();
    }

    match cli.command {
        Command::Generate { words, opts } => generate(words, &opts.config(), cli.json),
        Command::Derive {
            mnemonic,
            passphrase,
            account,
            index,
            opts,
        } => {
            let phrase = match mnemonic {
                Some(phrase) => Zeroizing::new(phrase),
                None => read_stdin_line().context("Failed to read mnemonic from stdin")?,
            };
            let passphrase = Zeroizing::new(passphrase);
            derive(&phrase, &passphrase, account, index, &opts.config(), cli.json)
        }
        Command::Import {
            private_key,
            opts,
        } => {
            let private_key = Zeroizing::new(private_key);
            import(&private_key, &opts.config(), cli.json)
        }
        Command::Sign {
            private_key,
            to,
            amount,
            fee,
            next_period,
            expire_period,
            strategy,
            opts,
        } => {
            let private_key = Zeroizing::new(private_key);
            let strategy = parse_strategy(&strategy)?;
            let mut request = TransferRequest::new(to, amount, fee);
            request.expire_period = expire_period;
            sign(
                &private_key,
                &request,
                next_period,
                strategy,
                &opts.config(),
                cli.json,
            )
        }
    }
}

fn generate(words: usize, config: &WalletConfig, json: bool) -> Result<()> {
    let created = wallet::create_wallet(words, config).context("Failed to generate wallet")?;
    log_info!(MODULE, "Wallet generated", address = created.account.address);

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        println!("Mnemonic: {}", created.mnemonic.as_str());
        print_account(&created.account);
    }
    Ok(())
}

fn derive(
    phrase: &str,
    passphrase: &str,
    account: u32,
    index: u32,
    config: &WalletConfig,
    json: bool,
) -> Result<()> {
    let key = wallet::restore_wallet(phrase, passphrase, account, index, config)
        .context("Failed to derive key")?;
    let response = KeyResponse {
        private_key: wallet::private_key_string(&key.private_key),
        account: key.address,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_account(&response.account);
        println!("Private key: {}", response.private_key.as_str());
    }
    Ok(())
}

fn import(private_key: &str, config: &WalletConfig, json: bool) -> Result<()> {
    let (_, account) =
        wallet::import_private_key(private_key, config).context("Failed to import private key")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&account)?);
    } else {
        print_account(&account);
    }
    Ok(())
}

fn sign(
    private_key: &str,
    request: &TransferRequest,
    next_period: u64,
    strategy: SerializationStrategy,
    config: &WalletConfig,
    json: bool,
) -> Result<()> {
    let (key, _) =
        wallet::import_private_key(private_key, config).context("Failed to import private key")?;
    let status = NetworkStatus {
        chain_id: config.chain_id(),
        next_period,
    };

    let order = &config.serialization_strategies;
    let next_strategy = order
        .iter()
        .position(|s| *s == strategy)
        .and_then(|i| order.get(i + 1))
        .copied();

    let single = WalletConfig {
        serialization_strategies: vec![strategy],
        ..config.clone()
    };
    let outcome = wallet::sign_transfer(&key, request, &status, &single, |_, _| Ok(()))
        .context("Failed to sign transfer")?;
    log_info!(
        MODULE,
        "Transfer signed",
        recipient = request.recipient,
        amount = request.amount,
        strategy = outcome.strategy,
    );

    let response = SignResponse {
        strategy: outcome.strategy,
        operation: outcome.operation,
        expire_period: outcome.expire_period,
        next_strategy,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("Creator public key: {}", response.operation.creator_public_key);
        println!("Signature: {}", response.operation.signature);
        println!(
            "Serialized content: {}",
            hex::encode(&response.operation.serialized_content)
        );
        println!("Expire period: {}", response.expire_period);
        println!("Strategy: {}", response.strategy);
    }
    Ok(())
}

fn print_account(account: &wallet::MassaAddress) {
    println!("Address: {}", account.address);
    println!("Public key: {}", account.public_key);
    if let Some(path) = &account.derivation_path {
        println!("Derivation path: {}", path);
    }
}

fn parse_strategy(s: &str) -> Result<SerializationStrategy> {
    match s.to_ascii_lowercase().as_str() {
        "current" => Ok(SerializationStrategy::Current),
        "legacy" => Ok(SerializationStrategy::Legacy),
        other => Err(anyhow!("Unknown serialization strategy '{}'", other)),
    }
}

fn read_stdin_line() -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    io::stdin().lock().read_line(&mut line)?;
    if line.trim().is_empty() {
        bail!("No mnemonic given");
    }
    Ok(line)
}
