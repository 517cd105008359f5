use std::{fs, path::PathBuf};

use alloy_primitives::{Address, Bytes, U256};
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use k256::ecdsa::SigningKey;
use tracing::info;
use tracing_subscriber::EnvFilter;

use social_guard_wallet_core::{meta_transaction_digest, Eip712Domain, MetaTransaction};
use social_guard_wallet_signer::{
    build_signed,
    calldata::meta_transaction_digest_calldata,
    signer::{address_of, parse_signing_key, random_nonce},
};

/// Sign SocialGuard wallet meta-transactions as the owner.
///
/// Output is JSON on stdout so a relayer can pick it up; logs go to stderr (`RUST_LOG`).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the address controlled by the signing key.
    Address(KeyArgs),
    /// Print the EIP-712 digest for a transfer without signing it, plus `metaTransactionDigest`
    /// calldata to compare against the deployed wallet with `eth_call`.
    Digest {
        #[command(flatten)]
        domain: DomainArgs,
        #[command(flatten)]
        transfer: TransferArgs,
    },
    /// Sign a transfer and print the relay payload.
    Sign {
        #[command(flatten)]
        key: KeyArgs,
        #[command(flatten)]
        domain: DomainArgs,
        #[command(flatten)]
        transfer: TransferArgs,
    },
}

#[derive(Args, Debug)]
struct KeyArgs {
    /// Path to a file containing the owner private key.
    #[arg(long, env = "SIGNER_KEY_PATH", conflicts_with = "key")]
    key_path: Option<PathBuf>,

    /// Owner private key (hex string, 0x...).
    #[arg(long, env = "SIGNER_KEY", conflicts_with = "key_path")]
    key: Option<String>,
}

#[derive(Args, Debug)]
struct DomainArgs {
    /// Chain the wallet is deployed on.
    #[arg(long, env = "CHAIN_ID")]
    chain_id: u64,

    /// Wallet contract address.
    #[arg(long, env = "WALLET_ADDRESS")]
    wallet: Address,
}

#[derive(Args, Debug)]
struct TransferArgs {
    /// Recipient.
    #[arg(long)]
    to: Address,

    /// Amount in wei (decimal or 0x-hex).
    #[arg(long, default_value = "0")]
    value: U256,

    /// Call payload forwarded to the recipient (hex).
    #[arg(long, default_value = "0x")]
    data: String,

    /// Nonce; a random one is drawn when omitted.
    #[arg(long)]
    nonce: Option<U256>,
}

impl KeyArgs {
    fn load(&self) -> Result<SigningKey> {
        let raw = match (&self.key_path, &self.key) {
            (Some(path), _) => fs::read_to_string(path)
                .with_context(|| format!("failed to read key file {}", path.display()))?,
            (None, Some(key)) => key.clone(),
            (None, None) => {
                return Err(anyhow!(
                    "missing signing key: provide --key-path or --key (or set SIGNER_KEY_PATH/SIGNER_KEY)"
                ))
            }
        };
        parse_signing_key(&raw)
    }
}

impl DomainArgs {
    fn domain(&self) -> Eip712Domain {
        Eip712Domain::new(self.chain_id, self.wallet)
    }
}

impl TransferArgs {
    fn meta_transaction(&self) -> Result<MetaTransaction> {
        let raw = self.data.strip_prefix("0x").unwrap_or(&self.data);
        let data = hex::decode(raw).context("--data is not valid hex")?;
        Ok(MetaTransaction {
            to: self.to,
            value: self.value,
            data,
            nonce: self.nonce.unwrap_or_else(random_nonce),
        })
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Address(key) => {
            let key = key.load()?;
            println!("{}", address_of(key.verifying_key()));
        }
        Command::Digest { domain, transfer } => {
            let tx = transfer.meta_transaction()?;
            let digest = meta_transaction_digest(&domain.domain(), &tx);
            let out = serde_json::json!({
                "digest": digest,
                "nonce": tx.nonce,
                "domainSeparator": domain.domain().separator(),
                "digestCalldata": Bytes::from(meta_transaction_digest_calldata(&tx)),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Sign { key, domain, transfer } => {
            let key = key.load()?;
            let tx = transfer.meta_transaction()?;
            let signed = build_signed(&key, &domain.domain(), &tx)?;
            info!(
                wallet = %signed.wallet,
                to = %signed.to,
                value = %signed.value,
                nonce = %signed.nonce,
                "signed meta-transaction"
            );
            println!("{}", serde_json::to_string_pretty(&signed)?);
        }
    }
    Ok(())
}
