use std::io::{self, Read};

use anyhow::{Context, Result};
use bip39_monero_derive::{from_mnemonic, DerivationMode, DeriveConfig, Wordlists};
use clap::Parser;
use zeroize::Zeroizing;

/// Derive a Monero 25-word mnemonic and spend keypair from a BIP39 mnemonic
#[derive(Parser)]
#[command(name = "bip39-monero-derive", version)]
struct Cli {
    /// Mnemonic words, or the whole phrase quoted; read from stdin if omitted
    words: Vec<String>,

    /// Optional BIP39 passphrase
    #[arg(long, default_value = "")]
    passphrase: String,

    /// Legacy BIP-44 secp256k1 derivation instead of SLIP-0010 ed25519
    #[arg(long)]
    legacy: bool,

    /// Derivation path (defaults to m/44'/128'/0' or m/44'/128'/0'/0/0)
    #[arg(long)]
    path: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr (also via DEBUG=1)
    #[arg(long)]
    debug: bool,

    /// Do not require a valid BIP39 checksum
    #[arg(long)]
    skip_checksum: bool,
}

fn read_stdin_phrase() -> Result<Zeroizing<String>> {
    let mut buffer = Zeroizing::new(String::new());
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read mnemonic from stdin")?;
    Ok(buffer)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let words = Zeroizing::new(cli.words);
    let passphrase = Zeroizing::new(cli.passphrase);

    let mode = if cli.legacy {
        DerivationMode::Legacy
    } else {
        DerivationMode::Slip10
    };
    let mut config = DeriveConfig::from_env()
        .with_mode(mode)
        .with_debug(cli.debug)
        .with_skip_checksum(cli.skip_checksum);
    if let Some(path) = cli.path {
        config = config.with_path(path);
    }
    config.apply();

    let wordlists = Wordlists::load()?;

    let derivation = if words.is_empty() {
        let phrase = read_stdin_phrase()?;
        from_mnemonic(&[phrase.as_str()], &passphrase, &config, &wordlists)?
    } else {
        from_mnemonic(words.as_slice(), &passphrase, &config, &wordlists)?
    };

    let report = derivation.to_report();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Mode: {}", mode);
        println!("Path: {}", report.path.as_deref().unwrap_or_else(|| config.effective_path()));
        println!("Passphrase used: {}", if report.passphrase_used { "yes" } else { "no" });
        println!("Monero master seed: {}", report.monero_master_seed);
        println!("Electrum words: {}", report.electrum_words);
        println!("Spend secret: {}", report.spend_secret);
        println!("Spend public: {}", report.spend_public);
    }

    Ok(())
}
