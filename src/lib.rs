//! BIP39 to Monero Derivation Core
//!
//! Turns a BIP39 English mnemonic into a Monero 25-word mnemonic and spend
//! keypair.
//!
//! # Architecture
//!
//! This crate provides:
//! - **crypto**: PBKDF2-HMAC-SHA512, ed25519 field/point arithmetic, per-curve
//!   child key helpers
//! - **wallet**: wordlists, BIP39 checksum and seed, HD key tree, derivation
//!   paths, Monero word codec, and the end-to-end derivation
//! - **utils**: bit-string codec, hashing, logging, configuration
//!
//! Two derivation modes are supported:
//! - SLIP-0010 ed25519 at `m/44'/128'/0'`; the node key reduced mod `l` is
//!   the Monero master seed
//! - legacy BIP-44 secp256k1 at `m/44'/128'/0'/0/0`; the master seed is
//!   `cn_fast_hash` of the node key
//!
//! # Security
//!
//! This crate uses `zeroize` to clear seeds, node keys and Monero secrets from
//! memory when they are dropped. Logging redacts anything that looks like key
//! material.
//!
//! # Example
//!
//! ```rust,ignore
//! use bip39_monero_derive::wallet::{derive_monero, Wordlists};
//!
//! let wordlists = Wordlists::load()?;
//! let result = derive_monero(&[phrase], "", None, true, &wordlists)?;
//! println!("{}", result.electrum_words);
//! ```

pub mod crypto;
pub mod error;
pub mod types;
pub mod utils;
pub mod wallet;

pub use crypto::CurveKind;
pub use error::{DeriveError, DeriveResult, ErrorCode};
pub use types::*;
pub use utils::config::DeriveConfig;
pub use wallet::{derive_monero, from_master_seed, from_mnemonic, from_monero_seed, MoneroDerivation, Wordlists};
