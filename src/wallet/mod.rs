//! Wallet Module
//!
//! Handles mnemonic validation, seed stretching, HD key derivation,
//! derivation paths, and the Monero word codec.

pub mod bip39;
mod derivation;
mod derivation_path;
pub mod hd;
pub mod monero_mnemonic;
pub mod wordlist;

pub use derivation::*;
pub use derivation_path::*;
pub use hd::ExtendedKey;
pub use wordlist::{PrefixPolicy, Wordlist, Wordlists};

/// Check a BIP39 phrase (any supported length) against the English list
pub fn validate_mnemonic(phrase: &str, wordlists: &Wordlists) -> bool {
    let words = clean_input(&[phrase]);
    bip39::is_valid_mnemonic(&words, &wordlists.bip39)
}

/// Decode Monero words back into the master seed and re-derive the keys
pub fn restore_from_monero_words(phrase: &str, wordlists: &Wordlists) -> crate::error::DeriveResult<MoneroDerivation> {
    let words = zeroize::Zeroizing::new(clean_input(&[phrase]));
    let seed = monero_mnemonic::decode(words.as_slice(), &wordlists.monero)?;
    from_monero_seed(&seed, wordlists)
}
