//! Monero Key Derivation
//!
//! Takes a BIP39 mnemonic all the way to a Monero spend keypair:
//!
//! 1. clean the words and check the BIP39 checksum
//! 2. PBKDF2 the phrase into a 64-byte seed
//! 3. derive an HD node (ed25519 for SLIP-0010, secp256k1 for legacy)
//! 4. turn the node key into the Monero master seed
//! 5. encode the master seed as 25 words and compute the spend keypair
//!
//! SECURITY: every intermediate secret lives in a `Zeroizing` buffer and the
//! result wipes itself on drop.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::curves;
use crate::crypto::ed25519::Scalar;
use crate::error::{DeriveError, DeriveResult};
use crate::types::{DerivationMode, DerivationReport, MoneroSpendKeys};
use crate::utils::config::DeriveConfig;
use crate::utils::crypto::cn_fast_hash;
use crate::wallet::bip39::{mnemonic_to_entropy, mnemonic_to_seed};
use crate::wallet::derivation_path::DerivationPath;
use crate::wallet::hd::ExtendedKey;
use crate::wallet::monero_mnemonic;
use crate::wallet::wordlist::{Wordlist, Wordlists};

/// Monero master seed size
pub const MONERO_SEED_LEN: usize = 32;

/// Lowercase, trim and split on whitespace.
///
/// Accepts a whole phrase as one string, a list of words, or a mix.
pub fn clean_input<S: AsRef<str>>(input: &[S]) -> Vec<String> {
    input
        .iter()
        .flat_map(|s| s.as_ref().split_whitespace())
        .map(str::to_lowercase)
        .collect()
}

/// Replace unique prefixes with the words they stand for; anything that
/// does not resolve is kept as typed.
fn expand_words(words: &[String], wordlist: &Wordlist) -> Vec<String> {
    words
        .iter()
        .map(|w| wordlist.expand(w).map(str::to_string).unwrap_or_else(|| w.clone()))
        .collect()
}

/// Monero spend keypair
pub struct MoneroKeypair {
    pub secret: Zeroizing<[u8; 32]>,
    pub public: [u8; 32],
}

impl fmt::Debug for MoneroKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoneroKeypair")
            .field("secret", &"[REDACTED]")
            .field("public", &hex::encode(self.public))
            .finish()
    }
}

/// Spend keypair for a Monero master seed: `secret = seed mod l`,
/// `public = B * secret`.
pub fn generate_monero_keys(master_seed: &[u8]) -> DeriveResult<MoneroKeypair> {
    if master_seed.len() != MONERO_SEED_LEN {
        return Err(DeriveError::invalid_entropy_length(master_seed.len()));
    }
    let scalar = Scalar::from_bytes_mod_order(master_seed);
    let public = curves::ed25519::public_key(master_seed)?;
    Ok(MoneroKeypair {
        secret: Zeroizing::new(scalar.to_bytes()),
        public,
    })
}

/// Monero master seed for an HD node key.
///
/// SLIP-0010 nodes are already ed25519 scalars and only get reduced mod `l`;
/// legacy secp256k1 keys go through `cn_fast_hash`.
pub fn monero_master_seed(node_key: &[u8; 32], mode: DerivationMode) -> Zeroizing<[u8; 32]> {
    match mode {
        DerivationMode::Slip10 => Zeroizing::new(Scalar::from_bytes_mod_order(node_key).to_bytes()),
        DerivationMode::Legacy => Zeroizing::new(cn_fast_hash(node_key)),
    }
}

/// Result of a Monero derivation
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MoneroDerivation {
    /// 25 words including the checksum word
    pub electrum_words: String,
    pub monero_master_seed: [u8; 32],
    pub spend_secret: [u8; 32],
    pub spend_public: [u8; 32],
    /// Key of the HD node the master seed came from, absent for
    /// derivations that start from a Monero seed
    pub node_private_key: Option<[u8; 32]>,
    #[zeroize(skip)]
    pub mode: Option<DerivationMode>,
    pub path: Option<String>,
    pub passphrase_used: bool,
}

impl MoneroDerivation {
    /// Hex-encoded view for display or JSON output
    pub fn to_report(&self) -> DerivationReport {
        DerivationReport {
            electrum_words: self.electrum_words.clone(),
            spend_public: hex::encode(self.spend_public),
            spend_secret: hex::encode(self.spend_secret),
            monero_master_seed: hex::encode(self.monero_master_seed),
            passphrase_used: self.passphrase_used,
            mode: self.mode,
            path: self.path.clone(),
        }
    }

    pub fn spend_keys(&self) -> MoneroSpendKeys {
        MoneroSpendKeys {
            spend_secret: hex::encode(self.spend_secret),
            spend_public: hex::encode(self.spend_public),
        }
    }

    pub fn words(&self) -> Vec<&str> {
        self.electrum_words.split(' ').collect()
    }
}

impl fmt::Debug for MoneroDerivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoneroDerivation")
            .field("spend_public", &hex::encode(self.spend_public))
            .field("mode", &self.mode)
            .field("path", &self.path)
            .field("passphrase_used", &self.passphrase_used)
            .finish_non_exhaustive()
    }
}

/// Words and spend keys for a 32-byte Monero master seed.
///
/// No BIP39 or HD step is involved, so mode and path are left empty.
pub fn from_monero_seed(master_seed: &[u8], wordlists: &Wordlists) -> DeriveResult<MoneroDerivation> {
    let keys = generate_monero_keys(master_seed)?;
    let words = monero_mnemonic::encode(master_seed, true, &wordlists.monero)?;

    let mut seed = [0u8; MONERO_SEED_LEN];
    seed.copy_from_slice(master_seed);

    Ok(MoneroDerivation {
        electrum_words: words.join(" "),
        monero_master_seed: seed,
        spend_secret: *keys.secret,
        spend_public: keys.public,
        node_private_key: None,
        mode: None,
        path: None,
        passphrase_used: false,
    })
}

/// Derive from a BIP39 seed, skipping the mnemonic and PBKDF2 steps
pub fn from_master_seed(
    seed: &[u8],
    config: &DeriveConfig,
    wordlists: &Wordlists,
) -> DeriveResult<MoneroDerivation> {
    config.validate()?;
    let path = DerivationPath::parse(config.effective_path())?;
    for warning in path.warnings() {
        crate::log_warn!("derivation", "Unusual derivation path", path = path, warning = warning);
    }

    crate::log_debug!(
        "derivation",
        "Deriving HD node",
        mode = config.mode,
        curve = config.mode.curve(),
        path = path,
    );

    let node = ExtendedKey::from_master_secret(seed, config.mode.curve())?.derive_path(&path)?;
    let node_key = node.private_key().ok_or_else(|| {
        DeriveError::private_material_required("Monero keys need a private HD node, not a public path")
    })?;

    let master = monero_master_seed(node_key, config.mode);
    let mut derivation = from_monero_seed(&master[..], wordlists)?;
    derivation.node_private_key = Some(*node_key);
    derivation.mode = Some(config.mode);
    derivation.path = Some(path.to_string());

    crate::log_debug!(
        "derivation",
        "Derived Monero spend keypair",
        spend_public = hex::encode(derivation.spend_public),
    );

    Ok(derivation)
}

/// Derive from mnemonic words and a passphrase.
///
/// Words are cleaned and unique prefixes expanded first. Unless the config
/// says otherwise the BIP39 checksum must verify.
pub fn from_mnemonic<S: AsRef<str>>(
    words: &[S],
    passphrase: &str,
    config: &DeriveConfig,
    wordlists: &Wordlists,
) -> DeriveResult<MoneroDerivation> {
    let cleaned = Zeroizing::new(clean_input(words));
    if cleaned.is_empty() {
        return Err(DeriveError::invalid_word_count(0));
    }
    let expanded = Zeroizing::new(expand_words(&cleaned, &wordlists.bip39));

    if config.skip_checksum {
        crate::log_warn!("derivation", "BIP39 checksum verification skipped");
    } else {
        mnemonic_to_entropy(expanded.as_slice(), &wordlists.bip39).map_err(|e| {
            crate::log_warn!("derivation", "Mnemonic rejected", code = format!("{:?}", e.code));
            e
        })?;
    }

    let phrase = Zeroizing::new(expanded.join(" "));
    let seed = mnemonic_to_seed(&phrase, passphrase)?;

    let mut derivation = from_master_seed(&seed[..], config, wordlists)?;
    derivation.passphrase_used = !passphrase.is_empty();
    Ok(derivation)
}

/// One-call derivation with the checksum enforced.
///
/// `path` of `None` picks `m/44'/128'/0'` for SLIP-0010 and
/// `m/44'/128'/0'/0/0` for legacy.
pub fn derive_monero<S: AsRef<str>>(
    words: &[S],
    passphrase: &str,
    path: Option<&str>,
    use_slip0010: bool,
    wordlists: &Wordlists,
) -> DeriveResult<MoneroDerivation> {
    let mode = if use_slip0010 {
        DerivationMode::Slip10
    } else {
        DerivationMode::Legacy
    };
    let mut config = DeriveConfig::default().with_mode(mode);
    if let Some(path) = path {
        config = config.with_path(path);
    }
    from_mnemonic(words, passphrase, &config, wordlists)
}
