//! Shared types for the derivation core
//!
//! Data structures that cross module boundaries, or leave the crate through
//! the CLI's JSON output, are defined here.

use serde::{Deserialize, Serialize};

use crate::crypto::curves::CurveKind;

// =============================================================================
// Derivation Mode
// =============================================================================

/// SLIP-0010 path used for ed25519 derivation
pub const DEFAULT_SLIP0010_PATH: &str = "m/44'/128'/0'";

/// BIP-44 path used by the Ledger-compatible legacy derivation
pub const DEFAULT_BIP44_PATH: &str = "m/44'/128'/0'/0/0";

/// How the Monero master seed is obtained from the BIP39 seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DerivationMode {
    /// SLIP-0010 ed25519 tree; the node key reduced mod l is the master seed
    #[default]
    Slip10,
    /// BIP-32 secp256k1 tree; `cn_fast_hash` of the node key is the master seed
    Legacy,
}

impl DerivationMode {
    pub fn curve(&self) -> CurveKind {
        match self {
            Self::Slip10 => CurveKind::Ed25519,
            Self::Legacy => CurveKind::Secp256k1,
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            Self::Slip10 => DEFAULT_SLIP0010_PATH,
            Self::Legacy => DEFAULT_BIP44_PATH,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Slip10 => "slip10",
            Self::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for DerivationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Output Types
// =============================================================================

/// Monero spend keypair, hex encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneroSpendKeys {
    pub spend_secret: String,
    pub spend_public: String,
}

/// Everything a caller displays after a derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationReport {
    pub electrum_words: String,
    pub spend_public: String,
    pub spend_secret: String,
    pub monero_master_seed: String,
    pub passphrase_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DerivationMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
