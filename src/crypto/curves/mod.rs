//! Curve Support for Hierarchical Derivation
//!
//! The key tree runs over one of two curves:
//!
//! - `secp256k1`: BIP-32, additive child keys, public derivation possible
//! - `ed25519`: SLIP-0010, hardened-only, child keys replace the parent
//!
//! Curve selection is a plain enum; the per-curve helpers live in the
//! submodules and are picked with a `match` in the key tree.

pub mod ed25519;
pub mod secp256k1;

use serde::{Deserialize, Serialize};

// MARK: - Curve Kind

/// Curves supported by the key tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// secp256k1 - BIP-32 "Bitcoin seed" tree
    Secp256k1,
    /// Ed25519 - SLIP-0010 "ed25519 seed" tree
    Ed25519,
}

impl CurveKind {
    /// Get the curve name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Self::Secp256k1 => "secp256k1",
            Self::Ed25519 => "ed25519",
        }
    }

    /// HMAC key used to derive the root node from a seed
    pub fn seed_key(&self) -> &'static [u8] {
        match self {
            Self::Secp256k1 => b"Bitcoin seed",
            Self::Ed25519 => b"ed25519 seed",
        }
    }

    /// Get the public key size in bytes (compressed for secp256k1)
    pub fn public_key_size(&self) -> usize {
        match self {
            Self::Secp256k1 => 33,
            Self::Ed25519 => 32,
        }
    }

    /// Whether non-hardened children can be derived
    pub fn supports_normal_derivation(&self) -> bool {
        matches!(self, Self::Secp256k1)
    }
}

impl std::str::FromStr for CurveKind {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "secp256k1" => Ok(Self::Secp256k1),
            "ed25519" => Ok(Self::Ed25519),
            other => Err(CurveError::UnsupportedCurve(other.to_string())),
        }
    }
}

impl std::fmt::Display for CurveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// MARK: - Curve Errors

/// Errors that can occur during curve operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid point encoding: {0}")]
    InvalidPointEncoding(String),

    #[error("Point is not on the ed25519 curve")]
    NotOnCurve,

    #[error("The point at infinity is invalid")]
    InfinityPoint,

    #[error("Scalar must be 32 bytes, got {0}")]
    InvalidScalarLength(usize),

    #[error("Point must be 32 bytes, got {0}")]
    InvalidPointLength(usize),

    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),
}

// MARK: - Tests
