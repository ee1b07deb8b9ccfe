//! Cryptographic primitives for the derivation core
//!
//! This module provides the low-level pieces the key tree and the Monero
//! keypair are built from:
//! - PBKDF2-HMAC-SHA512 seed stretching
//! - Ed25519 scalar and point arithmetic
//! - Per-curve child key helpers (secp256k1, ed25519)

pub mod curves;
pub mod ed25519;
pub mod pbkdf2;

pub use curves::{CurveError, CurveKind};
pub use ed25519::{scalarmult_base, EdPoint, Scalar};
pub use pbkdf2::{pbkdf2_hmac_sha512, BIP39_PBKDF2_ROUNDS};
