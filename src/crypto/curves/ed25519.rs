//! Ed25519 Keys for SLIP-0010 Nodes
//!
//! A node's private key is the raw 32-byte `I_L`. Its scalar is `I_L` read
//! little-endian and reduced mod l, and the public key is that scalar times
//! the base point.

use super::CurveError;
use crate::crypto::ed25519::{scalarmult_base, Scalar, ENCODED_LEN};

/// Scalar for raw node key bytes
pub fn scalar_from_key(private_key: &[u8]) -> Result<Scalar, CurveError> {
    Scalar::from_slice(private_key)
}

/// Encoded public point for raw node key bytes
pub fn public_key(private_key: &[u8]) -> Result<[u8; ENCODED_LEN], CurveError> {
    let scalar = scalar_from_key(private_key)?;
    let point = scalarmult_base(&scalar);
    if point.is_identity() {
        return Err(CurveError::InfinityPoint);
    }
    Ok(point.encode())
}
