//! secp256k1 Child Key Arithmetic
//!
//! Private children are `(I_L + k_par) mod n`, computed on big integers so
//! an `I_L` at or above the order is folded in rather than rejected. Public
//! children fold the tweak the same way so both paths agree.

use bitcoin::secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};
use num_bigint::BigUint;
use num_traits::Zero;

use super::CurveError;

/// Curve order n
const ORDER_BE: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Compressed SEC1 public key for a private key
pub fn public_key(private_key: &[u8]) -> Result<[u8; 33], CurveError> {
    let secp = Secp256k1::signing_only();
    let sk = SecretKey::from_slice(private_key)
        .map_err(|e| CurveError::InvalidPrivateKey(e.to_string()))?;
    Ok(PublicKey::from_secret_key(&secp, &sk).serialize())
}

/// Parse and validate a compressed public key
pub fn parse_public_key(public_key: &[u8]) -> Result<PublicKey, CurveError> {
    PublicKey::from_slice(public_key).map_err(|e| CurveError::InvalidPublicKey(e.to_string()))
}

/// (tweak + parent) mod n, 32-byte big-endian
pub fn add_private(tweak: &[u8], parent: &[u8]) -> Result<[u8; 32], CurveError> {
    let n = BigUint::from_bytes_be(&ORDER_BE);
    let sum = (BigUint::from_bytes_be(tweak) + BigUint::from_bytes_be(parent)) % &n;
    if sum.is_zero() {
        return Err(CurveError::InfinityPoint);
    }
    Ok(to_be32(&sum))
}

/// Left-padded 32-byte big-endian encoding of a value below n
fn to_be32(v: &BigUint) -> [u8; 32] {
    let be = v.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - be.len()..].copy_from_slice(&be);
    out
}

/// parent_pub + tweak * G, for derivation without the private key
pub fn add_public(tweak: &[u8], parent_public: &[u8]) -> Result<[u8; 33], CurveError> {
    let secp = Secp256k1::verification_only();
    let parent = parse_public_key(parent_public)?;

    if tweak.len() != 32 {
        return Err(CurveError::DerivationFailed(format!("Tweak must be 32 bytes, got {}", tweak.len())));
    }
    let n = BigUint::from_bytes_be(&ORDER_BE);
    let reduced = BigUint::from_bytes_be(tweak) % &n;
    let scalar = Scalar::from_be_bytes(to_be32(&reduced))
        .map_err(|_| CurveError::DerivationFailed("Tweak exceeds curve order".into()))?;

    // The only failure left is landing on the point at infinity
    let child = parent
        .add_exp_tweak(&secp, &scalar)
        .map_err(|_| CurveError::InfinityPoint)?;
    Ok(child.serialize())
}
