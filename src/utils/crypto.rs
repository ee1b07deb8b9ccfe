//! Hash Primitives
//!
//! Thin wrappers over the hash crates so the derivation code reads in terms
//! of the operations it performs rather than hasher plumbing.

use bitcoin::hashes::{hash160, Hash};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use tiny_keccak::{Hasher, Keccak};

use crate::error::{DeriveError, DeriveResult};

pub type HmacSha512 = Hmac<Sha512>;

/// Keccak-256 with the original (pre-SHA3) padding
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// CryptoNote's `cn_fast_hash`, which is plain Keccak-256.
pub fn cn_fast_hash(data: &[u8]) -> [u8; 32] {
    keccak256(data)
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    let digest = Sha256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    hash160::Hash::hash(data).to_byte_array()
}

/// Keyed HMAC-SHA512 instance, ready for `update` calls
pub fn hmac_sha512_keyed(key: &[u8]) -> DeriveResult<HmacSha512> {
    HmacSha512::new_from_slice(key).map_err(|e| DeriveError::crypto_error(e.to_string()))
}

/// One-shot HMAC-SHA512
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> DeriveResult<[u8; 64]> {
    let mut mac = hmac_sha512_keyed(key)?;
    mac.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// IEEE CRC32 as used by zlib
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hash160_vector() {
        // Compressed public key of BIP32 test vector 1 master node
        let pubkey = hex::decode("0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2").unwrap();
        assert_eq!(hex::encode(hash160(&pubkey)), "3442193e1bb70916e914552172cd4e2dbc9df811");
    }

    #[test]
    fn test_crc32_check_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF43926);
    }

    #[test]
    fn test_hmac_sha512_rfc4231_case2() {
        let out = hmac_sha512(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            hex::encode(out),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea2505549758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }
}
