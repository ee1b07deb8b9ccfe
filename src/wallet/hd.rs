//! Hierarchical Deterministic Key Tree
//!
//! One node type for both BIP-32 (secp256k1) and SLIP-0010 (ed25519) trees.
//! Nodes are immutable; deriving a child returns a new node.
//!
//! Differences between the curves:
//! - secp256k1 children are `(I_L + k_par) mod n`; normal (non-hardened)
//!   derivation works from the public key alone
//! - ed25519 children take `I_L` as their key outright and only hardened
//!   derivation exists

use std::fmt;

use hmac::Mac;
use zeroize::Zeroizing;

use crate::crypto::curves::{self, CurveError, CurveKind};
use crate::error::{DeriveError, DeriveResult};
use crate::utils::crypto::{hash160, hmac_sha512, hmac_sha512_keyed};
use crate::wallet::derivation_path::{DerivationPath, HARDENED};

/// BIP-32 seed size bounds in bytes
const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

/// Extended key node
#[derive(Clone)]
pub struct ExtendedKey {
    curve: CurveKind,
    private_key: Option<Zeroizing<[u8; 32]>>,
    public_key: Vec<u8>,
    chain_code: Zeroizing<[u8; 32]>,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
}

fn split_hmac(i: &[u8; 64]) -> (Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>) {
    let mut il = Zeroizing::new([0u8; 32]);
    let mut ir = Zeroizing::new([0u8; 32]);
    il.copy_from_slice(&i[..32]);
    ir.copy_from_slice(&i[32..]);
    (il, ir)
}

fn curve_err(e: CurveError) -> DeriveError {
    e.into()
}

impl ExtendedKey {
    /// Root node: `I = HMAC-SHA512(curve seed key, seed)`, `I_L` key, `I_R` chain code
    pub fn from_master_secret(seed: &[u8], curve: CurveKind) -> DeriveResult<Self> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(DeriveError::invalid_input(format!(
                "Seed must be {} to {} bytes, got {}",
                MIN_SEED_LEN,
                MAX_SEED_LEN,
                seed.len()
            )));
        }

        let i = Zeroizing::new(hmac_sha512(curve.seed_key(), seed)?);
        let (private_key, chain_code) = split_hmac(&i);
        let public_key = Self::public_from_private(curve, &private_key)?;

        crate::log_debug!("hd", "Created root node", curve = curve);

        Ok(Self {
            curve,
            private_key: Some(private_key),
            public_key,
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
        })
    }

    fn public_from_private(curve: CurveKind, private_key: &[u8; 32]) -> DeriveResult<Vec<u8>> {
        let public = match curve {
            CurveKind::Secp256k1 => curves::secp256k1::public_key(private_key).map(|pk| pk.to_vec()),
            CurveKind::Ed25519 => curves::ed25519::public_key(private_key).map(|pk| pk.to_vec()),
        };
        public.map_err(curve_err)
    }

    pub fn curve(&self) -> CurveKind {
        self.curve
    }

    /// Raw private key bytes; big-endian exponent for secp256k1, `I_L` for ed25519
    pub fn private_key(&self) -> Option<&[u8; 32]> {
        self.private_key.as_deref()
    }

    pub fn is_private(&self) -> bool {
        self.private_key.is_some()
    }

    /// Compressed SEC1 (33 bytes) or encoded ed25519 point (32 bytes)
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Child number including the hardened offset
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    /// HASH160 of the public key
    pub fn identifier(&self) -> [u8; 20] {
        hash160(&self.public_key)
    }

    /// First 4 bytes of the identifier
    pub fn fingerprint(&self) -> [u8; 4] {
        let id = self.identifier();
        [id[0], id[1], id[2], id[3]]
    }

    /// Copy without private material.
    ///
    /// Fails on ed25519, where a public-only node could never derive anything.
    pub fn public_copy(&self) -> DeriveResult<Self> {
        if !self.curve.supports_normal_derivation() {
            return Err(DeriveError::unsupported_derivation(
                "Ed25519 public derivation is not implemented",
            ));
        }
        Ok(Self {
            private_key: None,
            ..self.clone()
        })
    }

    /// Derive child `index` (below 2^31); `hardened` adds the 2^31 offset.
    pub fn get_child(&self, index: u32, hardened: bool) -> DeriveResult<Self> {
        if index >= HARDENED {
            return Err(DeriveError::invalid_child_index(index));
        }
        if !hardened && !self.curve.supports_normal_derivation() {
            return Err(DeriveError::unsupported_derivation(
                "Ed25519 only supports hardened derivation",
            ));
        }
        if hardened && self.private_key.is_none() {
            return Err(DeriveError::private_material_required(
                "Cannot compute a hardened child without a private key",
            ));
        }
        let depth = self
            .depth
            .checked_add(1)
            .ok_or_else(|| DeriveError::invalid_input("Maximum derivation depth exceeded"))?;

        let child_number = if hardened { index + HARDENED } else { index };

        let mut mac = hmac_sha512_keyed(&self.chain_code[..])?;
        match (&self.private_key, hardened) {
            (Some(private_key), true) => {
                // Hardened: 0x00 || private_key || index
                mac.update(&[0x00]);
                mac.update(&private_key[..]);
            }
            _ => {
                // Normal: public_key || index
                mac.update(&self.public_key);
            }
        }
        mac.update(&child_number.to_be_bytes());

        let mut i = Zeroizing::new([0u8; 64]);
        i.copy_from_slice(&mac.finalize().into_bytes());
        let (il, chain_code) = split_hmac(&i);

        let (private_key, public_key) = match (self.curve, &self.private_key) {
            (CurveKind::Secp256k1, Some(parent)) => {
                let child = Zeroizing::new(
                    curves::secp256k1::add_private(&il[..], &parent[..]).map_err(curve_err)?,
                );
                let public = Self::public_from_private(self.curve, &child)?;
                (Some(child), public)
            }
            (CurveKind::Secp256k1, None) => {
                let public = curves::secp256k1::add_public(&il[..], &self.public_key).map_err(curve_err)?;
                (None, public.to_vec())
            }
            (CurveKind::Ed25519, _) => {
                let public = Self::public_from_private(self.curve, &il)?;
                (Some(il), public)
            }
        };

        crate::log_debug!(
            "hd",
            "Derived child node",
            curve = self.curve,
            depth = depth,
            child_number = child_number,
        );

        Ok(Self {
            curve: self.curve,
            private_key,
            public_key,
            chain_code,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number,
        })
    }

    /// Walk a parsed path from this node
    pub fn derive_path(&self, path: &DerivationPath) -> DeriveResult<Self> {
        let mut node = self.clone();
        for component in &path.components {
            node = node.get_child(component.index, component.hardened)?;
        }
        if path.public_only {
            node = node.public_copy()?;
        }
        Ok(node)
    }

    /// Derive a child for a path such as `m/44'/128'/0'`.
    ///
    /// `M/...` or a `.pub` suffix returns the node without its private key.
    pub fn get_child_for_path(&self, path: &str) -> DeriveResult<Self> {
        let parsed = DerivationPath::parse(path)?;
        if parsed.public_only && !self.curve.supports_normal_derivation() {
            return Err(DeriveError::unsupported_derivation(
                "Ed25519 public derivation is not implemented",
            ));
        }
        self.derive_path(&parsed)
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("curve", &self.curve)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .field("public_key", &hex::encode(&self.public_key))
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .finish()
    }
}
