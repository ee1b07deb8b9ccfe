//! Key Derivation Path Parsing
//!
//! Parses BIP-32 style paths such as `m/44'/128'/0'/0/0`:
//! - `'`, `p`, `h` or `H` after an index marks it hardened
//! - a leading `M` or a trailing `.pub` asks for a public-only result
//! - every index must be below 2^31; hardening adds the offset

use crate::error::{DeriveError, DeriveResult};

/// Standard BIP purposes
pub mod bip_purposes {
    pub const BIP44: u32 = 44;
}

/// Coin types from SLIP-0044
pub mod coin_types {
    pub const MONERO: u32 = 128;
}

/// Hardened offset for BIP-32 derivation
pub const HARDENED: u32 = 0x80000000;

/// Suffix requesting a public-only node
const PUBLIC_SUFFIX: &str = ".pub";

/// Parsed derivation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    pub components: Vec<DerivationComponent>,
    /// Strip private material from the final node
    pub public_only: bool,
}

/// Single component of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationComponent {
    pub index: u32,
    pub hardened: bool,
}

impl DerivationComponent {
    /// Checked constructor; `index` excludes the hardened offset
    pub fn new(index: u32, hardened: bool) -> DeriveResult<Self> {
        if index >= HARDENED {
            return Err(DeriveError::invalid_child_index(index));
        }
        Ok(Self { index, hardened })
    }

    /// Get the full index including hardened bit
    pub fn full_index(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED
        } else {
            self.index
        }
    }
}

impl std::fmt::Display for DerivationComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl std::fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.public_only { "M" } else { "m" })?;
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for DerivationPath {
    type Err = DeriveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl DerivationPath {
    /// Parse a derivation path string
    pub fn parse(path: &str) -> DeriveResult<Self> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(DeriveError::malformed_path(path, "Empty derivation path"));
        }

        let mut public_only = trimmed.starts_with('M');
        let body = match trimmed.strip_suffix(PUBLIC_SUFFIX) {
            Some(body) => {
                public_only = true;
                body
            }
            None => trimmed,
        };

        let mut parts = body.split('/');
        match parts.next() {
            Some("m") | Some("M") => {}
            _ => {
                return Err(DeriveError::malformed_path(
                    path,
                    "Derivation path must start with 'm' or 'M'",
                ))
            }
        }

        let components = parts
            .map(|part| parse_component(path, part))
            .collect::<DeriveResult<Vec<_>>>()?;

        Ok(Self {
            components,
            public_only,
        })
    }

    pub fn depth(&self) -> usize {
        self.components.len()
    }

    pub fn purpose(&self) -> Option<u32> {
        self.components.first().map(|c| c.index)
    }

    pub fn coin_type(&self) -> Option<u32> {
        self.components.get(1).map(|c| c.index)
    }

    pub fn is_fully_hardened(&self) -> bool {
        self.components.iter().all(|c| c.hardened)
    }

    /// Non-fatal oddities worth surfacing to the user
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(purpose) = self.purpose() {
            if purpose != bip_purposes::BIP44 {
                warnings.push(format!("Non-standard purpose: {}. Monero paths use 44", purpose));
            }
        }
        if let Some(coin_type) = self.coin_type() {
            if coin_type != coin_types::MONERO {
                warnings.push(format!(
                    "Coin type {} is not standard for Monero (expected {})",
                    coin_type,
                    coin_types::MONERO
                ));
            }
        }
        if self.components.iter().take(3).any(|c| !c.hardened) {
            warnings.push("Purpose, coin type, and account should be hardened (')".to_string());
        }

        warnings
    }
}

/// Parse a single path component
fn parse_component(path: &str, s: &str) -> DeriveResult<DerivationComponent> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(DeriveError::malformed_path(path, "Empty path component"));
    }

    // Check for hardened indicator
    let (number_str, hardened) = match trimmed.strip_suffix(&['\'', 'p', 'h', 'H'][..]) {
        Some(number) => (number, true),
        None => (trimmed, false),
    };

    if number_str.is_empty() || !number_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DeriveError::malformed_path(
            path,
            format!("Invalid path component '{}'", s),
        ));
    }

    // All digits, so the only parse failure is overflow
    let index: u32 = number_str
        .parse()
        .map_err(|_| DeriveError::invalid_child_index(number_str))?;

    DerivationComponent::new(index, hardened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_standard_path() {
        let path = DerivationPath::parse("m/44'/128'/0'/0/0").unwrap();
        assert_eq!(path.depth(), 5);
        assert_eq!(path.purpose(), Some(44));
        assert_eq!(path.coin_type(), Some(128));
        assert!(!path.public_only);
        assert_eq!(path.components[0].full_index(), 44 | HARDENED);
        assert_eq!(path.components[4].full_index(), 0);
        assert!(path.warnings().is_empty());
    }

    #[test]
    fn test_hardened_markers() {
        let a = DerivationPath::parse("m/44'/128p/0h/1H").unwrap();
        assert!(a.is_fully_hardened());
        assert_eq!(a.to_string(), "m/44'/128'/0'/1'");
    }

    #[test]
    fn test_public_markers() {
        for p in ["M/0/1", "m/0/1.pub", "M/0/1.pub"] {
            let path = DerivationPath::parse(p).unwrap();
            assert!(path.public_only, "{}", p);
            assert_eq!(path.to_string(), "M/0/1");
        }
    }

    #[test]
    fn test_root_path() {
        let path = DerivationPath::parse("m").unwrap();
        assert_eq!(path.depth(), 0);
        assert_eq!(path.to_string(), "m");
    }

    #[test]
    fn test_malformed_paths() {
        for p in ["", "44'/0'", "m/", "m//0", "m/x", "m/-1", "m/1''", "m/0'/1a"] {
            let err = DerivationPath::parse(p).unwrap_err();
            assert_eq!(err.code, ErrorCode::MalformedPath, "{}", p);
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let err = DerivationPath::parse("m/2147483648").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidChildIndex);

        let err = DerivationPath::parse("m/4294967296'").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidChildIndex);

        let err = DerivationPath::parse("m/99999999999999999999").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidChildIndex);
        assert!(err.message.contains("99999999999999999999"));

        assert!(DerivationPath::parse("m/2147483647'").is_ok());
    }

    #[test]
    fn test_warnings() {
        let path = DerivationPath::parse("m/44'/60'/0'").unwrap();
        assert!(path.warnings().iter().any(|w| w.contains("not standard")));

        let path = DerivationPath::parse("m/44/128'/0'").unwrap();
        assert!(path.warnings().iter().any(|w| w.contains("hardened")));
    }
}
