//! Derivation Configuration
//!
//! Runtime knobs for a derivation session:
//! - Derivation mode (SLIP-0010 or legacy BIP-44)
//! - Optional explicit derivation path
//! - Whether the BIP39 checksum is enforced
//! - Debug logging, also switchable through the `DEBUG` environment variable

use crate::error::{DeriveError, DeriveResult};
use crate::types::DerivationMode;
use crate::wallet::DerivationPath;

/// Environment variable that turns on debug logging
pub const DEBUG_ENV_VAR: &str = "DEBUG";

/// Settings for one derivation session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeriveConfig {
    pub mode: DerivationMode,
    /// Explicit path; `None` selects the mode's default path
    pub path: Option<String>,
    /// Accept mnemonics whose BIP39 checksum does not verify
    pub skip_checksum: bool,
    pub debug: bool,
}

impl DeriveConfig {
    /// Defaults plus whatever the environment turns on
    pub fn from_env() -> Self {
        let debug = std::env::var(DEBUG_ENV_VAR)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);
        Self {
            debug,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: DerivationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_skip_checksum(mut self, skip: bool) -> Self {
        self.skip_checksum = skip;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = self.debug || debug;
        self
    }

    /// The path that will actually be derived
    pub fn effective_path(&self) -> &str {
        self.path.as_deref().unwrap_or_else(|| self.mode.default_path())
    }

    /// Check the path parses before any expensive work starts
    pub fn validate(&self) -> DeriveResult<()> {
        let path = DerivationPath::parse(self.effective_path())?;
        if path.public_only && self.mode == DerivationMode::Slip10 {
            return Err(DeriveError::unsupported_derivation(
                "Ed25519 public derivation is not implemented",
            ));
        }
        Ok(())
    }

    /// Apply process-wide side effects (currently just the log level)
    pub fn apply(&self) {
        if self.debug {
            crate::utils::logging::enable_debug();
        }
    }
}

/// Values the `DEBUG` variable accepts as "on"
fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("y"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("no"));
    }

    #[test]
    fn test_effective_path() {
        let config = DeriveConfig::default();
        assert_eq!(config.effective_path(), "m/44'/128'/0'");

        let config = DeriveConfig::default().with_mode(DerivationMode::Legacy);
        assert_eq!(config.effective_path(), "m/44'/128'/0'/0/0");

        let config = config.with_path("m/44'/128'/1'/0/0");
        assert_eq!(config.effective_path(), "m/44'/128'/1'/0/0");
    }

    #[test]
    fn test_checksum_enforced_by_default() {
        assert!(!DeriveConfig::default().skip_checksum);
        assert!(DeriveConfig::default().with_skip_checksum(true).skip_checksum);
    }

    #[test]
    fn test_validate() {
        assert!(DeriveConfig::default().validate().is_ok());
        assert!(DeriveConfig::default().with_path("m/44'/x").validate().is_err());
        assert!(DeriveConfig::default().with_path("M/44'/128'/0'").validate().is_err());
        assert!(DeriveConfig::default()
            .with_mode(DerivationMode::Legacy)
            .with_path("M/44'/128'/0'/0/0")
            .validate()
            .is_ok());
    }
}
