//! Unified error types for the derivation core
//!
//! Every fallible operation returns a `DeriveError` carrying a stable
//! `ErrorCode`, so callers can branch on the kind without string matching.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::curves::CurveError;

/// Main error type for all derivation operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeriveError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl DeriveError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn invalid_entropy_length(len: usize) -> Self {
        Self::new(
            ErrorCode::InvalidEntropyLength,
            format!("Entropy must be 16 or 32 bytes, got {}", len),
        )
    }

    pub fn invalid_checksum(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidChecksum, msg)
    }

    pub fn invalid_child_index(index: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidChildIndex,
            format!("Invalid child number {}", index),
        )
    }

    pub fn private_material_required(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::PrivateMaterialRequired, msg)
    }

    pub fn unsupported_derivation(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedDerivation, msg)
    }

    pub fn infinity_point() -> Self {
        Self::new(ErrorCode::InfinityPoint, "The point at infinity is invalid")
    }

    pub fn invalid_point_encoding(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPointEncoding, msg)
    }

    pub fn unknown_word(word: &str) -> Self {
        Self::new(ErrorCode::UnknownWord, "Word not in wordlist").with_details(word.to_string())
    }

    pub fn malformed_path(path: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MalformedPath,
            format!("{} is not a valid path", path),
        )
        .with_details(reason)
    }

    pub fn invalid_word_count(count: usize) -> Self {
        Self::new(
            ErrorCode::InvalidWordCount,
            format!("Unsupported mnemonic length: {} words", count),
        )
    }

    pub fn invalid_wordlist(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidWordlist, msg)
    }

    pub fn crypto_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CryptoError, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for DeriveError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Mnemonic errors
    InvalidEntropyLength,
    InvalidChecksum,
    InvalidWordCount,
    UnknownWord,
    InvalidWordlist,

    // Hierarchical derivation errors
    InvalidChildIndex,
    PrivateMaterialRequired,
    UnsupportedDerivation,
    InfinityPoint,
    MalformedPath,

    // Curve errors
    InvalidPointEncoding,
    CryptoError,

    // Input / parse errors
    InvalidInput,
    JsonError,
    HexError,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Whether an interactive caller should re-prompt rather than abort.
    ///
    /// Only user typos are recoverable; everything else points at corrupted
    /// data or a programming error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::InvalidChecksum | ErrorCode::UnknownWord | ErrorCode::InvalidWordCount
        )
    }
}

/// Result type alias for derivation operations
pub type DeriveResult<T> = Result<T, DeriveError>;

// Conversions from common error types

impl From<serde_json::Error> for DeriveError {
    fn from(e: serde_json::Error) -> Self {
        DeriveError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for DeriveError {
    fn from(e: hex::FromHexError) -> Self {
        DeriveError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<bitcoin::secp256k1::Error> for DeriveError {
    fn from(e: bitcoin::secp256k1::Error) -> Self {
        DeriveError::new(ErrorCode::CryptoError, format!("Secp256k1 error: {}", e))
    }
}

impl From<CurveError> for DeriveError {
    fn from(e: CurveError) -> Self {
        match e {
            CurveError::InvalidPointEncoding(_) | CurveError::NotOnCurve => {
                DeriveError::new(ErrorCode::InvalidPointEncoding, e.to_string())
            }
            CurveError::InfinityPoint => DeriveError::infinity_point(),
            _ => DeriveError::new(ErrorCode::CryptoError, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = DeriveError::unknown_word("abandonn");

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("unknown_word"));
        assert!(json.contains("abandonn"));
    }

    #[test]
    fn test_display_includes_code_and_details() {
        let err = DeriveError::malformed_path("m/x", "Invalid path component 'x'");
        let text = err.to_string();
        assert!(text.starts_with("[MalformedPath]"));
        assert!(text.contains("m/x is not a valid path"));
        assert!(text.contains("(Invalid path component 'x')"));
    }

    #[test]
    fn test_recoverable_codes() {
        assert!(ErrorCode::InvalidChecksum.is_recoverable());
        assert!(ErrorCode::UnknownWord.is_recoverable());
        assert!(!ErrorCode::InfinityPoint.is_recoverable());
        assert!(!ErrorCode::UnsupportedDerivation.is_recoverable());
    }

    #[test]
    fn test_curve_error_mapping() {
        let err: DeriveError = CurveError::NotOnCurve.into();
        assert_eq!(err.code, ErrorCode::InvalidPointEncoding);

        let err: DeriveError = CurveError::InfinityPoint.into();
        assert_eq!(err.code, ErrorCode::InfinityPoint);
    }
}
