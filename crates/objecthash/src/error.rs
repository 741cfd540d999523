//! Error taxonomy for object hashing.
//!
//! Every failure is a deterministic input-validation failure: hashing is
//! fail-fast, the first error aborts the whole computation, and no partial
//! digest is ever produced.

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = ObjectHashError> = std::result::Result<T, E>;

/// Error returned when a value cannot be hashed.
#[derive(Debug, Error)]
pub enum ObjectHashError {
    /// Input to a JSON adapter was not well-formed JSON.
    #[error("JSON syntax error: {0}")]
    JsonSyntax(#[source] serde_json::Error),

    /// A value outside the supported set of kinds reached the hasher.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A float has no canonical encoding.
    #[error("cannot normalize float {value:?}: {guard}")]
    FloatNormalization { value: f64, guard: FloatGuard },

    /// Text that should have been a hex digest was not one.
    #[error("invalid digest {input:?}: {reason}")]
    InvalidDigest { input: String, reason: String },

    /// A redaction marker carried a payload that is not a digest.
    #[error("invalid redaction marker {marker:?}")]
    InvalidRedaction { marker: String },
}

/// Which guard of the float canonicalizer rejected the input.
///
/// `NotFinite` is an input error. The remaining guards protect internal
/// invariants of the canonicalizer and indicate a defect if they ever fire
/// on finite input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatGuard {
    NotFinite,
    MagnitudeOutOfRange,
    MantissaOverflow,
    TooLong,
}

impl fmt::Display for FloatGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            FloatGuard::NotFinite => "NaN and infinities have no canonical form",
            FloatGuard::MagnitudeOutOfRange => "magnitude left the (0.5, 1] interval",
            FloatGuard::MantissaOverflow => "mantissa digit reached 1 without carry",
            FloatGuard::TooLong => "canonical expansion exceeds the length bound",
        };
        f.write_str(reason)
    }
}

impl ObjectHashError {
    /// Short, stable name of the error kind, for logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectHashError::JsonSyntax(_) => "json_syntax",
            ObjectHashError::UnsupportedType(_) => "unsupported_type",
            ObjectHashError::FloatNormalization { .. } => "float_normalization",
            ObjectHashError::InvalidDigest { .. } => "invalid_digest",
            ObjectHashError::InvalidRedaction { .. } => "invalid_redaction",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_syntax_surfaces_parse_diagnostic() {
        let parse_err = serde_json::from_str::<serde_json::Value>(r#"["foo", bar]"#).unwrap_err();
        let err = ObjectHashError::JsonSyntax(parse_err);
        let message = err.to_string();
        assert!(message.starts_with("JSON syntax error:"), "{message}");
        assert!(message.contains("line 1"), "{message}");
        assert_eq!(err.kind(), "json_syntax");
    }

    #[test]
    fn test_float_error_names_guard() {
        let err = ObjectHashError::FloatNormalization {
            value: f64::NAN,
            guard: FloatGuard::NotFinite,
        };
        assert!(err.to_string().contains("NaN"));
        assert_eq!(err.kind(), "float_normalization");
    }
}
