//! Error types for CarvPath core.

use thiserror::Error;

/// Result type for core operations.
pub type CarvResult<T> = Result<T, CarvError>;

/// Errors that can occur while parsing, projecting or serializing paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarvError {
    /// A fragment or entity token is malformed.
    #[error("invalid carvpath token {token:?}: {reason}")]
    Parse {
        /// The offending token text.
        token: String,
        /// Description of what is wrong with it.
        reason: String,
    },

    /// A digest reference has no entry in the long-path store.
    #[error("unknown digest reference: {key}")]
    UnknownDigest {
        /// The digest reference that was looked up.
        key: String,
    },

    /// A requested sub-range exceeds the parent entity.
    #[error("range {offset}+{size} outside of entity bounds (size {total})")]
    OutOfRange {
        /// Requested offset within the parent.
        offset: u64,
        /// Requested size.
        size: u64,
        /// Total size of the parent.
        total: u64,
    },

    /// The long-path store failed.
    #[error("long-path store error: {0}")]
    Store(#[from] carvpath_store::StoreError),

    /// A configuration value was rejected.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the rejected value.
        message: String,
    },
}

impl CarvError {
    /// Create a parse error.
    pub fn parse(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown digest error.
    pub fn unknown_digest(key: impl Into<String>) -> Self {
        Self::UnknownDigest { key: key.into() }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns true for malformed token errors.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns true for unknown digest references.
    #[must_use]
    pub fn is_unknown_digest(&self) -> bool {
        matches!(self, Self::UnknownDigest { .. })
    }

    /// Returns true for out-of-range projections.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carvpath_store::StoreError;

    #[test]
    fn parse_error_display() {
        let err = CarvError::parse("12x+4", "offset is not a number");
        assert_eq!(
            err.to_string(),
            "invalid carvpath token \"12x+4\": offset is not a number"
        );
        assert!(err.is_parse());
        assert!(!err.is_out_of_range());
    }

    #[test]
    fn out_of_range_display() {
        let err = CarvError::OutOfRange {
            offset: 10,
            size: 20,
            total: 25,
        };
        assert_eq!(
            err.to_string(),
            "range 10+20 outside of entity bounds (size 25)"
        );
        assert!(err.is_out_of_range());
    }

    #[test]
    fn store_error_converts() {
        let err: CarvError = StoreError::unavailable("gone").into();
        assert!(matches!(err, CarvError::Store(_)));
        assert!(!err.is_unknown_digest());
    }
}
