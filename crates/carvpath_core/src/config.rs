//! Token serialization configuration.

use crate::digest::{DigestAlgorithm, DIGEST_REFERENCE_LEN};
use crate::error::{CarvError, CarvResult};

/// Default maximum length of a literal token.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 160;

/// Configuration shared by every producer and consumer of a long-path store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Longest token emitted literally; longer tokens become digest references.
    pub max_token_len: usize,

    /// Hash function used for digest references.
    pub digest: DigestAlgorithm,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
            digest: DigestAlgorithm::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum literal token length.
    #[must_use]
    pub const fn max_token_len(mut self, len: usize) -> Self {
        self.max_token_len = len;
        self
    }

    /// Sets the digest algorithm.
    #[must_use]
    pub const fn digest(mut self, algorithm: DigestAlgorithm) -> Self {
        self.digest = algorithm;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CarvError::InvalidConfig`] if `max_token_len` is shorter
    /// than a digest reference, since compression would then lengthen
    /// tokens instead of bounding them.
    pub fn validate(&self) -> CarvResult<()> {
        if self.max_token_len < DIGEST_REFERENCE_LEN {
            return Err(CarvError::invalid_config(format!(
                "max_token_len {} is shorter than a digest reference ({} characters)",
                self.max_token_len, DIGEST_REFERENCE_LEN
            )));
        }
        Ok(())
    }
}
