//! Digest references for oversized tokens.
//!
//! A token longer than the configured maximum is replaced by `"D"`
//! followed by the lowercase hex digest of the token. The digest width is
//! fixed at 32 bytes, so every reference is exactly
//! [`DIGEST_REFERENCE_LEN`] characters long.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use sha2::Sha256;

/// Marker that starts a digest reference.
pub const DIGEST_MARKER: char = 'D';

/// Size of a digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Length of a full digest reference (marker plus hex digits).
pub const DIGEST_REFERENCE_LEN: usize = 1 + DIGEST_SIZE * 2;

type Blake2b256 = Blake2b<U32>;

/// Hash function used to build digest references.
///
/// Producers and consumers sharing a long-path store must agree on the
/// algorithm, otherwise the same long token maps to two different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    /// SHA-256.
    #[default]
    Sha256,
    /// BLAKE2b with a 256-bit output, as used by the legacy CarvPath
    /// tooling and its long-path databases.
    Blake2b256,
}

impl DigestAlgorithm {
    /// Computes the raw digest of `token`.
    #[must_use]
    pub fn digest(&self, token: &str) -> [u8; DIGEST_SIZE] {
        match self {
            Self::Sha256 => <Sha256 as sha2::Digest>::digest(token.as_bytes()).into(),
            Self::Blake2b256 => <Blake2b256 as blake2::Digest>::digest(token.as_bytes()).into(),
        }
    }

    /// Computes the digest reference (`"D" + hex`) for `token`.
    #[must_use]
    pub fn reference(&self, token: &str) -> String {
        let mut reference = String::with_capacity(DIGEST_REFERENCE_LEN);
        reference.push(DIGEST_MARKER);
        reference.push_str(&hex::encode(self.digest(token)));
        reference
    }

    /// Returns a short human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Blake2b256 => "blake2b-256",
        }
    }
}

/// Returns true if `token` is a digest reference rather than a literal.
#[inline]
#[must_use]
pub fn is_digest_reference(token: &str) -> bool {
    token.starts_with(DIGEST_MARKER)
}
