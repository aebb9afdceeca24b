//! Entity token parsing and serialization.

use super::Entity;
use crate::config::Config;
use crate::digest::is_digest_reference;
use crate::error::{CarvError, CarvResult};
use crate::fragment::Fragment;
use carvpath_store::LongPathStore;
use std::str::FromStr;
use tracing::debug;

/// Separator between fragment tokens within one level.
pub const FRAGMENT_SEPARATOR: char = '_';

/// Token of the zero-size entity.
pub const ZERO_TOKEN: &str = "S0";

impl Entity {
    /// Parses a single-level token, expanding digest references.
    ///
    /// A token starting with `D` is looked up in `store` and the stored
    /// literal token is parsed instead. An empty token yields the zero
    /// entity.
    ///
    /// # Errors
    ///
    /// - [`CarvError::UnknownDigest`] if a digest reference is not in `store`
    /// - [`CarvError::Parse`] if any fragment is malformed
    /// - [`CarvError::Store`] if the store lookup fails
    pub fn from_token<S>(token: &str, store: &S) -> CarvResult<Self>
    where
        S: LongPathStore + ?Sized,
    {
        if !is_digest_reference(token) {
            return Self::from_literal(token);
        }

        let expanded = store
            .get(token)?
            .ok_or_else(|| CarvError::unknown_digest(token))?;
        debug!(
            reference = token,
            len = expanded.len(),
            "expanded digest reference"
        );
        Self::from_literal(&expanded)
    }

    /// Parses a literal single-level token (no digest expansion).
    ///
    /// # Errors
    ///
    /// Returns [`CarvError::Parse`] if any fragment is malformed, if the
    /// token is a digest reference, or if the total size overflows 64 bits.
    pub fn from_literal(token: &str) -> CarvResult<Self> {
        let mut entity = Self::new();
        if token.is_empty() {
            return Ok(entity);
        }
        if is_digest_reference(token) {
            return Err(CarvError::parse(
                token,
                "digest reference needs a long-path store",
            ));
        }

        for piece in token.split(FRAGMENT_SEPARATOR) {
            let fragment = Fragment::from_token(piece)?;
            if entity.total_size.checked_add(fragment.size()).is_none() {
                return Err(CarvError::parse(token, "entity size overflows 64 bits"));
            }
            entity.push(fragment);
        }
        Ok(entity)
    }

    /// Returns the literal canonical token, however long it is.
    ///
    /// Fragment tokens are joined with `_`; the zero entity is `"S0"`.
    #[must_use]
    pub fn to_literal(&self) -> String {
        self.to_string()
    }

    /// Serializes the entity, compressing oversized tokens.
    ///
    /// If the literal token is longer than `config.max_token_len`, the
    /// literal is stored in `store` under its digest reference and the
    /// reference is returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`CarvError::Store`] if the store write fails.
    pub fn to_token<S>(&self, store: &S, config: &Config) -> CarvResult<String>
    where
        S: LongPathStore + ?Sized,
    {
        let literal = self.to_literal();
        if literal.len() <= config.max_token_len {
            return Ok(literal);
        }

        let reference = config.digest.reference(&literal);
        store.set(&reference, &literal)?;
        debug!(
            reference = %reference,
            len = literal.len(),
            fragments = self.fragment_count(),
            digest = config.digest.name(),
            "compressed long token"
        );
        Ok(reference)
    }
}

impl FromStr for Entity {
    type Err = CarvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_literal(s)
    }
}
