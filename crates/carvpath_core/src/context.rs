//! Multi-level path resolution.

use crate::config::Config;
use crate::entity::Entity;
use crate::error::CarvResult;
use crate::top::Top;
use carvpath_store::LongPathStore;
use tracing::trace;

/// Separator between derivation levels in a path.
pub const LEVEL_SEPARATOR: char = '/';

/// Entry point for parsing and serializing CarvPath paths.
///
/// A context pairs a long-path store with the [`Config`] every producer
/// and consumer of that store must share. It holds no other state: each
/// call is an independent, synchronous computation.
///
/// # Example
///
/// ```rust
/// use carvpath_core::Context;
/// use carvpath_store::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let context = Context::new(&store);
///
/// let entity = context.parse("0+20000_40000+20000/10000+20000").unwrap();
/// assert_eq!(entity.to_literal(), "10000+10000_40000+10000");
/// ```
#[derive(Debug, Clone)]
pub struct Context<S> {
    store: S,
    config: Config,
}

impl<S: LongPathStore> Context<S> {
    /// Creates a context with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    /// Creates a context with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CarvError::InvalidConfig`] if the configuration is
    /// rejected by [`Config::validate`].
    pub fn with_config(store: S, config: Config) -> CarvResult<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Resolves a `/`-separated path into one absolute entity.
    ///
    /// Each level is parsed on its own and then projected through the
    /// entity resolved so far, so level `n` is always relative to level
    /// `n - 1`.
    ///
    /// # Errors
    ///
    /// Returns the first parse, digest, range or store error met; no
    /// partially resolved entity is returned.
    pub fn parse(&self, path: &str) -> CarvResult<Entity> {
        let mut resolved: Option<Entity> = None;
        for (depth, level) in path.split(LEVEL_SEPARATOR).enumerate() {
            let entity = Entity::from_token(level, &self.store)?;
            let entity = match resolved {
                Some(parent) => parent.subentity(&entity)?,
                None => entity,
            };
            trace!(depth, level, size = entity.total_size(), "resolved path level");
            resolved = Some(entity);
        }
        Ok(resolved.unwrap_or_default())
    }

    /// Serializes an entity with this context's store and configuration.
    ///
    /// # Errors
    ///
    /// Returns a store error if a long token cannot be recorded.
    pub fn serialize(&self, entity: &Entity) -> CarvResult<String> {
        entity.to_token(&self.store, &self.config)
    }

    /// Resolves `path` and serializes the result as a single-level token.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Context::parse`] or [`Context::serialize`].
    pub fn flatten(&self, path: &str) -> CarvResult<String> {
        let entity = self.parse(path)?;
        self.serialize(&entity)
    }

    /// Creates a [`Top`] for an addressable space of `size` bytes.
    #[must_use]
    pub fn make_top(&self, size: u64) -> Top {
        Top::new(size)
    }

    /// Creates an empty entity.
    #[must_use]
    pub fn empty(&self) -> Entity {
        Entity::new()
    }

    /// Returns the long-path store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
