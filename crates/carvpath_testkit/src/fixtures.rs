//! Test fixtures and context helpers.
//!
//! Provides ready-made contexts, stores and tokens for common test
//! scenarios.

use carvpath_core::{Config, Context, DigestAlgorithm};
use carvpath_store::{InMemoryStore, LongPathStore, StoreError, StoreResult};
use std::sync::Arc;

/// A context over a shared in-memory store.
pub struct TestContext {
    /// The context under test.
    pub context: Context<Arc<InMemoryStore>>,
    /// The store behind the context, for inspection.
    pub store: Arc<InMemoryStore>,
}

impl TestContext {
    /// Creates a context with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a context that produces the same digest references as the
    /// legacy CarvPath tooling (BLAKE2b-256, 160 character tokens).
    pub fn legacy() -> Self {
        Self::with_config(Config::default().digest(DigestAlgorithm::Blake2b256))
    }

    /// Creates a context with an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let context =
            Context::with_config(Arc::clone(&store), config).expect("Invalid test configuration");
        Self { context, store }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestContext {
    type Target = Context<Arc<InMemoryStore>>;

    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

/// Runs a test with a fresh default context.
///
/// # Example
///
/// ```rust
/// use carvpath_testkit::with_context;
///
/// with_context(|ctx| {
///     let entity = ctx.parse("0+100/10+10").unwrap();
///     assert_eq!(entity.to_literal(), "10+10");
/// });
/// ```
pub fn with_context<F, R>(f: F) -> R
where
    F: FnOnce(&TestContext) -> R,
{
    let ctx = TestContext::new();
    f(&ctx)
}

/// Runs a test with a fresh legacy (BLAKE2b) context.
pub fn with_legacy_context<F, R>(f: F) -> R
where
    F: FnOnce(&TestContext) -> R,
{
    let ctx = TestContext::legacy();
    f(&ctx)
}

/// Builds a token of `count` 100-byte fragments separated by one-byte gaps.
///
/// The fragments never merge, so the token has exactly `count` fragments.
/// With 25 fragments this is the classic long-path test token.
pub fn long_token(count: u64) -> String {
    (0..count)
        .map(|i| format!("{}+100", i * 101))
        .collect::<Vec<_>>()
        .join("_")
}

/// Asserts that `path` flattens to `expected` in `ctx`.
pub fn assert_flatten(ctx: &TestContext, path: &str, expected: &str) {
    let actual = ctx
        .flatten(path)
        .unwrap_or_else(|e| panic!("flatten of {path:?} failed: {e}"));
    assert_eq!(actual, expected, "flatten of {path:?}");
}

/// A store whose every operation fails.
///
/// Useful for checking that store failures surface to callers.
#[derive(Debug, Clone, Default)]
pub struct FailingStore;

impl LongPathStore for FailingStore {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::unavailable("failing store"))
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::unavailable("failing store"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carvpath_core::CarvError;

    #[test]
    fn long_token_has_requested_fragments() {
        let token = long_token(25);
        assert_eq!(token.split('_').count(), 25);
        assert!(token.starts_with("0+100_101+100"));
        assert!(token.ends_with("2424+100"));
    }

    #[test]
    fn context_shares_store() {
        let ctx = TestContext::new();
        let reference = ctx.flatten(&long_token(30)).unwrap();
        assert!(ctx.store.contains(&reference));
    }

    #[test]
    fn failing_store_surfaces_errors() {
        let context = Context::new(FailingStore);
        assert!(matches!(
            context.parse("Dabc").unwrap_err(),
            CarvError::Store(_)
        ));
        assert!(matches!(
            context.flatten(&long_token(30)).unwrap_err(),
            CarvError::Store(_)
        ));
        assert_eq!(context.flatten("0+1").unwrap(), "0+1");
    }
}
