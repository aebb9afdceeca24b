//! Long-path store trait definition.

use crate::error::StoreResult;
use std::sync::Arc;

/// A key/value map from digest references to the tokens they stand for.
///
/// Keys are digest references (`"D"` followed by the hex digest), values
/// are the canonical tokens that were too long to be emitted literally.
/// The store is supplied by the caller; CarvPath never persists anything
/// on its own.
///
/// # Invariants
///
/// - `get` returns the value of the most recent `set` for that key
/// - Implementations must be `Send + Sync` and synchronize internally
/// - Callers never rely on atomicity across two calls
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing and single-process use
pub trait LongPathStore: Send + Sync {
    /// Looks up the token stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: LongPathStore + ?Sized> LongPathStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

impl<S: LongPathStore + ?Sized> LongPathStore for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

impl<S: LongPathStore + ?Sized> LongPathStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;

    fn roundtrip(store: &dyn LongPathStore) {
        store.set("Dkey", "0+1_2+1").unwrap();
        assert_eq!(store.get("Dkey").unwrap().as_deref(), Some("0+1_2+1"));
    }

    #[test]
    fn reference_forwards_to_store() {
        let store = InMemoryStore::new();
        let by_ref = &store;
        roundtrip(&by_ref);
        assert!(store.contains("Dkey"));
    }

    #[test]
    fn arc_shares_one_map() {
        let store = Arc::new(InMemoryStore::new());
        let other = Arc::clone(&store);
        roundtrip(&other);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn boxed_trait_object() {
        let store: Box<dyn LongPathStore> = Box::new(InMemoryStore::new());
        roundtrip(&store);
    }
}
