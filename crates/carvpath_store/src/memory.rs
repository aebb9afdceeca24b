//! In-memory long-path store.

use crate::error::StoreResult;
use crate::store::LongPathStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// An in-memory long-path store.
///
/// This store keeps all entries in a hash map and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Single-process tools that do not share digest references
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads, either by
/// reference or wrapped in an `Arc`.
///
/// # Example
///
/// ```rust
/// use carvpath_store::{LongPathStore, InMemoryStore};
///
/// let store = InMemoryStore::new();
/// store.set("Dfeed", "0+4096_S8192").unwrap();
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries.
    ///
    /// Useful for resolving digest references produced elsewhere.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns true if `key` has an entry.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Returns a snapshot of all entries.
    #[must_use]
    pub fn entries(&self) -> HashMap<String, String> {
        self.entries.read().clone()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl LongPathStore for InMemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        // Last writer wins; digest collisions are not detected here.
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn memory_new_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn memory_get_missing_is_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("Dnothing").unwrap(), None);
    }

    #[test]
    fn memory_set_then_get() {
        let store = InMemoryStore::new();
        store.set("Da", "0+1").unwrap();
        assert_eq!(store.get("Da").unwrap().as_deref(), Some("0+1"));
        assert!(store.contains("Da"));
        assert!(!store.contains("Db"));
    }

    #[test]
    fn memory_set_overwrites() {
        let store = InMemoryStore::new();
        store.set("Da", "0+1").unwrap();
        store.set("Da", "S5").unwrap();
        assert_eq!(store.get("Da").unwrap().as_deref(), Some("S5"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_with_entries() {
        let store = InMemoryStore::with_entries([("Dx", "1+2"), ("Dy", "S3")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("Dy").unwrap().as_deref(), Some("S3"));
        assert_eq!(store.entries().get("Dx").map(String::as_str), Some("1+2"));
    }

    #[test]
    fn memory_clear() {
        let store = InMemoryStore::with_entries([("Dx", "1+2")]);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn memory_concurrent_writers() {
        let store = Arc::new(InMemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for j in 0..50 {
                        let key = format!("D{i}-{j}");
                        store.set(&key, &format!("{j}+1")).unwrap();
                        assert!(store.get(&key).unwrap().is_some());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 400);
    }
}
