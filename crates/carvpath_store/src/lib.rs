//! # CarvPath Store
//!
//! Long-path store trait and implementations for CarvPath.
//!
//! Serialized CarvPath tokens can grow past what a file system path
//! component (or any other consumer) tolerates. Oversized tokens are
//! replaced by a fixed-width digest reference, and the original token is
//! kept in a [`LongPathStore`] so the reference can be expanded again later,
//! possibly from another process.
//!
//! ## Design Principles
//!
//! - Stores are plain string-to-string maps (get, set)
//! - No knowledge of the token grammar or of the digest algorithm
//! - Must be `Send + Sync`; implementations own their synchronization
//! - Every method takes `&self` so one store can back many contexts
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and single-process use
//!
//! ## Example
//!
//! ```rust
//! use carvpath_store::{LongPathStore, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! store.set("Dabc", "0+100_200+100").unwrap();
//! assert_eq!(store.get("Dabc").unwrap().as_deref(), Some("0+100_200+100"));
//! assert_eq!(store.get("Dmissing").unwrap(), None);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use store::LongPathStore;
