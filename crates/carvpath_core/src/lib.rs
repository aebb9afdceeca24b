//! # CarvPath Core
//!
//! Zero-storage carving: addressing fragmented, possibly sparse regions of
//! a flat byte space (a disk or file image) without copying any bytes.
//!
//! This crate provides:
//! - [`Fragment`]: one concrete run `offset+size` or one sparse run `S<size>`
//! - [`Entity`]: a canonical, auto-merging list of fragments
//! - Projection of local ranges and child entities onto their parent
//! - [`Top`]: bounds checks against the size of the whole image
//! - [`Context`]: resolution of multi-level `a/b/c` paths
//! - Digest references that keep serialized tokens short, backed by a
//!   caller-supplied [`LongPathStore`]
//!
//! ## Token Grammar
//!
//! ```text
//! token         := "S0" | fragment ("_" fragment)* | "D" hex_digest
//! fragment      := "S" uint64 | uint64 "+" uint64
//! path          := token ("/" token)*
//! ```
//!
//! ## Usage
//!
//! ```
//! use carvpath_core::{Config, Context, Entity, Top};
//! use carvpath_store::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! let context = Context::with_config(&store, Config::default()).unwrap();
//!
//! // A carved file made of two runs, and a range inside that file.
//! let entity = context.parse("0+20000_40000+20000/10000+20000").unwrap();
//! assert_eq!(entity.to_literal(), "10000+10000_40000+10000");
//!
//! // Only accept paths that stay inside a 1 MiB image.
//! let top = Top::new(1 << 20);
//! assert!(top.test(&entity));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod digest;
mod entity;
mod error;
mod fragment;
mod top;

pub use carvpath_store::{InMemoryStore, LongPathStore, StoreError, StoreResult};
pub use config::{Config, DEFAULT_MAX_TOKEN_LEN};
pub use context::{Context, LEVEL_SEPARATOR};
pub use digest::{
    is_digest_reference, DigestAlgorithm, DIGEST_MARKER, DIGEST_REFERENCE_LEN, DIGEST_SIZE,
};
pub use entity::{Entity, FRAGMENT_SEPARATOR, ZERO_TOKEN};
pub use error::{CarvError, CarvResult};
pub use fragment::{Fragment, OFFSET_SEPARATOR, SPARSE_MARKER};
pub use top::Top;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
