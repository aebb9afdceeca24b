//! # CarvPath Testkit
//!
//! Test utilities for CarvPath.
//!
//! This crate provides:
//! - Test fixtures: contexts backed by in-memory and failing stores
//! - Property-based test generators using proptest
//! - Shared flatten, range, size and error vectors
//! - Fuzz testing harnesses
//!
//! ## Usage
//!
//! ```rust
//! use carvpath_testkit::prelude::*;
//!
//! with_context(|ctx| {
//!     assert_eq!(ctx.flatten("S1_S1").unwrap(), "S2");
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod fuzz;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use fuzz::*;
pub use generators::*;
pub use vectors::*;
