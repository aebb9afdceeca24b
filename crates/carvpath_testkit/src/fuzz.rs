//! Fuzz testing harnesses for CarvPath.
//!
//! This module provides fuzz targets that can be used with cargo-fuzz
//! or other fuzzing frameworks.

use carvpath_core::{Context, Entity, Fragment, Top};
use carvpath_store::InMemoryStore;

/// Fuzz target for path parsing.
///
/// Tests that arbitrary input either:
/// - Parses successfully to an entity, or
/// - Returns a proper error (no panics)
pub fn fuzz_parse_path(data: &[u8]) {
    let Ok(path) = std::str::from_utf8(data) else {
        return;
    };

    let store = InMemoryStore::new();
    let context = Context::new(&store);
    let _ = context.parse(path);
    let _ = path.parse::<Entity>();
    let _ = path.parse::<Fragment>();
}

/// Fuzz target for flatten roundtrip.
///
/// Tests that any path that parses flattens to a token which parses
/// back to the same entity, and that flattening is idempotent.
pub fn fuzz_flatten_roundtrip(data: &[u8]) {
    let Ok(path) = std::str::from_utf8(data) else {
        return;
    };

    let store = InMemoryStore::new();
    let context = Context::new(&store);
    let Ok(entity) = context.parse(path) else {
        return;
    };

    let flat = context
        .serialize(&entity)
        .expect("in-memory store never fails");
    let reparsed = context.parse(&flat).expect("flattened token must parse");
    assert_eq!(entity, reparsed, "Roundtrip mismatch for {path:?}");

    let again = context.flatten(&flat).expect("flattened token must flatten");
    assert_eq!(flat, again, "Flatten not idempotent for {path:?}");
}

/// Fuzz target for projection.
///
/// Builds an entity and a range from raw bytes and checks that the
/// checked and truncated projections agree with the bounds check.
pub fn fuzz_projection(data: &[u8]) {
    let mut words = data
        .chunks_exact(8)
        .map(|chunk| u64::from_le_bytes(chunk.try_into().unwrap_or([0u8; 8])));

    let mut entity = Entity::new();
    let Some(count) = words.next() else {
        return;
    };
    for _ in 0..count % 8 {
        let (Some(offset), Some(size)) = (words.next(), words.next()) else {
            break;
        };
        let size = size % (1 << 32);
        if offset % 4 == 0 {
            entity.push(Fragment::new_sparse(size));
        } else {
            entity.push(Fragment::new_concrete(offset % (1 << 48), size));
        }
    }
    let (Some(offset), Some(size)) = (words.next(), words.next()) else {
        return;
    };
    let offset = offset % (entity.total_size() + 2);
    let size = 1 + size % (entity.total_size() + 1);

    let child = Entity::from(Fragment::new_concrete(offset, size));
    let fits = entity.test(&child);
    match entity.subchunk(offset, size) {
        Ok(chunk) => {
            assert!(fits, "subchunk succeeded but test rejected the range");
            assert_eq!(chunk.total_size(), size);
            assert_eq!(chunk, entity.subchunk_truncated(offset, size));
        }
        Err(_) => assert!(!fits, "subchunk failed but test accepted the range"),
    }

    let mut top = Top::new(0);
    top.grow(entity.total_size());
    assert_eq!(top.test(&child), fits);
}
