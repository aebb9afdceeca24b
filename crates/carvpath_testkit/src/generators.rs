//! Property-based test generators using proptest.
//!
//! Provides strategies for generating fragments, entities and in-bounds
//! child entities.

use carvpath_core::{Entity, Fragment};
use proptest::prelude::*;

/// Largest offset used for generated concrete fragments.
pub const MAX_OFFSET: u64 = 1 << 40;

/// Largest size used for generated fragments.
pub const MAX_FRAGMENT_SIZE: u64 = 1 << 20;

/// Strategy for generating concrete fragments.
pub fn concrete_fragment_strategy() -> impl Strategy<Value = Fragment> {
    (0..MAX_OFFSET, 1..MAX_FRAGMENT_SIZE)
        .prop_map(|(offset, size)| Fragment::new_concrete(offset, size))
}

/// Strategy for generating sparse fragments.
pub fn sparse_fragment_strategy() -> impl Strategy<Value = Fragment> {
    (1..MAX_FRAGMENT_SIZE).prop_map(Fragment::new_sparse)
}

/// Strategy for generating fragments, mostly concrete.
pub fn fragment_strategy() -> impl Strategy<Value = Fragment> {
    prop_oneof![
        3 => concrete_fragment_strategy(),
        1 => sparse_fragment_strategy(),
    ]
}

/// Strategy for generating any fragment, including zero sizes, `u64`
/// extremes and runs whose end lies past `u64::MAX`.
pub fn any_valid_fragment_strategy() -> impl Strategy<Value = Fragment> {
    prop_oneof![
        any::<u64>().prop_map(Fragment::new_sparse),
        (any::<u64>(), any::<u64>())
            .prop_map(|(offset, size)| Fragment::new_concrete(offset, size)),
        (u64::MAX - 64..=u64::MAX, u64::MAX - 64..=u64::MAX)
            .prop_map(|(offset, size)| Fragment::new_concrete(offset, size)),
    ]
}

/// Strategy for generating raw fragment lists (before merging).
pub fn fragment_list_strategy(max_len: usize) -> impl Strategy<Value = Vec<Fragment>> {
    prop::collection::vec(fragment_strategy(), 0..max_len)
}

/// Strategy for generating fragment lists where many neighbours touch,
/// so that merging actually happens.
pub fn touching_fragment_list_strategy(max_len: usize) -> impl Strategy<Value = Vec<Fragment>> {
    (
        0..MAX_OFFSET,
        prop::collection::vec((1..MAX_FRAGMENT_SIZE, 0u8..4), 0..max_len),
    )
        .prop_map(|(start, steps)| {
            let mut cursor = start;
            steps
                .into_iter()
                .map(|(size, kind)| match kind {
                    // Touching concrete run
                    0 | 1 => {
                        let fragment = Fragment::new_concrete(cursor, size);
                        cursor += size;
                        fragment
                    }
                    // Concrete run after a gap
                    2 => {
                        cursor += 1;
                        let fragment = Fragment::new_concrete(cursor, size);
                        cursor += size;
                        fragment
                    }
                    _ => Fragment::new_sparse(size),
                })
                .collect()
        })
}

/// Strategy for generating canonical entities.
pub fn entity_strategy() -> impl Strategy<Value = Entity> {
    prop_oneof![
        fragment_list_strategy(16).prop_map(Entity::from_fragments),
        touching_fragment_list_strategy(16).prop_map(Entity::from_fragments),
    ]
}

/// Strategy for generating non-empty entities.
pub fn non_empty_entity_strategy() -> impl Strategy<Value = Entity> {
    entity_strategy().prop_filter("entity must address bytes", |entity| !entity.is_empty())
}

/// Strategy for generating a local range `(offset, size)` inside `[0, total)`.
pub fn range_within_strategy(total: u64) -> impl Strategy<Value = (u64, u64)> {
    (0..=total).prop_flat_map(move |offset| (Just(offset), 0..=total - offset))
}

/// Strategy for generating a child entity that lies inside a parent of
/// `total` bytes.
pub fn child_within_strategy(total: u64) -> impl Strategy<Value = Entity> {
    prop::collection::vec(
        prop_oneof![
            3 => range_within_strategy(total)
                .prop_map(|(offset, size)| Fragment::new_concrete(offset, size)),
            1 => (1..MAX_FRAGMENT_SIZE).prop_map(Fragment::new_sparse),
        ],
        0..8,
    )
    .prop_map(Entity::from_fragments)
}

/// Strategy for generating a parent entity together with a child inside it.
pub fn parent_and_child_strategy() -> impl Strategy<Value = (Entity, Entity)> {
    non_empty_entity_strategy().prop_flat_map(|parent| {
        let total = parent.total_size();
        (Just(parent), child_within_strategy(total))
    })
}

/// Strategy for generating multi-level paths whose every level stays in
/// bounds. Returns the path and the number of levels.
pub fn nested_path_strategy(max_levels: usize) -> impl Strategy<Value = (String, usize)> {
    (non_empty_entity_strategy(), 0..max_levels).prop_flat_map(|(root, extra)| {
        let start = (root.to_literal(), root, 1usize);
        (0..extra).fold(Just(start).boxed(), |acc, _| {
            acc.prop_flat_map(|(path, current, levels)| {
                let total = current.total_size();
                (range_within_strategy(total), Just((path, current, levels)))
                    .prop_map(|((offset, size), (path, current, levels))| {
                        let next = current.subchunk_truncated(offset, size);
                        (format!("{path}/{offset}+{size}"), next, levels + 1)
                    })
            })
            .boxed()
        })
        .prop_map(|(path, _, levels)| (path, levels))
    })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn generated_entities_are_canonical(entity in entity_strategy()) {
            for pair in entity.fragments().windows(2) {
                prop_assert!(!pair[0].is_continued_by(&pair[1]));
            }
            prop_assert!(entity.fragments().iter().all(|f| f.size() > 0));
        }

        #[test]
        fn generated_children_fit((parent, child) in parent_and_child_strategy()) {
            prop_assert!(parent.test(&child));
        }

        #[test]
        fn generated_ranges_fit(
            (total, (offset, size)) in (0u64..10_000)
                .prop_flat_map(|total| (Just(total), range_within_strategy(total)))
        ) {
            prop_assert!(offset + size <= total);
        }

        #[test]
        fn generated_paths_resolve((path, levels) in nested_path_strategy(4)) {
            let store = carvpath_store::InMemoryStore::new();
            let context = carvpath_core::Context::new(&store);
            prop_assert_eq!(path.split('/').count(), levels);
            prop_assert!(context.parse(&path).is_ok());
        }
    }
}
