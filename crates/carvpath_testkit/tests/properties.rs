//! Algebraic properties of entities, projection and flattening.

use carvpath_core::{Config, Context, Entity, Fragment, Top};
use carvpath_store::InMemoryStore;
use carvpath_testkit::prelude::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn literal_roundtrip(entity in entity_strategy()) {
        let literal = entity.to_literal();
        let parsed = Entity::from_literal(&literal).unwrap();
        prop_assert_eq!(&parsed, &entity);
        prop_assert_eq!(parsed.to_literal(), literal);
    }

    #[test]
    fn fragment_roundtrip(fragment in any_valid_fragment_strategy()) {
        let parsed: Fragment = fragment.to_token().parse().unwrap();
        prop_assert_eq!(parsed, fragment);
    }

    #[test]
    fn size_is_sum_of_fragments(fragments in fragment_list_strategy(32)) {
        let expected: u64 = fragments.iter().map(|f| f.size()).sum();
        let entity = Entity::from_fragments(fragments);
        prop_assert_eq!(entity.total_size(), expected);
        let counted: u64 = entity.iter().map(|f| f.size()).sum();
        prop_assert_eq!(counted, expected);
    }

    #[test]
    fn size_is_additive(a in entity_strategy(), b in entity_strategy()) {
        let joined = a.clone() + &b;
        prop_assert_eq!(joined.total_size(), a.total_size() + b.total_size());
    }

    #[test]
    fn size_is_additive_across_push_and_grow(
        steps in prop::collection::vec((fragment_strategy(), 0u64..MAX_FRAGMENT_SIZE, any::<bool>()), 0..32)
    ) {
        let mut entity = Entity::new();
        let mut expected = 0u64;
        for (fragment, delta, grow) in steps {
            if grow {
                entity.grow(delta);
                expected += delta;
            } else {
                entity.push(fragment);
                expected += fragment.size();
            }
            prop_assert_eq!(entity.total_size(), expected);
            let counted: u64 = entity.iter().map(|f| f.size()).sum();
            prop_assert_eq!(counted, expected);
        }
    }

    #[test]
    fn top_grow_extends_bounds(start in 0u64..1_000_000, deltas in prop::collection::vec(0u64..100_000, 0..16)) {
        let mut top = Top::new(start);
        let mut expected = start;
        for delta in deltas {
            top.grow(delta);
            expected += delta;
            prop_assert_eq!(top.size(), expected);
            prop_assert_eq!(top.entity().total_size(), expected);
            let counted: u64 = top.entity().iter().map(|f| f.size()).sum();
            prop_assert_eq!(counted, expected);
            prop_assert!(top.test(&Entity::with_size(expected)));
            prop_assert!(!top.test(&Entity::with_size(expected + 1)));
        }
    }

    #[test]
    fn unmerge_undoes_merge(a in entity_strategy(), b in entity_strategy()) {
        let mut normalized = a.clone();
        normalized.merge(&Entity::new());

        let mut merged = a.clone();
        let (shared, added) = merged.merge(&b);
        prop_assert_eq!(shared.total_size(), a.overlap_size(&b));
        prop_assert_eq!(merged.total_size(), normalized.total_size() + added.total_size());

        let (missing, removed) = merged.unmerge(&added);
        prop_assert!(missing.is_empty());
        prop_assert_eq!(removed, added);
        prop_assert_eq!(merged, normalized);
    }

    #[test]
    fn overlap_size_is_symmetric(a in entity_strategy(), b in entity_strategy()) {
        prop_assert_eq!(a.overlap_size(&b), b.overlap_size(&a));
        prop_assert_eq!(a.overlap_size(&b) > 0, a.overlaps(&b));
        let density = a.density(&b);
        prop_assert!((0.0..=1.0).contains(&density));
    }

    #[test]
    fn entities_stay_canonical(fragments in touching_fragment_list_strategy(32)) {
        let entity = Entity::from_fragments(fragments);
        for pair in entity.fragments().windows(2) {
            prop_assert!(!pair[0].is_continued_by(&pair[1]));
        }
    }

    #[test]
    fn flatten_is_idempotent(entity in entity_strategy()) {
        let store = InMemoryStore::new();
        let context = Context::new(&store);
        let once = context.serialize(&entity).unwrap();
        let twice = context.flatten(&once).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(context.parse(&once).unwrap(), entity);
    }

    #[test]
    fn compression_roundtrip(entity in entity_strategy(), limit in 65usize..200) {
        let store = InMemoryStore::new();
        let context = Context::with_config(&store, Config::new().max_token_len(limit)).unwrap();
        let token = context.serialize(&entity).unwrap();
        prop_assert!(token.len() <= limit);
        prop_assert_eq!(context.parse(&token).unwrap(), entity);
    }

    #[test]
    fn subchunk_has_requested_size((parent, (offset, size)) in non_empty_entity_strategy()
        .prop_flat_map(|parent| {
            let total = parent.total_size();
            (Just(parent), range_within_strategy(total))
        }))
    {
        let chunk = parent.subchunk(offset, size).unwrap();
        prop_assert_eq!(chunk.total_size(), size);
    }

    #[test]
    fn subentity_matches_subchunks((parent, child) in parent_and_child_strategy()) {
        let projected = parent.subentity(&child).unwrap();
        prop_assert_eq!(projected.total_size(), child.total_size());

        let mut expected = Entity::new();
        for fragment in child.iter() {
            if fragment.is_sparse() {
                expected.push(*fragment);
            } else {
                expected.append(&parent.subchunk(fragment.offset(), fragment.size()).unwrap());
            }
        }
        prop_assert_eq!(projected, expected);
    }

    #[test]
    fn projection_is_associative((parent, child) in parent_and_child_strategy(), seed in any::<u64>()) {
        let total = child.total_size();
        prop_assume!(total > 0);
        let offset = seed % total;
        let size = (seed / 7) % (total - offset + 1);
        let grandchild = Entity::from(Fragment::new_concrete(offset, size));

        let nested = parent.subentity(&child).unwrap().subentity(&grandchild).unwrap();
        let composed = parent.subentity(&child.subentity(&grandchild).unwrap()).unwrap();
        prop_assert_eq!(nested, composed);
    }

    #[test]
    fn test_agrees_with_subentity(parent in entity_strategy(), child in entity_strategy()) {
        prop_assert_eq!(parent.test(&child), parent.subentity(&child).is_ok());
    }

    #[test]
    fn top_bounds_iff_concrete_ends_fit(size in 0u64..1_000_000, child in entity_strategy()) {
        let top = Top::new(size);
        let fits = child
            .iter()
            .filter(|f| !f.is_sparse())
            .all(|f| f.offset() + f.size() <= size);
        prop_assert_eq!(top.test(&child), fits);
    }

    #[test]
    fn truncated_never_exceeds_checked((parent, child) in parent_and_child_strategy()) {
        prop_assert_eq!(parent.subentity_truncated(&child), parent.subentity(&child).unwrap());
    }

    #[test]
    fn nested_paths_resolve((path, _levels) in nested_path_strategy(5)) {
        with_context(|ctx| {
            let entity = ctx.parse(&path).unwrap();
            let flat = ctx.flatten(&path).unwrap();
            assert_eq!(ctx.parse(&flat).unwrap(), entity);
        });
    }

    #[test]
    fn strip_sparse_keeps_concrete_bytes(entity in entity_strategy()) {
        let stripped = entity.strip_sparse();
        prop_assert!(!stripped.has_sparse());
        let concrete: u64 = entity.iter().filter(|f| !f.is_sparse()).map(|f| f.size()).sum();
        prop_assert_eq!(stripped.total_size(), concrete);
    }

    #[test]
    fn overlaps_is_symmetric(a in entity_strategy(), b in entity_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }
}
