//! Benchmark utilities.

use carvpath_core::{Entity, Fragment};
use rand::Rng;

/// Generate one random fragment, sparse one time in ten.
pub fn random_fragment<R: Rng>(rng: &mut R) -> Fragment {
    let size = rng.gen_range(1..=1 << 16);
    if rng.gen_ratio(1, 10) {
        Fragment::new_sparse(size)
    } else {
        Fragment::new_concrete(rng.gen_range(0..1 << 40), size)
    }
}

/// Generate an entity of about `count` fragments.
///
/// Neighbouring fragments rarely merge, so the result usually has exactly
/// `count` fragments.
pub fn random_entity(count: usize) -> Entity {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| random_fragment(&mut rng)).collect()
}

/// Generate `count` random in-bounds ranges of `entity`.
pub fn random_ranges(entity: &Entity, count: usize) -> Vec<(u64, u64)> {
    let mut rng = rand::thread_rng();
    let total = entity.total_size();
    (0..count)
        .map(|_| {
            let offset = rng.gen_range(0..=total);
            let size = rng.gen_range(0..=total - offset);
            (offset, size)
        })
        .collect()
}

/// Build a path of `levels` levels, each halving the previous one.
pub fn halving_path(root: &Entity, levels: usize) -> String {
    let mut path = root.to_literal();
    let mut size = root.total_size();
    for _ in 1..levels {
        let quarter = size / 4;
        size /= 2;
        path.push_str(&format!("/{quarter}+{size}"));
    }
    path
}

