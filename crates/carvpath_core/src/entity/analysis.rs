//! Queries over the concrete bytes an entity refers to.

use super::Entity;
use crate::fragment::Fragment;

impl Entity {
    /// Returns a copy without sparse fragments, concrete fragments sorted
    /// by offset.
    ///
    /// Fragments that become adjacent after sorting merge; overlapping
    /// fragments are kept as they are.
    #[must_use]
    pub fn strip_sparse(&self) -> Entity {
        let mut concrete: Vec<Fragment> = self
            .fragments
            .iter()
            .filter(|fragment| !fragment.is_sparse())
            .copied()
            .collect();
        concrete.sort_unstable();
        Entity::from_fragments(concrete)
    }

    /// Returns true if some concrete byte of `self` is also referenced by a
    /// concrete fragment of `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Entity) -> bool {
        let ours = sorted_spans(self);
        let theirs = sorted_spans(other);

        let (mut i, mut j) = (0, 0);
        while i < ours.len() && j < theirs.len() {
            let (a_start, a_end) = ours[i];
            let (b_start, b_end) = theirs[j];
            if a_start < b_end && b_start < a_end {
                return true;
            }
            if a_end <= b_end {
                i += 1;
            } else {
                j += 1;
            }
        }
        false
    }

    /// Returns the inclusive absolute range `[start, end]` covering every
    /// concrete byte at local offsets `>= from_offset`.
    ///
    /// Returns `None` if no concrete byte lies at or past `from_offset`.
    #[must_use]
    pub fn range_of_interest(&self, from_offset: u64) -> Option<(u64, u64)> {
        let mut local: u64 = 0;
        let mut range: Option<(u64, u64)> = None;

        for fragment in &self.fragments {
            let local_end = local.saturating_add(fragment.size());
            if !fragment.is_sparse() && local_end > from_offset {
                let skip = from_offset.saturating_sub(local);
                let start = fragment.offset().saturating_add(skip);
                let end = fragment
                    .offset()
                    .saturating_add(fragment.size())
                    .saturating_sub(1);
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(start), hi.max(end)),
                    None => (start, end),
                });
            }
            local = local_end;
        }
        range
    }

    /// Merges the concrete bytes of `other` into `self`.
    ///
    /// Both entities are read in stripped form: sparse fragments are
    /// ignored and bytes an entity addresses more than once count once.
    /// `self` becomes the sorted union of the two. Returns `(shared, added)`:
    /// the bytes of `other` that `self` already held, and the bytes the
    /// merge added to `self`.
    pub fn merge(&mut self, other: &Entity) -> (Entity, Entity) {
        let chunks = classify(&coalesced_spans(self), &coalesced_spans(other));
        *self = select(&chunks, |ours, theirs| ours || theirs);
        (
            select(&chunks, |ours, theirs| ours && theirs),
            select(&chunks, |ours, theirs| !ours && theirs),
        )
    }

    /// Removes the concrete bytes of `other` from `self`.
    ///
    /// The inverse of [`Entity::merge`], with the same stripped reading of
    /// both entities. Returns `(missing, removed)`: the bytes of `other`
    /// that `self` never held, and the bytes taken out of `self`.
    pub fn unmerge(&mut self, other: &Entity) -> (Entity, Entity) {
        let chunks = classify(&coalesced_spans(self), &coalesced_spans(other));
        *self = select(&chunks, |ours, theirs| ours && !theirs);
        (
            select(&chunks, |ours, theirs| !ours && theirs),
            select(&chunks, |ours, theirs| ours && theirs),
        )
    }

    /// Returns the number of concrete bytes addressed by both entities.
    #[must_use]
    pub fn overlap_size(&self, other: &Entity) -> u64 {
        classify(&coalesced_spans(self), &coalesced_spans(other))
            .iter()
            .filter(|chunk| chunk.ours && chunk.theirs)
            .map(|chunk| chunk.size)
            .sum()
    }

    /// Returns the share of `self` that `other` also addresses, between
    /// `0.0` and `1.0`.
    ///
    /// The share is taken against [`Entity::total_size`], so sparse bytes
    /// of `self` count as never shared. An empty entity has density `0.0`.
    #[must_use]
    pub fn density(&self, other: &Entity) -> f64 {
        if self.total_size == 0 {
            return 0.0;
        }
        self.overlap_size(other) as f64 / self.total_size as f64
    }
}

// A stretch of absolute bytes and which of two entities address it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Chunk {
    offset: u64,
    size: u64,
    ours: bool,
    theirs: bool,
}

fn select(chunks: &[Chunk], rule: impl Fn(bool, bool) -> bool) -> Entity {
    chunks
        .iter()
        .filter(|chunk| rule(chunk.ours, chunk.theirs))
        .map(|chunk| Fragment::new_concrete(chunk.offset, chunk.size))
        .collect()
}

// Walks two sorted, disjoint span lists at once and cuts the bytes they
// cover into chunks. Bytes neither list covers produce no chunk.
fn classify(ours: &[(u64, u64)], theirs: &[(u64, u64)]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut pos = match (ours.first(), theirs.first()) {
        (Some(a), Some(b)) => a.0.min(b.0),
        (Some(a), None) => a.0,
        (None, Some(b)) => b.0,
        (None, None) => return chunks,
    };
    let (mut i, mut j) = (0, 0);

    loop {
        while i < ours.len() && ours[i].1 <= pos {
            i += 1;
        }
        while j < theirs.len() && theirs[j].1 <= pos {
            j += 1;
        }
        let a = ours.get(i).copied();
        let b = theirs.get(j).copied();
        let in_a = a.is_some_and(|(start, _)| start <= pos);
        let in_b = b.is_some_and(|(start, _)| start <= pos);

        let boundary = |span: Option<(u64, u64)>, inside: bool| {
            span.map(|(start, end)| if inside { end } else { start })
        };
        let Some(next) = [boundary(a, in_a), boundary(b, in_b)]
            .into_iter()
            .flatten()
            .min()
        else {
            break;
        };

        if in_a || in_b {
            chunks.push(Chunk {
                offset: pos,
                size: next - pos,
                ours: in_a,
                theirs: in_b,
            });
        }
        pos = next;
    }
    chunks
}

// Sorted, disjoint `[start, end)` spans of the concrete bytes of `entity`.
fn coalesced_spans(entity: &Entity) -> Vec<(u64, u64)> {
    let mut spans: Vec<(u64, u64)> = Vec::new();
    for (start, end) in sorted_spans(entity) {
        if end <= start {
            continue;
        }
        match spans.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => spans.push((start, end)),
        }
    }
    spans
}

fn sorted_spans(entity: &Entity) -> Vec<(u64, u64)> {
    let mut spans: Vec<(u64, u64)> = entity
        .iter()
        .filter(|fragment| !fragment.is_sparse())
        .map(|fragment| {
            let end = fragment.end().unwrap_or(u64::MAX);
            (fragment.offset(), end)
        })
        .collect();
    spans.sort_unstable();
    spans
}
