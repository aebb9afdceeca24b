//! Projection of local ranges and child entities onto a parent entity.

use super::Entity;
use crate::error::{CarvError, CarvResult};
use crate::fragment::Fragment;

impl Entity {
    /// Projects the local range `[offset, offset + size)` onto absolute
    /// fragments.
    ///
    /// The result passes through the normal merge rule, so parent fragments
    /// that are adjacent in the parent's own space collapse into one.
    ///
    /// # Errors
    ///
    /// Returns [`CarvError::OutOfRange`] if `offset + size` exceeds
    /// [`Entity::total_size`].
    pub fn subchunk(&self, offset: u64, size: u64) -> CarvResult<Entity> {
        self.check_range(offset, size)?;
        let mut chunk = Entity::new();
        self.project_into(&mut chunk, offset, size);
        Ok(chunk)
    }

    /// Like [`Entity::subchunk`], but clamps the range to the entity's end
    /// instead of failing.
    #[must_use]
    pub fn subchunk_truncated(&self, offset: u64, size: u64) -> Entity {
        let mut chunk = Entity::new();
        self.project_into(&mut chunk, offset, self.clamp(offset, size));
        chunk
    }

    /// Projects a whole child entity, expressed relative to `self`, onto
    /// absolute fragments.
    ///
    /// Sparse child fragments pass through unchanged; concrete ones are
    /// resolved with [`Entity::subchunk`].
    ///
    /// # Errors
    ///
    /// Returns [`CarvError::OutOfRange`] if any concrete child fragment
    /// reaches past the end of `self`. No partial result is returned.
    pub fn subentity(&self, child: &Entity) -> CarvResult<Entity> {
        let mut projected = Entity::new();
        for fragment in child.iter() {
            if fragment.is_sparse() {
                projected.push(*fragment);
            } else {
                self.check_range(fragment.offset(), fragment.size())?;
                self.project_into(&mut projected, fragment.offset(), fragment.size());
            }
        }
        Ok(projected)
    }

    /// Like [`Entity::subentity`], but clamps every child fragment to the
    /// entity's end instead of failing.
    #[must_use]
    pub fn subentity_truncated(&self, child: &Entity) -> Entity {
        let mut projected = Entity::new();
        for fragment in child.iter() {
            if fragment.is_sparse() {
                projected.push(*fragment);
            } else {
                let size = self.clamp(fragment.offset(), fragment.size());
                self.project_into(&mut projected, fragment.offset(), size);
            }
        }
        projected
    }

    /// Returns true if `child` lies within the bounds of `self`.
    ///
    /// Equivalent to `self.subentity(child).is_ok()` without building the
    /// projection.
    #[must_use]
    pub fn test(&self, child: &Entity) -> bool {
        child
            .iter()
            .filter(|fragment| !fragment.is_sparse())
            .all(|fragment| self.check_range(fragment.offset(), fragment.size()).is_ok())
    }

    fn check_range(&self, offset: u64, size: u64) -> CarvResult<()> {
        match offset.checked_add(size) {
            Some(end) if end <= self.total_size => Ok(()),
            _ => Err(CarvError::OutOfRange {
                offset,
                size,
                total: self.total_size,
            }),
        }
    }

    fn clamp(&self, offset: u64, size: u64) -> u64 {
        size.min(self.total_size.saturating_sub(offset))
    }

    // Appends the absolute fragments of a range already known to be in bounds.
    fn project_into(&self, out: &mut Entity, offset: u64, size: u64) {
        let mut want_start = offset;
        let mut remaining = size;
        let mut parent_pos: u64 = 0;

        for fragment in &self.fragments {
            if remaining == 0 {
                break;
            }
            let fragment_end = parent_pos.saturating_add(fragment.size());
            if fragment_end > want_start {
                let chunk = remaining.min(fragment_end - want_start);
                if fragment.is_sparse() {
                    out.push(Fragment::new_sparse(chunk));
                } else {
                    let start = fragment.offset().saturating_add(want_start - parent_pos);
                    out.push(Fragment::new_concrete(start, chunk));
                }
                remaining -= chunk;
                want_start += chunk;
            }
            parent_pos = fragment_end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(token: &str) -> Entity {
        token.parse().unwrap()
    }

    #[test]
    fn subchunk_within_single_fragment() {
        let parent = entity("1000+5000");
        assert_eq!(parent.subchunk(100, 200).unwrap().to_literal(), "1100+200");
    }

    #[test]
    fn subchunk_splits_across_gap() {
        let parent = entity("0+20000_40000+20000");
        let chunk = parent.subchunk(10000, 20000).unwrap();
        assert_eq!(chunk.to_literal(), "10000+10000_40000+10000");
        assert_eq!(chunk.total_size(), 20000);
    }

    #[test]
    fn subchunk_of_sparse_parent() {
        let parent = entity("S200000");
        assert_eq!(parent.subchunk(1000, 9000).unwrap().to_literal(), "S9000");
    }

    #[test]
    fn subchunk_mixed_parent() {
        let parent = entity("0+100_S50_500+100");
        assert_eq!(
            parent.subchunk(90, 80).unwrap().to_literal(),
            "90+10_S50_500+20"
        );
    }

    #[test]
    fn subchunk_whole_parent_is_identity() {
        let parent = entity("0+100_S50_500+100");
        assert_eq!(parent.subchunk(0, parent.total_size()).unwrap(), parent);
    }

    #[test]
    fn subchunk_bounds() {
        let parent = entity("0+100");
        assert!(parent.subchunk(0, 100).is_ok());
        assert!(parent.subchunk(100, 0).unwrap().is_empty());
        assert_eq!(
            parent.subchunk(50, 51).unwrap_err(),
            CarvError::OutOfRange {
                offset: 50,
                size: 51,
                total: 100
            }
        );
        assert!(parent.subchunk(101, 0).unwrap_err().is_out_of_range());
        assert!(parent.subchunk(u64::MAX, 2).unwrap_err().is_out_of_range());
    }

    #[test]
    fn subentity_rejoins_adjacent_projection() {
        let parent = entity("0+20000_20000+20000");
        let child = entity("10000+30000");
        assert_eq!(parent.subentity(&child).unwrap().to_literal(), "10000+30000");
    }

    #[test]
    fn subentity_passes_sparse_through() {
        let parent = entity("1000+100");
        let child = entity("0+10_S500_90+10");
        assert_eq!(
            parent.subentity(&child).unwrap().to_literal(),
            "1000+10_S500_1090+10"
        );
    }

    #[test]
    fn subentity_merges_across_child_fragments() {
        let parent = entity("0+50_100+50");
        let child = entity("25+25_50+25");
        assert_eq!(parent.subentity(&child).unwrap().to_literal(), "25+25_100+25");

        let parent = entity("100+50_0+50_150+50");
        let child = entity("40+10_100+10");
        assert_eq!(child.fragment_count(), 2);
        assert_eq!(parent.subentity(&child).unwrap().to_literal(), "140+20");
    }

    #[test]
    fn subentity_fails_without_partial_result() {
        let parent = entity("0+100");
        let child = entity("0+10_95+10");
        assert!(parent.subentity(&child).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_matches_subentity() {
        let top = Entity::with_size(200_000_000_000);
        assert!(top.test(&entity("0+123456789000")));
        assert!(top.test(&entity("S999999999999999")));
        assert!(!top.test(&entity("0+200000000001")));

        let small = Entity::with_size(20000);
        let child = entity("0+100000000000");
        assert_eq!(small.test(&child), small.subentity(&child).is_ok());
        assert!(!small.test(&child));
    }

    #[test]
    fn truncated_projection_clamps() {
        let parent = entity("0+100_S100");
        assert_eq!(parent.subchunk_truncated(150, 100).to_literal(), "S50");
        assert!(parent.subchunk_truncated(300, 10).is_empty());
        assert_eq!(
            parent.subentity_truncated(&entity("90+20_S5_190+50")).to_literal(),
            "90+10_S25"
        );
    }
}
