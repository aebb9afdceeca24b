//! Entities: canonical, auto-merging fragment lists.
//!
//! An [`Entity`] denotes one addressable region as an ordered list of
//! [`Fragment`]s. Every mutation goes through [`Entity::push`], which keeps
//! the list canonical:
//!
//! - zero-size fragments are never stored
//! - two adjacent sparse fragments never coexist
//! - a concrete fragment never directly continues the previous one
//!
//! Because of this, equal regions always have equal fragment lists and the
//! token produced for an entity is stable under reparsing. Both rules hold
//! while the total size fits in a `u64`; past that point sizes saturate.

mod analysis;
mod projection;
mod token;

pub use token::{FRAGMENT_SEPARATOR, ZERO_TOKEN};

use crate::fragment::Fragment;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Index};

/// An ordered, canonical list of fragments plus its cached total size.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Entity {
    fragments: Vec<Fragment>,
    total_size: u64,
}

impl Entity {
    /// Creates an empty (zero-size) entity.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fragments: Vec::new(),
            total_size: 0,
        }
    }

    /// Creates an entity spanning `[0, size)` of its parent.
    #[must_use]
    pub fn with_size(size: u64) -> Self {
        let mut entity = Self::new();
        entity.push(Fragment::new_concrete(0, size));
        entity
    }

    /// Builds an entity from fragments, merging them as they are appended.
    #[must_use]
    pub fn from_fragments<I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = Fragment>,
    {
        let mut entity = Self::new();
        entity.extend(fragments);
        entity
    }

    /// Appends a fragment, growing the last fragment when the two merge.
    ///
    /// Zero-size fragments are ignored. The total size always increases by
    /// the size of `fragment`, whether or not a merge happened.
    ///
    /// A merge that would push the last fragment's size past `u64::MAX`
    /// stores `fragment` separately instead, so no byte is ever lost. The
    /// total size saturates at `u64::MAX`; such an entity has a literal
    /// token that [`Entity::from_literal`] rejects.
    pub fn push(&mut self, fragment: Fragment) {
        if fragment.size() == 0 {
            return;
        }
        self.total_size = self.total_size.saturating_add(fragment.size());
        match self.fragments.last_mut() {
            Some(last)
                if last.is_continued_by(&fragment)
                    && last.size().checked_add(fragment.size()).is_some() =>
            {
                last.grow(fragment.size())
            }
            _ => self.fragments.push(fragment),
        }
    }

    /// Appends every fragment of `other` in order.
    ///
    /// The boundary between the two entities merges when possible.
    pub fn append(&mut self, other: &Entity) {
        for fragment in &other.fragments {
            self.push(*fragment);
        }
    }

    /// Extends the entity by `delta` bytes at its end.
    ///
    /// The last fragment grows in place; an empty entity gains a first
    /// concrete fragment starting at offset zero. Growth the last fragment
    /// cannot absorb without passing `u64::MAX` continues in a new fragment,
    /// following the [`Entity::push`] rules.
    pub fn grow(&mut self, delta: u64) {
        let next = match self.fragments.last_mut() {
            Some(last) if last.size().checked_add(delta).is_some() => {
                last.grow(delta);
                self.total_size = self.total_size.saturating_add(delta);
                return;
            }
            Some(last) if last.is_sparse() => Fragment::new_sparse(delta),
            Some(last) => Fragment::new_concrete(last.offset().saturating_add(last.size()), delta),
            None => Fragment::new_concrete(0, delta),
        };
        self.push(next);
    }

    /// Returns the number of addressed bytes.
    #[inline]
    #[must_use]
    pub const fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Returns the number of stored fragments.
    #[inline]
    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Returns the fragments in order.
    #[inline]
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Returns the fragment at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Fragment> {
        self.fragments.get(index)
    }

    /// Returns true if the entity addresses no bytes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_size == 0
    }

    /// Returns true if any fragment is sparse.
    #[must_use]
    pub fn has_sparse(&self) -> bool {
        self.fragments.iter().any(Fragment::is_sparse)
    }

    /// Iterates over the fragments.
    pub fn iter(&self) -> std::slice::Iter<'_, Fragment> {
        self.fragments.iter()
    }
}

impl From<Fragment> for Entity {
    fn from(fragment: Fragment) -> Self {
        let mut entity = Self::new();
        entity.push(fragment);
        entity
    }
}

impl FromIterator<Fragment> for Entity {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        Self::from_fragments(iter)
    }
}

impl Extend<Fragment> for Entity {
    fn extend<I: IntoIterator<Item = Fragment>>(&mut self, iter: I) {
        for fragment in iter {
            self.push(fragment);
        }
    }
}

impl<'a> IntoIterator for &'a Entity {
    type Item = &'a Fragment;
    type IntoIter = std::slice::Iter<'a, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}

impl Index<usize> for Entity {
    type Output = Fragment;

    fn index(&self, index: usize) -> &Self::Output {
        &self.fragments[index]
    }
}

impl AddAssign<Fragment> for Entity {
    fn add_assign(&mut self, rhs: Fragment) {
        self.push(rhs);
    }
}

impl AddAssign<&Entity> for Entity {
    fn add_assign(&mut self, rhs: &Entity) {
        self.append(rhs);
    }
}

impl Add<&Entity> for Entity {
    type Output = Entity;

    fn add(mut self, rhs: &Entity) -> Self::Output {
        self.append(rhs);
        self
    }
}

// Zero-size entities sort first, then fragment by fragment, then shorter lists.
impl Ord for Entity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fragments.cmp(&other.fragments)
    }
}

impl PartialOrd for Entity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fragments.is_empty() {
            return f.write_str(ZERO_TOKEN);
        }
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                write!(f, "{FRAGMENT_SEPARATOR}")?;
            }
            write!(f, "{fragment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({self})")
    }
}
