//! The root entity of an addressable space.

use crate::entity::Entity;

/// The root entity of one addressable space, such as a disk image.
///
/// A `Top` is the authority for bounds checks: paths parsed from untrusted
/// input should be validated with [`Top::test`] before being used for I/O.
/// Appending data to the underlying image is reported with [`Top::grow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Top {
    size: u64,
    entity: Entity,
}

impl Top {
    /// Creates a top entity spanning `[0, size)`.
    #[must_use]
    pub fn new(size: u64) -> Self {
        Self {
            size,
            entity: Entity::with_size(size),
        }
    }

    /// Extends the addressable space by `delta` bytes.
    pub fn grow(&mut self, delta: u64) {
        self.entity.grow(delta);
        self.size = self.size.saturating_add(delta);
    }

    /// Returns true if `child` lies within the addressable space.
    #[must_use]
    pub fn test(&self, child: &Entity) -> bool {
        self.entity.test(child)
    }

    /// Returns the root entity.
    #[must_use]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Returns the declared size of the addressable space.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }
}
