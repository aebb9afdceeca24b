//! Fragment: the atomic addressing unit.

use crate::error::{CarvError, CarvResult};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Marker that starts a sparse fragment token.
pub const SPARSE_MARKER: char = 'S';

/// Separator between offset and size in a concrete fragment token.
pub const OFFSET_SEPARATOR: char = '+';

/// A single run of addressable bytes.
///
/// A fragment is either:
/// - concrete: the bytes `[offset, offset + size)` of the parent space
/// - sparse: `size` virtual zero bytes that have no backing offset
///
/// Sparse fragments always report an offset of zero, so derived equality
/// and hashing only distinguish sparse fragments by size.
///
/// Token forms are `"<offset>+<size>"` and `"S<size>"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fragment {
    sparse: bool,
    offset: u64,
    size: u64,
}

impl Fragment {
    /// Creates a concrete fragment covering `[offset, offset + size)`.
    #[inline]
    #[must_use]
    pub const fn new_concrete(offset: u64, size: u64) -> Self {
        Self {
            sparse: false,
            offset,
            size,
        }
    }

    /// Creates a sparse fragment of `size` zero bytes.
    #[inline]
    #[must_use]
    pub const fn new_sparse(size: u64) -> Self {
        Self {
            sparse: true,
            offset: 0,
            size,
        }
    }

    /// Parses a single fragment token.
    ///
    /// # Errors
    ///
    /// Returns [`CarvError::Parse`] if the token is empty, lacks the `+`
    /// separator, or has a field that is not a plain decimal `u64`.
    ///
    /// Every fragment built with [`Fragment::new_concrete`] or
    /// [`Fragment::new_sparse`] parses back from its token, including runs
    /// whose end lies past `u64::MAX`.
    pub fn from_token(token: &str) -> CarvResult<Self> {
        if token.is_empty() {
            return Err(CarvError::parse(token, "empty fragment"));
        }

        if let Some(size) = token.strip_prefix(SPARSE_MARKER) {
            let size = parse_field(token, size, "sparse size")?;
            return Ok(Self::new_sparse(size));
        }

        let (offset, size) = token
            .split_once(OFFSET_SEPARATOR)
            .ok_or_else(|| CarvError::parse(token, "missing '+' between offset and size"))?;
        let offset = parse_field(token, offset, "offset")?;
        let size = parse_field(token, size, "size")?;
        Ok(Self::new_concrete(offset, size))
    }

    /// Returns the canonical token for this fragment.
    #[must_use]
    pub fn to_token(&self) -> String {
        self.to_string()
    }

    /// Returns true if this fragment is sparse.
    #[inline]
    #[must_use]
    pub const fn is_sparse(&self) -> bool {
        self.sparse
    }

    /// Returns the offset in the parent space (zero for sparse fragments).
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of bytes addressed.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the exclusive end offset of a concrete fragment.
    ///
    /// Returns `None` for sparse fragments and when the end would not fit
    /// in a `u64`.
    #[must_use]
    pub const fn end(&self) -> Option<u64> {
        if self.sparse {
            None
        } else {
            self.offset.checked_add(self.size)
        }
    }

    /// Extends the fragment by `delta` bytes.
    ///
    /// The size saturates at `u64::MAX`, so the grown fragment always has a
    /// token that [`Fragment::from_token`] accepts.
    pub fn grow(&mut self, delta: u64) {
        self.size = self.size.saturating_add(delta);
    }

    /// Returns true if `next` can be absorbed by growing `self`.
    ///
    /// Two sparse fragments always merge; two concrete fragments merge when
    /// `next` starts exactly where `self` ends.
    #[must_use]
    pub fn is_continued_by(&self, next: &Fragment) -> bool {
        match (self.sparse, next.sparse) {
            (true, true) => true,
            (false, false) => self.end() == Some(next.offset),
            _ => false,
        }
    }
}

fn parse_field(token: &str, field: &str, name: &str) -> CarvResult<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CarvError::parse(
            token,
            format!("{name} is not a decimal number"),
        ));
    }
    field
        .parse::<u64>()
        .map_err(|_| CarvError::parse(token, format!("{name} does not fit in 64 bits")))
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sparse {
            write!(f, "{SPARSE_MARKER}{}", self.size)
        } else {
            write!(f, "{}{OFFSET_SEPARATOR}{}", self.offset, self.size)
        }
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fragment({self})")
    }
}

impl FromStr for Fragment {
    type Err = CarvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

// Sparse runs sort before concrete ones; concrete runs by offset, then size.
impl Ord for Fragment {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .sparse
            .cmp(&self.sparse)
            .then_with(|| self.offset.cmp(&other.offset))
            .then_with(|| self.size.cmp(&other.size))
    }
}

impl PartialOrd for Fragment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
