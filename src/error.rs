use thiserror::Error;

/// The side a rotation turns toward.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// The right child becomes the subtree root.
    Left,
    /// The left child becomes the subtree root.
    Right,
}

/// Errors reported by [`OSTreeMap`](crate::OSTreeMap) operations.
///
/// A failed operation never leaves the tree partially modified.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The key passed to [`insert`](crate::OSTreeMap::insert) is already present.
    #[error("key is already present in the tree")]
    DuplicateKey,

    /// The key passed to a lookup or removal is not present.
    #[error("key not found in the tree")]
    KeyNotFound,

    /// A rank, or an inclusive rank range `start..=end`, does not lie within `0..len`.
    ///
    /// Single-rank lookups report `start == end`. A reversed range (`start > end`) is
    /// reported with this variant as well.
    #[error("rank range {start}..={end} is out of range for a tree of {len} elements")]
    IndexOutOfRange { start: usize, end: usize, len: usize },

    /// A rotation was attempted on a subtree missing the child it pivots on.
    ///
    /// This means the tree's cached heights are corrupt; it cannot happen through the
    /// public API.
    #[error("cannot rotate {direction:?}: the pivot child is absent")]
    InvalidRotation { direction: Direction },
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) const fn out_of_range(start: usize, end: usize, len: usize) -> Self {
        Error::IndexOutOfRange { start, end, len }
    }
}
