//! Positions for addressing items in sectioned data sources.
//!
//! [`IndexPath`] is the positional representation every host list widget
//! understands: a section, and an item within that section. Factories can be
//! parameterized over richer index types (for example an index that also
//! carries a database read snapshot) as long as those types can report their
//! position through [`CellIndex`] or [`SupplementaryIndex`].

use std::fmt;

/// A position within a sectioned data source.
///
/// Ordering is by section first, then by item, which is the order a list
/// widget lays rows out in.
///
/// # Example
///
/// ```
/// use lattice_cells::model::IndexPath;
///
/// let index = IndexPath::new(1, 4);
/// assert_eq!(index.section(), 1);
/// assert_eq!(index.item(), 4);
/// assert_eq!(index.sibling(5), IndexPath::new(1, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    section: usize,
    item: usize,
}

impl IndexPath {
    /// Creates an index for `item` within `section`.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Creates the index of the first item in `section`.
    ///
    /// Header and footer lookups are made against this position.
    #[inline]
    pub const fn section_start(section: usize) -> Self {
        Self::new(section, 0)
    }

    /// Returns the section of this index.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the item (row) of this index within its section.
    #[inline]
    pub const fn item(&self) -> usize {
        self.item
    }

    /// Alias for [`item`](Self::item), as table views call it.
    #[inline]
    pub const fn row(&self) -> usize {
        self.item
    }

    /// Creates an index at `item` in the same section.
    #[inline]
    pub const fn sibling(&self, item: usize) -> Self {
        Self::new(self.section, item)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}

/// An index type a factory uses when vending cells.
///
/// The host view only understands positions, so every cell index must be
/// able to report one for the dequeue call.
pub trait CellIndex {
    /// The position the host view should dequeue at.
    fn index_path(&self) -> IndexPath;
}

/// An index type a factory uses when vending supplementary views and text.
pub trait SupplementaryIndex {
    /// The position the host view should dequeue at.
    fn index_path(&self) -> IndexPath;
}

impl CellIndex for IndexPath {
    fn index_path(&self) -> IndexPath {
        *self
    }
}

impl SupplementaryIndex for IndexPath {
    fn index_path(&self) -> IndexPath {
        *self
    }
}

static_assertions::assert_impl_all!(IndexPath: Send, Sync, Copy);
