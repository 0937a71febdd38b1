//! An immutable, in-memory data source.

use std::fmt;

use lattice_cells_core::logging::targets;

use super::data_source::DataSource;
use super::factory::FactoryType;
use super::index::IndexPath;
use crate::error::{Error, Result};

/// Maps a logical position to a factory index type.
pub type IndexMapper<I> = Box<dyn Fn(IndexPath) -> I>;

/// A data source over items that are fully materialized up front.
///
/// The sections never change after construction, so the counts are always
/// consistent with item lookup.
///
/// # Example
///
/// ```ignore
/// use lattice_cells::model::{DataSource, StaticDataSource};
///
/// let source = StaticDataSource::new(factory, vec!["Apple", "Banana"])
///     .with_identifier("fruit")
///     .with_title("Fruit");
///
/// assert_eq!(source.number_of_sections(), 1);
/// assert_eq!(source.number_of_items_in_section(0), 2);
/// ```
pub struct StaticDataSource<F: FactoryType> {
    identifier: Option<String>,
    title: Option<String>,
    sections: Vec<Vec<F::Item>>,
    factory: F,
    cell_index_mapper: IndexMapper<F::CellIndex>,
    supplementary_index_mapper: IndexMapper<F::SupplementaryIndex>,
}

impl<F> StaticDataSource<F>
where
    F: FactoryType,
    F::CellIndex: From<IndexPath> + 'static,
    F::SupplementaryIndex: From<IndexPath> + 'static,
{
    /// Creates a single-section data source.
    pub fn new(factory: F, items: Vec<F::Item>) -> Self {
        Self::with_sections(factory, vec![items])
    }

    /// Creates a data source with one entry per section.
    pub fn with_sections(factory: F, sections: Vec<Vec<F::Item>>) -> Self {
        Self::with_index_mappers(
            factory,
            sections,
            <F::CellIndex as From<IndexPath>>::from,
            <F::SupplementaryIndex as From<IndexPath>>::from,
        )
    }
}

impl<F: FactoryType> StaticDataSource<F> {
    /// Creates a data source whose factory indices are built by the given
    /// mappers rather than converted from [`IndexPath`].
    pub fn with_index_mappers<C, S>(
        factory: F,
        sections: Vec<Vec<F::Item>>,
        cell_index_mapper: C,
        supplementary_index_mapper: S,
    ) -> Self
    where
        C: Fn(IndexPath) -> F::CellIndex + 'static,
        S: Fn(IndexPath) -> F::SupplementaryIndex + 'static,
    {
        Self {
            identifier: None,
            title: None,
            sections,
            factory,
            cell_index_mapper: Box::new(cell_index_mapper),
            supplementary_index_mapper: Box::new(supplementary_index_mapper),
        }
    }

    /// Sets the identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the cell index mapper.
    pub fn with_index_mapper<C>(mut self, cell_index_mapper: C) -> Self
    where
        C: Fn(IndexPath) -> F::CellIndex + 'static,
    {
        self.cell_index_mapper = Box::new(cell_index_mapper);
        self
    }

    /// Replaces the supplementary index mapper.
    pub fn with_supplementary_index_mapper<S>(mut self, supplementary_index_mapper: S) -> Self
    where
        S: Fn(IndexPath) -> F::SupplementaryIndex + 'static,
    {
        self.supplementary_index_mapper = Box::new(supplementary_index_mapper);
        self
    }

    /// Returns the items of `section`.
    pub fn items(&self, section: usize) -> Option<&[F::Item]> {
        self.sections.get(section).map(Vec::as_slice)
    }

    /// Returns a reference to the item at `index`.
    pub fn get(&self, index: IndexPath) -> Option<&F::Item> {
        self.sections.get(index.section())?.get(index.item())
    }
}

impl<F> DataSource for StaticDataSource<F>
where
    F: FactoryType,
    F::Item: Clone,
{
    type Factory = F;

    fn factory(&self) -> &F {
        &self.factory
    }

    fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    fn number_of_items_in_section(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, Vec::len)
    }

    fn item_at_index(&self, index: IndexPath) -> Result<F::Item> {
        self.get(index).cloned().ok_or_else(|| {
            tracing::debug!(target: targets::DATA_SOURCE, %index, "no item at index");
            Error::no_item(index)
        })
    }

    fn cell_index(&self, index: IndexPath) -> F::CellIndex {
        (self.cell_index_mapper)(index)
    }

    fn supplementary_index(&self, index: IndexPath) -> F::SupplementaryIndex {
        (self.supplementary_index_mapper)(index)
    }
}

impl<F> fmt::Debug for StaticDataSource<F>
where
    F: FactoryType + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticDataSource")
            .field("identifier", &self.identifier)
            .field("title", &self.title)
            .field(
                "sections",
                &self.sections.iter().map(Vec::len).collect::<Vec<_>>(),
            )
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}
