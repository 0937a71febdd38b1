//! Collection view adapter.

use lattice_cells_core::logging::{VendSpan, targets};

use crate::error::Result;
use crate::model::{
    CellOf, DataSource, IndexPath, SupplementaryElementKind, SupplementaryViewOf, ViewOf,
};

/// The callback surface a collection view requires of its data source.
pub trait CollectionViewDataSource {
    /// The collection view type.
    type View: ?Sized;
    /// The cell type vended.
    type Cell;
    /// The supplementary view type vended.
    type SupplementaryView;

    /// Returns the number of sections.
    fn number_of_sections(&self) -> usize;

    /// Returns the number of items in `section`.
    fn number_of_items_in_section(&self, section: usize) -> usize;

    /// Vends the cell for the item at `index_path`.
    ///
    /// # Errors
    ///
    /// Any item lookup or vending error from the data source.
    fn cell_for_item_at(
        &self,
        view: &mut Self::View,
        index_path: IndexPath,
    ) -> Result<Self::Cell>;

    /// Vends the supplementary view of `kind` at `index_path`, or `None` if
    /// nothing is registered for it.
    ///
    /// # Errors
    ///
    /// A supplementary view type mismatch.
    fn view_for_supplementary_element(
        &self,
        view: &mut Self::View,
        kind: &SupplementaryElementKind,
        index_path: IndexPath,
    ) -> Result<Option<Self::SupplementaryView>>;
}

/// Answers collection view callbacks from a [`DataSource`].
#[derive(Debug)]
pub struct CollectionAdapter<D> {
    data_source: D,
}

impl<D: DataSource> CollectionAdapter<D> {
    /// Creates an adapter over `data_source`.
    pub fn new(data_source: D) -> Self {
        tracing::debug!(
            target: targets::ADAPTER,
            identifier = ?data_source.identifier(),
            "collection adapter created"
        );
        Self { data_source }
    }

    /// Returns the data source.
    pub fn data_source(&self) -> &D {
        &self.data_source
    }

    /// Returns the data source mutably.
    pub fn data_source_mut(&mut self) -> &mut D {
        &mut self.data_source
    }

    /// Returns the data source, consuming the adapter.
    pub fn into_data_source(self) -> D {
        self.data_source
    }
}

impl<D: DataSource> CollectionViewDataSource for CollectionAdapter<D> {
    type View = ViewOf<D>;
    type Cell = CellOf<D>;
    type SupplementaryView = SupplementaryViewOf<D>;

    fn number_of_sections(&self) -> usize {
        self.data_source.number_of_sections()
    }

    fn number_of_items_in_section(&self, section: usize) -> usize {
        self.data_source.number_of_items_in_section(section)
    }

    fn cell_for_item_at(&self, view: &mut ViewOf<D>, index_path: IndexPath) -> Result<CellOf<D>> {
        let _span = VendSpan::new("cell_for_item_at");
        self.data_source.cell_for_item_in_view(view, index_path)
    }

    fn view_for_supplementary_element(
        &self,
        view: &mut ViewOf<D>,
        kind: &SupplementaryElementKind,
        index_path: IndexPath,
    ) -> Result<Option<SupplementaryViewOf<D>>> {
        let _span = VendSpan::new("view_for_supplementary_element");
        self.data_source
            .supplementary_view_for_element_kind(view, kind, index_path)
    }
}
