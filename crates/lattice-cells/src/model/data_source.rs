//! The data source contract shared by every concrete data source.
//!
//! A [`DataSource`] exposes sectioned items through a uniform shape (counts
//! and lookup by [`IndexPath`]) and vends cells, supplementary views, and
//! supplementary text by delegating to its [`FactoryType`]. Adapters only ever
//! talk to this trait, so a static list and a live query result look the same
//! to a host widget.

use lattice_cells_core::Signal;

use super::factory::FactoryType;
use super::index::IndexPath;
use super::kind::SupplementaryElementKind;
use crate::error::Result;

/// The item type of a data source.
pub type ItemOf<D> = <<D as DataSource>::Factory as FactoryType>::Item;
/// The cell type a data source vends.
pub type CellOf<D> = <<D as DataSource>::Factory as FactoryType>::Cell;
/// The supplementary view type a data source vends.
pub type SupplementaryViewOf<D> = <<D as DataSource>::Factory as FactoryType>::SupplementaryView;
/// The host view type a data source vends into.
pub type ViewOf<D> = <<D as DataSource>::Factory as FactoryType>::View;
/// The cell index type of a data source's factory.
pub type CellIndexOf<D> = <<D as DataSource>::Factory as FactoryType>::CellIndex;
/// The supplementary index type of a data source's factory.
pub type SupplementaryIndexOf<D> =
    <<D as DataSource>::Factory as FactoryType>::SupplementaryIndex;

/// Sectioned items bound to a factory.
///
/// # Implementation Requirements
///
/// At minimum, implement:
/// - [`factory`](DataSource::factory)
/// - [`number_of_items_in_section`](DataSource::number_of_items_in_section)
/// - [`item_at_index`](DataSource::item_at_index)
/// - [`cell_index`](DataSource::cell_index) and
///   [`supplementary_index`](DataSource::supplementary_index), which translate
///   a logical position into the factory's index types
///
/// The counts must agree with `item_at_index` at every point a host widget
/// can observe them: every position below the reported count resolves, and
/// every position at or beyond it fails with
/// [`Error::NoItemAtIndex`](crate::Error::NoItemAtIndex).
pub trait DataSource {
    /// The factory cells and views are vended through.
    type Factory: FactoryType;

    /// Returns the factory.
    fn factory(&self) -> &Self::Factory;

    /// An identifier for this data source, if it has one.
    fn identifier(&self) -> Option<&str> {
        None
    }

    /// A display title for this data source, if it has one.
    fn title(&self) -> Option<&str> {
        None
    }

    /// Returns the number of sections. Single-section sources keep the
    /// default of 1.
    fn number_of_sections(&self) -> usize {
        1
    }

    /// Returns the number of items in `section`, 0 for unknown sections.
    fn number_of_items_in_section(&self, section: usize) -> usize;

    /// Returns the item at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::NoItemAtIndex`](crate::Error::NoItemAtIndex) if `index` is
    /// outside the reported counts.
    fn item_at_index(&self, index: IndexPath)
    -> Result<<Self::Factory as FactoryType>::Item>;

    /// Maps a logical position to the factory's cell index.
    ///
    /// Must be a pure function of `index` and the current contents.
    fn cell_index(&self, index: IndexPath) -> <Self::Factory as FactoryType>::CellIndex;

    /// Maps a logical position to the factory's supplementary index.
    fn supplementary_index(
        &self,
        index: IndexPath,
    ) -> <Self::Factory as FactoryType>::SupplementaryIndex;

    /// Vends a configured cell for the item at `index`.
    ///
    /// # Errors
    ///
    /// Item lookup errors, then the factory's vending errors.
    fn cell_for_item_in_view(
        &self,
        view: &mut <Self::Factory as FactoryType>::View,
        index: IndexPath,
    ) -> Result<<Self::Factory as FactoryType>::Cell> {
        let item = self.item_at_index(index)?;
        let cell_index = self.cell_index(index);
        self.factory().cell_for_item(&item, view, &cell_index)
    }

    /// Vends a configured supplementary view of `kind` at `index`, or `None`
    /// if the factory has nothing registered for it.
    ///
    /// # Errors
    ///
    /// The factory's supplementary view type-mismatch error.
    fn supplementary_view_for_element_kind(
        &self,
        view: &mut <Self::Factory as FactoryType>::View,
        kind: &SupplementaryElementKind,
        index: IndexPath,
    ) -> Result<Option<<Self::Factory as FactoryType>::SupplementaryView>> {
        let supplementary_index = self.supplementary_index(index);
        self.factory()
            .supplementary_view_for_kind(kind, view, &supplementary_index)
    }

    /// Produces the supplementary text of `kind` at `index`, or `None` if
    /// the factory has nothing registered for it.
    fn supplementary_text_for_element_kind(
        &self,
        kind: &SupplementaryElementKind,
        index: IndexPath,
    ) -> Option<String> {
        let supplementary_index = self.supplementary_index(index);
        self.factory()
            .supplementary_text_for_kind(kind, &supplementary_index)
    }

    /// Returns `true` if `index` is within the reported counts.
    fn contains(&self, index: IndexPath) -> bool {
        index.section() < self.number_of_sections()
            && index.item() < self.number_of_items_in_section(index.section())
    }

    /// Returns the total number of items across all sections.
    fn total_items(&self) -> usize {
        (0..self.number_of_sections())
            .map(|section| self.number_of_items_in_section(section))
            .sum()
    }
}

/// Signals emitted by data sources whose contents change after creation.
///
/// # Signal Usage
///
/// - **Incremental changes**: `about_to_change`, mutate, `changed`
/// - **Wholesale replacement**: `about_to_reset`, replace, `reset`
///
/// Both `about_to_*` signals fire before the counts change, so a host can
/// finish any callback in flight against the old shape.
pub struct DataSourceSignals {
    /// Emitted just before the contents change.
    pub about_to_change: Signal<()>,
    /// Emitted after the contents changed.
    pub changed: Signal<()>,
    /// Emitted just before the contents are replaced.
    pub about_to_reset: Signal<()>,
    /// Emitted after the contents were replaced.
    pub reset: Signal<()>,
}

impl Default for DataSourceSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DataSourceSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceSignals")
            .field("changed", &self.changed.connection_count())
            .field("reset", &self.reset.connection_count())
            .finish_non_exhaustive()
    }
}

impl DataSourceSignals {
    /// Creates a new set of data source signals.
    pub fn new() -> Self {
        Self {
            about_to_change: Signal::new(),
            changed: Signal::new(),
            about_to_reset: Signal::new(),
            reset: Signal::new(),
        }
    }

    /// Calls `change_fn` between `about_to_change` and `changed`.
    pub fn emit_changed<F, T>(&self, change_fn: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.about_to_change.emit(());
        let result = change_fn();
        self.changed.emit(());
        result
    }

    /// Calls `reset_fn` between `about_to_reset` and `reset`.
    pub fn emit_reset<F, T>(&self, reset_fn: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.about_to_reset.emit(());
        let result = reset_fn();
        self.reset.emit(());
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn test_emit_changed_order() {
        let signals = DataSourceSignals::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        let recv = events.clone();
        signals
            .about_to_change
            .connect(move |_| recv.lock().push("about"));
        let recv = events.clone();
        signals.changed.connect(move |_| recv.lock().push("done"));

        let recv = events.clone();
        let value = signals.emit_changed(move || {
            recv.lock().push("change");
            7
        });

        assert_eq!(value, 7);
        assert_eq!(*events.lock(), vec!["about", "change", "done"]);
    }

    #[test]
    fn test_emit_reset() {
        let signals = DataSourceSignals::new();
        let counter = Arc::new(Mutex::new(0));

        let c1 = counter.clone();
        signals.about_to_reset.connect(move |_| *c1.lock() += 1);
        let c2 = counter.clone();
        signals.reset.connect(move |_| *c2.lock() += 10);

        signals.emit_reset(|| {});
        assert_eq!(*counter.lock(), 11);
    }
}
