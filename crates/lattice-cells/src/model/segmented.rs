//! A data source that switches between several child data sources.
//!
//! Screens with a segmented control ("Upcoming / Past / All") show one of
//! several data sources in the same list widget. `SegmentedDataSource` holds
//! them all, forwards every [`DataSource`] call to the selected one, and emits
//! `selection_changed` when the selection moves so the host reloads.

use std::cell::Cell;
use std::fmt;

use lattice_cells_core::Signal;
use lattice_cells_core::logging::targets;

use super::data_source::DataSource;
use super::factory::FactoryType;
use super::index::IndexPath;
use super::kind::SupplementaryElementKind;
use crate::error::{Error, Result};

/// Several data sources of one type, one of which is selected.
pub struct SegmentedDataSource<D> {
    identifier: Option<String>,
    title: Option<String>,
    segments: Vec<D>,
    selected: Cell<usize>,
    selection_changed: Signal<usize>,
}

impl<D: DataSource> SegmentedDataSource<D> {
    /// Creates a segmented data source with the first segment selected.
    ///
    /// # Errors
    ///
    /// [`Error::NoSegments`] if `segments` is empty.
    pub fn new(segments: Vec<D>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::NoSegments);
        }
        Ok(Self {
            identifier: None,
            title: None,
            segments,
            selected: Cell::new(0),
            selection_changed: Signal::new(),
        })
    }

    /// Sets the identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the title. Without one, the selected segment's title is used.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Emitted with the new index after the selection changes.
    pub fn selection_changed(&self) -> &Signal<usize> {
        &self.selection_changed
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`: construction rejects an empty segment list.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments in order.
    pub fn segments(&self) -> &[D] {
        &self.segments
    }

    /// Returns the index of the selected segment.
    pub fn selected_index(&self) -> usize {
        self.selected.get()
    }

    /// Returns the selected segment.
    pub fn selected(&self) -> &D {
        &self.segments[self.selected_index()]
    }

    /// Selects the segment at `index`.
    ///
    /// Returns `false` and keeps the current selection if `index` is out of
    /// range. Selecting the current segment again emits nothing.
    pub fn select(&self, index: usize) -> bool {
        if index >= self.segments.len() {
            return false;
        }
        let previous = self.selected.replace(index);
        if previous != index {
            tracing::debug!(target: targets::DATA_SOURCE, previous, index, "segment selected");
            self.selection_changed.emit(index);
        }
        true
    }

    /// Returns the index and segment whose identifier is `identifier`.
    pub fn segment_with_identifier(&self, identifier: &str) -> Option<(usize, &D)> {
        self.segments
            .iter()
            .enumerate()
            .find(|(_, segment)| segment.identifier() == Some(identifier))
    }

    /// Selects the segment whose identifier is `identifier`.
    pub fn select_identifier(&self, identifier: &str) -> bool {
        match self.segment_with_identifier(identifier) {
            Some((index, _)) => self.select(index),
            None => false,
        }
    }
}

impl<D: DataSource> DataSource for SegmentedDataSource<D> {
    type Factory = D::Factory;

    fn factory(&self) -> &D::Factory {
        self.selected().factory()
    }

    fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref().or_else(|| self.selected().title())
    }

    fn number_of_sections(&self) -> usize {
        self.selected().number_of_sections()
    }

    fn number_of_items_in_section(&self, section: usize) -> usize {
        self.selected().number_of_items_in_section(section)
    }

    fn item_at_index(&self, index: IndexPath) -> Result<<D::Factory as FactoryType>::Item> {
        self.selected().item_at_index(index)
    }

    fn cell_index(&self, index: IndexPath) -> <D::Factory as FactoryType>::CellIndex {
        self.selected().cell_index(index)
    }

    fn supplementary_index(
        &self,
        index: IndexPath,
    ) -> <D::Factory as FactoryType>::SupplementaryIndex {
        self.selected().supplementary_index(index)
    }

    fn cell_for_item_in_view(
        &self,
        view: &mut <D::Factory as FactoryType>::View,
        index: IndexPath,
    ) -> Result<<D::Factory as FactoryType>::Cell> {
        self.selected().cell_for_item_in_view(view, index)
    }

    fn supplementary_view_for_element_kind(
        &self,
        view: &mut <D::Factory as FactoryType>::View,
        kind: &SupplementaryElementKind,
        index: IndexPath,
    ) -> Result<Option<<D::Factory as FactoryType>::SupplementaryView>> {
        self.selected()
            .supplementary_view_for_element_kind(view, kind, index)
    }

    fn supplementary_text_for_element_kind(
        &self,
        kind: &SupplementaryElementKind,
        index: IndexPath,
    ) -> Option<String> {
        self.selected()
            .supplementary_text_for_element_kind(kind, index)
    }
}

impl<D: fmt::Debug> fmt::Debug for SegmentedDataSource<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedDataSource")
            .field("identifier", &self.identifier)
            .field("selected", &self.selected.get())
            .field("segments", &self.segments)
            .finish_non_exhaustive()
    }
}
