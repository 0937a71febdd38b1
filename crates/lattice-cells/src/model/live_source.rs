//! A data source over externally-observed, changing results.
//!
//! `LiveDataSource` reads its items from a [`ResultSet`], the collaborator
//! that owns a live query (a database view, a fetched results controller, a
//! synced collection). The collaborator changes the results only through
//! [`LiveDataSource::update`] or [`LiveDataSource::replace_results`], which
//! bracket the change with [`DataSourceSignals`] so a host widget reloads
//! before it reads the new counts.

use std::cell::{Ref, RefCell};
use std::fmt;

use lattice_cells_core::logging::targets;

use super::data_source::{DataSource, DataSourceSignals};
use super::factory::FactoryType;
use super::index::IndexPath;
use crate::error::{Error, Result};

/// Sectioned query results supplied by an external collaborator.
pub trait ResultSet {
    /// The item type the results hold.
    type Item;

    /// Returns the number of sections.
    fn section_count(&self) -> usize {
        1
    }

    /// Returns the number of items in `section`, 0 for unknown sections.
    fn item_count(&self, section: usize) -> usize;

    /// Returns the item at `index`, or `None` if it is out of range.
    fn item(&self, index: IndexPath) -> Option<Self::Item>;
}

impl<T: Clone> ResultSet for Vec<T> {
    type Item = T;

    fn item_count(&self, section: usize) -> usize {
        if section == 0 { self.len() } else { 0 }
    }

    fn item(&self, index: IndexPath) -> Option<T> {
        if index.section() == 0 {
            self.get(index.item()).cloned()
        } else {
            None
        }
    }
}

/// Maps a logical position to a factory index, with read access to the
/// results the position refers to.
pub type ResultIndexMapper<R, I> = Box<dyn Fn(&R, IndexPath) -> I>;

/// A data source whose contents are owned by a [`ResultSet`] and may change.
///
/// The results sit in a `RefCell` so that the collaborator can update them
/// through a shared reference while an adapter owns the data source. Signals
/// are emitted with the results unborrowed, so connected slots may read counts.
pub struct LiveDataSource<R, F: FactoryType> {
    identifier: Option<String>,
    title: Option<String>,
    results: RefCell<R>,
    factory: F,
    cell_index_mapper: ResultIndexMapper<R, F::CellIndex>,
    supplementary_index_mapper: ResultIndexMapper<R, F::SupplementaryIndex>,
    signals: DataSourceSignals,
}

impl<R, F> LiveDataSource<R, F>
where
    R: ResultSet<Item = F::Item>,
    F: FactoryType,
    F::CellIndex: From<IndexPath>,
    F::SupplementaryIndex: From<IndexPath>,
{
    /// Creates a live data source over `results`.
    pub fn new(factory: F, results: R) -> Self {
        Self::with_index_mappers(
            factory,
            results,
            |_, index| <F::CellIndex as From<IndexPath>>::from(index),
            |_, index| <F::SupplementaryIndex as From<IndexPath>>::from(index),
        )
    }
}

impl<R, F> LiveDataSource<R, F>
where
    R: ResultSet<Item = F::Item>,
    F: FactoryType,
{
    /// Creates a live data source whose factory indices are resolved against
    /// the current results, for example to attach a read snapshot.
    pub fn with_index_mappers<C, S>(
        factory: F,
        results: R,
        cell_index_mapper: C,
        supplementary_index_mapper: S,
    ) -> Self
    where
        C: Fn(&R, IndexPath) -> F::CellIndex + 'static,
        S: Fn(&R, IndexPath) -> F::SupplementaryIndex + 'static,
    {
        Self {
            identifier: None,
            title: None,
            results: RefCell::new(results),
            factory,
            cell_index_mapper: Box::new(cell_index_mapper),
            supplementary_index_mapper: Box::new(supplementary_index_mapper),
            signals: DataSourceSignals::new(),
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

    /// Returns the change signals.
    pub fn signals(&self) -> &DataSourceSignals {
        &self.signals
    }

    /// Read access to the current results.
    ///
    /// Drop the returned borrow before calling [`update`](Self::update) or
    /// [`replace_results`](Self::replace_results).
    pub fn results(&self) -> Ref<'_, R> {
        self.results.borrow()
    }

    /// Mutates the results in place, emitting `about_to_change` before and
    /// `changed` after.
    ///
    /// The results are mutably borrowed while `change` runs, so `change` must
    /// not read this data source.
    pub fn update<T>(&self, change: impl FnOnce(&mut R) -> T) -> T {
        tracing::trace!(target: targets::DATA_SOURCE, identifier = ?self.identifier, "updating results");
        self.signals
            .emit_changed(|| change(&mut *self.results.borrow_mut()))
    }

    /// Replaces the results wholesale, emitting `about_to_reset` before and
    /// `reset` after. Returns the previous results.
    pub fn replace_results(&self, results: R) -> R {
        tracing::trace!(target: targets::DATA_SOURCE, identifier = ?self.identifier, "replacing results");
        self.signals
            .emit_reset(|| std::mem::replace(&mut *self.results.borrow_mut(), results))
    }
}

impl<R, F> DataSource for LiveDataSource<R, F>
where
    R: ResultSet<Item = F::Item>,
    F: FactoryType,
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
        self.results.borrow().section_count()
    }

    fn number_of_items_in_section(&self, section: usize) -> usize {
        self.results.borrow().item_count(section)
    }

    fn item_at_index(&self, index: IndexPath) -> Result<F::Item> {
        let results = self.results.borrow();
        if index.section() >= results.section_count()
            || index.item() >= results.item_count(index.section())
        {
            tracing::debug!(target: targets::DATA_SOURCE, %index, "no item at index");
            return Err(Error::no_item(index));
        }
        results.item(index).ok_or_else(|| Error::no_item(index))
    }

    fn cell_index(&self, index: IndexPath) -> F::CellIndex {
        (self.cell_index_mapper)(&*self.results.borrow(), index)
    }

    fn supplementary_index(&self, index: IndexPath) -> F::SupplementaryIndex {
        (self.supplementary_index_mapper)(&*self.results.borrow(), index)
    }
}

impl<R, F> fmt::Debug for LiveDataSource<R, F>
where
    R: fmt::Debug,
    F: FactoryType + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveDataSource")
            .field("identifier", &self.identifier)
            .field("title", &self.title)
            .field("results", &*self.results.borrow())
            .field("factory", &self.factory)
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::model::factory::{DEFAULT_CELL_KEY, Factory};
    use crate::model::index::CellIndex;
    use crate::model::kind::SupplementaryElementKind;
    use crate::model::reusable::ReusableViewDescriptor;
    use crate::model::testing::{HeaderView, RecordingView, TextCell};

    /// Rows grouped by day, with a version bumped on every write, the way a
    /// database view exposes a snapshot.
    #[derive(Debug, Default)]
    struct Journal {
        days: Vec<Vec<String>>,
        version: u64,
    }

    impl ResultSet for Journal {
        type Item = String;

        fn section_count(&self) -> usize {
            self.days.len()
        }

        fn item_count(&self, section: usize) -> usize {
            self.days.get(section).map_or(0, Vec::len)
        }

        fn item(&self, index: IndexPath) -> Option<String> {
            self.days.get(index.section())?.get(index.item()).cloned()
        }
    }

    /// A cell index carrying the snapshot version it was read at.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct SnapshotIndex {
        position: IndexPath,
        version: u64,
    }

    impl CellIndex for SnapshotIndex {
        fn index_path(&self) -> IndexPath {
            self.position
        }
    }

    type JournalFactory = Factory<String, TextCell, HeaderView, RecordingView, SnapshotIndex>;

    fn journal_source(view: &mut RecordingView) -> LiveDataSource<Journal, JournalFactory> {
        let mut factory = JournalFactory::new();
        factory.register_cell(
            ReusableViewDescriptor::class::<TextCell>("Entry"),
            view,
            DEFAULT_CELL_KEY,
            |cell, item, index| cell.text = format!("{item}@v{}", index.version),
        );
        let journal = Journal {
            days: vec![vec!["wake".into(), "run".into()], vec!["read".into()]],
            version: 1,
        };
        LiveDataSource::with_index_mappers(
            factory,
            journal,
            |journal, position| SnapshotIndex {
                position,
                version: journal.version,
            },
            |_, position| position,
        )
        .with_identifier("journal")
    }

    #[test]
    fn test_counts_follow_results() {
        let mut view = RecordingView::new();
        let source = journal_source(&mut view);

        assert_eq!(source.number_of_sections(), 2);
        assert_eq!(source.number_of_items_in_section(0), 2);
        assert_eq!(source.number_of_items_in_section(1), 1);
        assert_eq!(source.number_of_items_in_section(2), 0);
        assert_eq!(source.identifier(), Some("journal"));

        assert_eq!(source.item_at_index(IndexPath::new(1, 0)), Ok("read".to_string()));
        assert_eq!(
            source.item_at_index(IndexPath::new(1, 1)),
            Err(Error::no_item(IndexPath::new(1, 1)))
        );
    }

    #[test]
    fn test_cell_index_resolved_against_results() {
        let mut view = RecordingView::new();
        let source = journal_source(&mut view);

        let cell = source
            .cell_for_item_in_view(&mut view, IndexPath::new(0, 1))
            .unwrap();
        assert_eq!(cell.text, "run@v1");

        source.update(|journal| {
            journal.days[0][1] = "swim".into();
            journal.version += 1;
        });

        let cell = source
            .cell_for_item_in_view(&mut view, IndexPath::new(0, 1))
            .unwrap();
        assert_eq!(cell.text, "swim@v2");
    }

    #[test]
    fn test_update_notifies_around_change() {
        let mut view = RecordingView::new();
        let source = journal_source(&mut view);
        let events = Arc::new(Mutex::new(Vec::new()));

        let recv = events.clone();
        source
            .signals()
            .about_to_change
            .connect(move |_| recv.lock().push("about"));
        let recv = events.clone();
        source
            .signals()
            .changed
            .connect(move |_| recv.lock().push("changed"));

        let recv = events.clone();
        let sections = source.update(move |journal| {
            recv.lock().push("mutate");
            journal.days.push(vec!["sleep".into()]);
            journal.days.len()
        });

        assert_eq!(sections, 3);
        assert_eq!(*events.lock(), vec!["about", "mutate", "changed"]);
        assert_eq!(source.number_of_sections(), 3);
        assert_eq!(source.number_of_items_in_section(2), 1);
    }

    #[test]
    fn test_replace_results_emits_reset() {
        let mut view = RecordingView::new();
        let source = journal_source(&mut view);
        let resets = Arc::new(Mutex::new(0));

        let recv = resets.clone();
        source.signals().reset.connect(move |_| *recv.lock() += 1);

        let previous = source.replace_results(Journal::default());

        assert_eq!(previous.days.len(), 2);
        assert_eq!(*resets.lock(), 1);
        assert_eq!(source.number_of_sections(), 0);
        assert!(source.results().days.is_empty());
    }

    #[test]
    fn test_vec_results() {
        let mut view = RecordingView::new();
        let mut factory: Factory<String, TextCell, HeaderView, RecordingView> = Factory::new();
        factory.register_cell(
            ReusableViewDescriptor::class::<TextCell>("Text"),
            &mut view,
            DEFAULT_CELL_KEY,
            |cell, item, _| cell.text = item.clone(),
        );
        let source = LiveDataSource::new(factory, vec!["x".to_string()]);

        assert_eq!(source.number_of_sections(), 1);
        assert_eq!(source.number_of_items_in_section(0), 1);
        assert_eq!(source.number_of_items_in_section(1), 0);

        source.update(|items| items.push("y".into()));
        let cell = source
            .cell_for_item_in_view(&mut view, IndexPath::new(0, 1))
            .unwrap();
        assert_eq!(cell.text, "y");
    }

    #[test]
    fn test_index_mappers_called_once_per_vend() {
        let mut view = RecordingView::new();
        let mut factory = JournalFactory::new();
        factory.register_cell(
            ReusableViewDescriptor::class::<TextCell>("Entry"),
            &mut view,
            DEFAULT_CELL_KEY,
            |cell, item, _| cell.text = item.clone(),
        );
        factory.register_supplementary_text(SupplementaryElementKind::Header, |index| {
            Some(format!("Day {}", index.section()))
        });
        let cell_calls = Arc::new(Mutex::new(0));
        let supplementary_calls = Arc::new(Mutex::new(0));

        let cell_counter = cell_calls.clone();
        let supplementary_counter = supplementary_calls.clone();
        let source = LiveDataSource::with_index_mappers(
            factory,
            Journal {
                days: vec![vec!["wake".into(), "run".into()]],
                version: 3,
            },
            move |journal, position| {
                *cell_counter.lock() += 1;
                SnapshotIndex {
                    position,
                    version: journal.version,
                }
            },
            move |_, position| {
                *supplementary_counter.lock() += 1;
                position
            },
        );

        for item in 0..2 {
            source
                .cell_for_item_in_view(&mut view, IndexPath::new(0, item))
                .unwrap();
        }
        assert_eq!(*cell_calls.lock(), 2);

        // Item lookup fails before any index is mapped.
        let err = source
            .cell_for_item_in_view(&mut view, IndexPath::new(0, 2))
            .unwrap_err();
        assert_eq!(err, Error::no_item(IndexPath::new(0, 2)));
        assert_eq!(*cell_calls.lock(), 2);

        source.supplementary_text_for_element_kind(
            &SupplementaryElementKind::Header,
            IndexPath::section_start(0),
        );
        assert_eq!(*supplementary_calls.lock(), 1);
        assert_eq!(*cell_calls.lock(), 2);
    }

    #[test]
    fn test_changed_slot_reads_new_counts() {
        let mut view = RecordingView::new();
        let source = Rc::new(journal_source(&mut view));
        let seen = Rc::new(RefCell::new(Vec::new()));

        for signal in [&source.signals().about_to_change, &source.signals().changed] {
            let weak = Rc::downgrade(&source);
            let seen = Rc::clone(&seen);
            signal.connect(move |_| {
                if let Some(source) = weak.upgrade() {
                    seen.borrow_mut().push(source.number_of_sections());
                }
            });
        }

        source.update(|journal| journal.days.push(vec!["sleep".into()]));

        assert_eq!(*seen.borrow(), vec![2, 3]);
    }
}
