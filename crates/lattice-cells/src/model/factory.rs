//! The cell factory: a registry of reusable view configurations.
//!
//! A [`Factory`] maps caller-chosen string keys to a reuse identifier plus a
//! configuration closure. Vending a cell is a two-stage resolution:
//!
//! 1. **Business key**: the cell key function (or [`DEFAULT_CELL_KEY`]) picks
//!    *which* configuration applies to an item at an index.
//! 2. **Reuse pool**: the host view dequeues *which* physical instance the
//!    configuration is applied to, using the registered identifier.
//!
//! Both stages must agree on the reuse identifier, otherwise vending fails.
//! Keys are resolved at runtime, so one data source can mix several cell
//! types side by side.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use lattice_cells::model::{
//!     Factory, FactoryType, IndexPath, ReusableViewDescriptor, ReusableViewHost,
//!     SupplementaryElementKind,
//! };
//!
//! #[derive(Default)]
//! struct TitleCell {
//!     title: String,
//! }
//!
//! // A host that builds a fresh TitleCell on every dequeue.
//! struct Table;
//!
//! impl ReusableViewHost for Table {
//!     fn register_reusable(
//!         &mut self,
//!         _descriptor: &ReusableViewDescriptor,
//!         _kind: Option<&SupplementaryElementKind>,
//!     ) {
//!     }
//!
//!     fn dequeue_reusable_cell(&mut self, _id: &str, _at: IndexPath) -> Option<Box<dyn Any>> {
//!         Some(Box::new(TitleCell::default()))
//!     }
//!
//!     fn dequeue_reusable_supplementary_view(
//!         &mut self,
//!         _kind: &SupplementaryElementKind,
//!         _id: &str,
//!         _at: IndexPath,
//!     ) -> Option<Box<dyn Any>> {
//!         None
//!     }
//! }
//!
//! let mut table = Table;
//! let mut factory: Factory<String, TitleCell, (), Table> = Factory::new();
//! factory.register_cell(
//!     ReusableViewDescriptor::class::<TitleCell>("Title"),
//!     &mut table,
//!     "Default",
//!     |cell, item, _index| cell.title = item.clone(),
//! );
//!
//! let cell = factory
//!     .cell_for_item(&"Hello".to_string(), &mut table, &IndexPath::new(0, 0))
//!     .unwrap();
//! assert_eq!(cell.title, "Hello");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use lattice_cells_core::logging::targets;

use super::index::{CellIndex, IndexPath, SupplementaryIndex};
use super::kind::{SupplementaryElementIndex, SupplementaryElementKind};
use super::reusable::{ReusableViewDescriptor, ReusableViewHost};
use crate::error::{Error, Result};

/// The cell key used when no cell key function is configured.
pub const DEFAULT_CELL_KEY: &str = "Default";

/// The supplementary key used when no supplementary key function is configured.
pub const DEFAULT_SUPPLEMENTARY_KEY: &str = "Default";

/// Configures a dequeued cell for an item at an index.
pub type CellConfigurator<Cell, Item, CI> = Box<dyn Fn(&mut Cell, &Item, &CI)>;

/// Configures a dequeued supplementary view for an index.
pub type SupplementaryViewConfigurator<SupplementaryView, SI> =
    Box<dyn Fn(&mut SupplementaryView, &SI)>;

/// Produces the text for a supplementary element at an index, if any.
pub type SupplementaryTextConfigurator<SI> = Box<dyn Fn(&SI) -> Option<String>>;

/// Derives the cell key for an item at an index.
pub type CellKeyFn<Item, CI> = Box<dyn Fn(&Item, &CI) -> String>;

/// Derives the supplementary key for an index.
pub type SupplementaryKeyFn<SI> = Box<dyn Fn(&SI) -> String>;

struct CellRegistration<Item, Cell, CI> {
    identifier: String,
    configure: CellConfigurator<Cell, Item, CI>,
}

struct ViewRegistration<SupplementaryView, SI> {
    identifier: String,
    configure: SupplementaryViewConfigurator<SupplementaryView, SI>,
}

/// The vending surface of a factory, with its six types bound together.
///
/// Data sources are generic over one `FactoryType` rather than over each
/// type separately, so the item, cell, view, host, and index types stay
/// consistent across every registration and lookup.
pub trait FactoryType {
    /// The item type cells are configured from.
    type Item;
    /// The cell type vended.
    type Cell;
    /// The supplementary view type vended.
    type SupplementaryView;
    /// The host view whose reuse pool is used.
    type View: ReusableViewHost + ?Sized;
    /// The index type passed to cell configurators.
    type CellIndex: CellIndex;
    /// The index type passed to supplementary configurators.
    type SupplementaryIndex: SupplementaryIndex;

    /// Vends a configured cell for `item` at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::NoCellRegisteredForKey`] if nothing is registered for the
    /// derived key, [`Error::InvalidCellRegistered`] if the host view cannot
    /// produce an instance of the cell type for the registered identifier.
    fn cell_for_item(
        &self,
        item: &Self::Item,
        view: &mut Self::View,
        index: &Self::CellIndex,
    ) -> Result<Self::Cell>;

    /// Vends a configured supplementary view of `kind` at `index`.
    ///
    /// Returns `Ok(None)` when no view is registered for the kind and key.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSupplementaryViewRegistered`] if the host view cannot
    /// produce an instance of the view type for the registered identifier.
    fn supplementary_view_for_kind(
        &self,
        kind: &SupplementaryElementKind,
        view: &mut Self::View,
        index: &Self::SupplementaryIndex,
    ) -> Result<Option<Self::SupplementaryView>>;

    /// Produces the text of a supplementary element of `kind` at `index`.
    ///
    /// Returns `None` when no text is registered for the kind.
    fn supplementary_text_for_kind(
        &self,
        kind: &SupplementaryElementKind,
        index: &Self::SupplementaryIndex,
    ) -> Option<String>;
}

/// A registry of cell, supplementary view, and supplementary text
/// configurations.
///
/// # Type Parameters
///
/// - `Item`: the data item cells are configured from
/// - `Cell`: the cell type the host view dequeues
/// - `SupplementaryView`: the header/footer view type the host view dequeues
/// - `View`: the host view (table, collection) owning the reuse pool
/// - `CI`: the index passed to cell configurators, `IndexPath` by default
/// - `SI`: the index passed to supplementary configurators, `IndexPath` by default
///
/// Registering under an existing key replaces the previous entry. The factory
/// holds no lock: finish registration before vending starts, or serialize the
/// two yourself.
pub struct Factory<Item, Cell, SupplementaryView, View: ?Sized, CI = IndexPath, SI = IndexPath> {
    cells: HashMap<String, CellRegistration<Item, Cell, CI>>,
    views: HashMap<SupplementaryElementIndex, ViewRegistration<SupplementaryView, SI>>,
    texts: HashMap<SupplementaryElementKind, SupplementaryTextConfigurator<SI>>,
    cell_key: Option<CellKeyFn<Item, CI>>,
    supplementary_key: Option<SupplementaryKeyFn<SI>>,
    _view: PhantomData<fn(&mut View)>,
}

impl<Item, Cell, SupplementaryView, View: ?Sized, CI, SI> Default
    for Factory<Item, Cell, SupplementaryView, View, CI, SI>
{
    fn default() -> Self {
        Self {
            cells: HashMap::new(),
            views: HashMap::new(),
            texts: HashMap::new(),
            cell_key: None,
            supplementary_key: None,
            _view: PhantomData,
        }
    }
}

impl<Item, Cell, SupplementaryView, View, CI, SI> Factory<Item, Cell, SupplementaryView, View, CI, SI>
where
    View: ReusableViewHost + ?Sized,
{
    /// Creates an empty factory that uses the default keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the function deriving a cell key from an item and its index.
    ///
    /// Without one, every item resolves to [`DEFAULT_CELL_KEY`].
    pub fn with_cell_key<F>(mut self, cell_key: F) -> Self
    where
        F: Fn(&Item, &CI) -> String + 'static,
    {
        self.cell_key = Some(Box::new(cell_key));
        self
    }

    /// Sets the function deriving a supplementary key from an index.
    ///
    /// Without one, every index resolves to [`DEFAULT_SUPPLEMENTARY_KEY`].
    pub fn with_supplementary_key<F>(mut self, supplementary_key: F) -> Self
    where
        F: Fn(&SI) -> String + 'static,
    {
        self.supplementary_key = Some(Box::new(supplementary_key));
        self
    }

    /// Registers a cell under `key`.
    ///
    /// The descriptor is registered with `view`'s reuse pool; only its
    /// identifier is kept. A previous registration under `key` is replaced.
    pub fn register_cell<F>(
        &mut self,
        descriptor: ReusableViewDescriptor,
        view: &mut View,
        key: impl Into<String>,
        configure: F,
    ) where
        F: Fn(&mut Cell, &Item, &CI) + 'static,
    {
        let key = key.into();
        descriptor.register_in_view(view);
        let identifier = descriptor.identifier().to_string();
        tracing::trace!(target: targets::FACTORY, %key, %identifier, "registering cell");

        let replaced = self.cells.insert(
            key,
            CellRegistration {
                identifier,
                configure: Box::new(configure),
            },
        );
        if replaced.is_some() {
            tracing::trace!(target: targets::FACTORY, "replaced previous cell registration");
        }
    }

    /// Registers a supplementary view of `kind` under `key`.
    ///
    /// A previous registration for the same kind and key is replaced.
    pub fn register_supplementary_view<F>(
        &mut self,
        descriptor: ReusableViewDescriptor,
        kind: SupplementaryElementKind,
        view: &mut View,
        key: impl Into<String>,
        configure: F,
    ) where
        F: Fn(&mut SupplementaryView, &SI) + 'static,
    {
        descriptor.register_in_view_for_kind(view, &kind);
        let identifier = descriptor.identifier().to_string();
        let index = SupplementaryElementIndex::new(kind, key);
        tracing::trace!(
            target: targets::FACTORY,
            kind = %index.kind,
            key = %index.key,
            %identifier,
            "registering supplementary view"
        );

        self.views.insert(
            index,
            ViewRegistration {
                identifier,
                configure: Box::new(configure),
            },
        );
    }

    /// Registers the text producer for supplementary elements of `kind`.
    ///
    /// There is one text producer per kind; registering again replaces it.
    pub fn register_supplementary_text<F>(&mut self, kind: SupplementaryElementKind, configure: F)
    where
        F: Fn(&SI) -> Option<String> + 'static,
    {
        tracing::trace!(target: targets::FACTORY, %kind, "registering supplementary text");
        self.texts.insert(kind, Box::new(configure));
    }

    /// Returns `true` if a cell is registered under `key`.
    pub fn has_cell(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// Returns the reuse identifier registered under a cell `key`.
    pub fn cell_identifier(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(|reg| reg.identifier.as_str())
    }

    /// Returns the registered cell keys, in no particular order.
    pub fn cell_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.keys().map(String::as_str)
    }

    /// Returns `true` if a supplementary view is registered for `kind` and `key`.
    pub fn has_supplementary_view(&self, kind: &SupplementaryElementKind, key: &str) -> bool {
        self.views
            .contains_key(&SupplementaryElementIndex::new(kind.clone(), key))
    }

    /// Returns `true` if supplementary text is registered for `kind`.
    pub fn has_supplementary_text(&self, kind: &SupplementaryElementKind) -> bool {
        self.texts.contains_key(kind)
    }

    fn cell_key_for(&self, item: &Item, index: &CI) -> String {
        match &self.cell_key {
            Some(cell_key) => cell_key(item, index),
            None => DEFAULT_CELL_KEY.to_string(),
        }
    }

    fn supplementary_key_for(&self, index: &SI) -> String {
        match &self.supplementary_key {
            Some(supplementary_key) => supplementary_key(index),
            None => DEFAULT_SUPPLEMENTARY_KEY.to_string(),
        }
    }
}

impl<Item, Cell, SupplementaryView, View, CI, SI> FactoryType
    for Factory<Item, Cell, SupplementaryView, View, CI, SI>
where
    Cell: 'static,
    SupplementaryView: 'static,
    View: ReusableViewHost + ?Sized,
    CI: CellIndex,
    SI: SupplementaryIndex,
{
    type Item = Item;
    type Cell = Cell;
    type SupplementaryView = SupplementaryView;
    type View = View;
    type CellIndex = CI;
    type SupplementaryIndex = SI;

    fn cell_for_item(&self, item: &Item, view: &mut View, index: &CI) -> Result<Cell> {
        let key = self.cell_key_for(item, index);
        let Some(registration) = self.cells.get(&key) else {
            tracing::debug!(target: targets::FACTORY, %key, "no cell registered for key");
            return Err(Error::no_cell_registered(key));
        };

        let position = index.index_path();
        let mut cell = view
            .dequeue_reusable_cell(&registration.identifier, position)
            .and_then(|dequeued| dequeued.downcast::<Cell>().ok())
            .ok_or_else(|| {
                tracing::debug!(
                    target: targets::FACTORY,
                    identifier = %registration.identifier,
                    %position,
                    "dequeued cell is missing or of the wrong type"
                );
                Error::invalid_cell(&registration.identifier, position)
            })?;

        (registration.configure)(&mut cell, item, index);
        Ok(*cell)
    }

    fn supplementary_view_for_kind(
        &self,
        kind: &SupplementaryElementKind,
        view: &mut View,
        index: &SI,
    ) -> Result<Option<SupplementaryView>> {
        let key = SupplementaryElementIndex::new(kind.clone(), self.supplementary_key_for(index));
        let Some(registration) = self.views.get(&key) else {
            return Ok(None);
        };

        let position = index.index_path();
        let mut supplementary = view
            .dequeue_reusable_supplementary_view(kind, &registration.identifier, position)
            .and_then(|dequeued| dequeued.downcast::<SupplementaryView>().ok())
            .ok_or_else(|| {
                tracing::debug!(
                    target: targets::FACTORY,
                    %kind,
                    identifier = %registration.identifier,
                    %position,
                    "dequeued supplementary view is missing or of the wrong type"
                );
                Error::invalid_supplementary_view(kind.clone(), &registration.identifier, position)
            })?;

        (registration.configure)(&mut supplementary, index);
        Ok(Some(*supplementary))
    }

    fn supplementary_text_for_kind(
        &self,
        kind: &SupplementaryElementKind,
        index: &SI,
    ) -> Option<String> {
        self.texts.get(kind).and_then(|configure| configure(index))
    }
}

impl<Item, Cell, SupplementaryView, View: ?Sized, CI, SI> fmt::Debug
    for Factory<Item, Cell, SupplementaryView, View, CI, SI>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells: Vec<_> = self
            .cells
            .iter()
            .map(|(key, reg)| (key.as_str(), reg.identifier.as_str()))
            .collect();
        cells.sort_unstable();
        f.debug_struct("Factory")
            .field("cells", &cells)
            .field("views", &self.views.len())
            .field("texts", &self.texts.len())
            .field("cell_key", &self.cell_key.is_some())
            .field("supplementary_key", &self.supplementary_key.is_some())
            .finish()
    }
}
