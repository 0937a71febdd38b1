//! Factory and data source composition for list and grid widgets.
//!
//! This module separates *what* to show and *how to configure a cell for it*
//! from *how a particular list widget asks for it*:
//!
//! - A [`Factory`] maps string keys to reuse identifiers plus configuration
//!   closures, and vends configured cells and supplementary views on demand.
//! - A [`DataSource`] exposes sectioned items through counts and lookup, and
//!   vends through its factory.
//! - A [`DataSourceEditor`] optionally describes editing, resolved to an
//!   all-or-nothing [`EditingCapability`].
//!
//! # Core Types
//!
//! - `IndexPath`: a section and an item within it
//! - `ReusableViewDescriptor`: a view class or resource plus its reuse identifier
//! - `ReusableViewHost`: the reuse pool surface of a host widget
//! - `SupplementaryElementKind`: header, footer, or a custom kind
//!
//! # Data Source Implementations
//!
//! - `StaticDataSource`: immutable in-memory sections
//! - `LiveDataSource`: results owned by an external, changing [`ResultSet`]
//! - `SegmentedDataSource`: one of several data sources, switchable
//!
//! # Architecture Overview
//!
//! ```text
//! registration (setup):  app ──> Factory::register_* ──> host reuse pool
//!
//! vending (per callback):
//! ┌──────────┐   ┌─────────┐   ┌────────────┐   ┌─────────┐
//! │   Host   │──>│ Adapter │──>│ DataSource │──>│ Factory │──> configured cell
//! │  widget  │<──│         │<──│            │<──│         │
//! └──────────┘   └─────────┘   └────────────┘   └─────────┘
//! ```

mod data_source;
mod editing;
mod factory;
mod index;
mod kind;
mod live_source;
mod reusable;
mod segmented;
mod static_source;
#[cfg(test)]
pub(crate) mod testing;

pub use data_source::{
    CellIndexOf, CellOf, DataSource, DataSourceSignals, ItemOf, SupplementaryIndexOf,
    SupplementaryViewOf, ViewOf,
};
pub use editing::{
    CanEditFn, CanMoveFn, CommitEditFn, CommitMoveFn, DataSourceEditor, EditAction,
    EditingCapability, Editor,
};
pub use factory::{
    CellConfigurator, CellKeyFn, DEFAULT_CELL_KEY, DEFAULT_SUPPLEMENTARY_KEY, Factory,
    FactoryType, SupplementaryKeyFn, SupplementaryTextConfigurator,
    SupplementaryViewConfigurator,
};
pub use index::{CellIndex, IndexPath, SupplementaryIndex};
pub use kind::{SupplementaryElementIndex, SupplementaryElementKind};
pub use live_source::{LiveDataSource, ResultIndexMapper, ResultSet};
pub use reusable::{ResourceRef, ReusableView, ReusableViewDescriptor, ReusableViewHost, ViewClass};
pub use segmented::SegmentedDataSource;
pub use static_source::{IndexMapper, StaticDataSource};
