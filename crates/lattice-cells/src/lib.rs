//! Lattice Cells - factory and data source composition for table and
//! collection views.
//!
//! A [`Factory`](model::Factory) registers reusable cell and supplementary
//! view descriptors with a host widget and keeps one configuration closure per
//! key. A [`DataSource`](model::DataSource) holds the items and vends
//! configured cells through its factory. Adapters in [`adapter`] answer the
//! host widget's callbacks from a data source.
//!
//! # Example
//!
//! ```ignore
//! use lattice_cells::adapter::{TableAdapter, TableViewDataSource};
//! use lattice_cells::model::{
//!     DEFAULT_CELL_KEY, DataSourceEditor, Factory, ReusableViewDescriptor, StaticDataSource,
//! };
//!
//! let mut factory = Factory::<Event, EventCell, Header, MyTable>::new();
//! factory.register_cell(
//!     ReusableViewDescriptor::class::<EventCell>("EventCell"),
//!     &mut table,
//!     DEFAULT_CELL_KEY,
//!     |cell, event, _| cell.title = event.title.clone(),
//! );
//!
//! let adapter = TableAdapter::new(
//!     StaticDataSource::new(factory, events),
//!     DataSourceEditor::new(),
//! );
//! let cell = adapter.cell_for_row_at(&mut table, (0, 0).into())?;
//! ```

pub mod adapter;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use lattice_cells_core::*;
