//! Host widget adapters.
//!
//! Adapters translate a host widget's callbacks (counts, cell requests,
//! section titles, editing) into [`DataSource`](crate::model::DataSource)
//! calls. They own the data source and nothing else: no caching, and no
//! ordering state of their own.

mod collection;
mod table;

pub use collection::{CollectionAdapter, CollectionViewDataSource};
pub use table::{
    BasicTableAdapter, EditableTableAdapter, TableAdapter, TableEditingStyle, TableViewDataSource,
};
