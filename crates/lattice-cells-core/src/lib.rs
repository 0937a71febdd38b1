//! Core primitives for Lattice Cells.
//!
//! This crate provides the pieces the cell composition layer builds on:
//!
//! - **Signal/Slot System**: change notification for data sources whose
//!   contents can change underneath a list widget
//! - **Logging**: `tracing` targets and span names shared by every crate
//!
//! # Signal Example
//!
//! ```
//! use lattice_cells_core::Signal;
//!
//! let changed = Signal::<()>::new();
//! let conn_id = changed.connect(|_| println!("reload the table"));
//! changed.emit(());
//! changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::VendSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
