//! Logging facilities for Lattice Cells.
//!
//! Lattice Cells uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_cells::factory=trace")
//!     .init();
//! ```
//!
//! Registration is logged at `trace`, vending failures at `debug` (they are
//! returned to the caller as errors), and adapter construction at `debug`.

/// Span names used throughout Lattice Cells for tracing.
pub mod span_names {
    /// Cell or supplementary view vending span, opened by adapters.
    pub const VEND: &str = "vend";
    /// Signal emission span.
    pub const EMIT: &str = "emit";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Factory registration and vending.
    pub const FACTORY: &str = "lattice_cells::factory";
    /// Data source lookups and change notification.
    pub const DATA_SOURCE: &str = "lattice_cells::data_source";
    /// Host-widget adapters.
    pub const ADAPTER: &str = "lattice_cells::adapter";
    /// Vending spans around widget callbacks.
    pub const VEND: &str = "lattice_cells::vend";
    /// Signal/slot system.
    pub const SIGNAL: &str = "lattice_cells_core::signal";
}

/// A guard that keeps a vending span entered while it is alive.
///
/// Adapters open one per widget callback so that factory and data source
/// events nest under the callback that caused them.
///
/// ```
/// use lattice_cells_core::logging::VendSpan;
///
/// {
///     let _span = VendSpan::new("cell_for_row");
///     // factory work here is recorded inside the span
/// }
/// ```
#[derive(Debug)]
pub struct VendSpan {
    _span: tracing::span::EnteredSpan,
}

impl VendSpan {
    /// Enter a new vending span for `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::trace_span!(target: targets::VEND, span_names::VEND, operation);
        Self {
            _span: span.entered(),
        }
    }
}
