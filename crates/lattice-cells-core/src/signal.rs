//! Change signals for Lattice Cells.
//!
//! Data sources whose backing storage can change underneath a list widget
//! (live query results, segmented sources switching their selection) announce
//! those changes through a [`Signal`]. The host connects a slot and reloads
//! its counts before the next widget callback.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - Emits a notification to every connected slot
//! - [`ConnectionId`] - Returned when connecting a slot, used to disconnect it
//! - [`ConnectionGuard`] - Disconnects its slot when dropped
//!
//! # Delivery
//!
//! Slots are invoked directly, in connection order, on the thread that calls
//! [`Signal::emit`]. A signal is neither `Send` nor `Sync`: it lives on the
//! thread that owns the list widget, and its slots may capture that thread's
//! state (`Rc<RefCell<_>>` handles to the widget, for instance). A
//! collaborator preparing data off-thread must marshal its emission back onto
//! that thread.
//!
//! # Example
//!
//! ```
//! use lattice_cells_core::Signal;
//!
//! let reloaded = Signal::<usize>::new();
//!
//! let conn_id = reloaded.connect(|sections| {
//!     println!("now showing {} sections", sections);
//! });
//!
//! reloaded.emit(3);
//! reloaded.disconnect(conn_id);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::logging::{span_names, targets};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Rc<dyn Fn(&Args)>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(usize, usize)` for multiple arguments.
pub struct Signal<Args> {
    connections: RefCell<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: Cell<bool>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.borrow().len())
            .field("blocked", &self.blocked.get())
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: RefCell::new(SlotMap::with_key()),
            blocked: Cell::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + 'static,
    {
        self.connections.borrow_mut().insert(Rc::new(slot))
    }

    /// Connect a slot that is disconnected when the returned guard is dropped.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.borrow_mut().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.borrow_mut().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.borrow().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.set(blocked);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.get()
    }

    /// Emit the signal, invoking all connected slots with `args`.
    ///
    /// The connection table is snapshotted before any slot runs, so a slot may
    /// connect or disconnect on this same signal. Slots connected during an
    /// emission are first called on the next one; slots disconnected during an
    /// emission still receive the current one.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.borrow().values().cloned().collect();
        let _span = tracing::trace_span!(
            target: targets::SIGNAL,
            span_names::EMIT,
            connection_count = slots.len()
        )
        .entered();

        for slot in slots {
            slot(&args);
        }
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`]. The guard borrows the signal, so
/// the borrow checker guarantees the signal outlives it.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use lattice_cells_core::Signal;
///
/// let signal = Signal::<i32>::new();
/// let total = Rc::new(Cell::new(0));
/// {
///     let total = Rc::clone(&total);
///     let _guard = signal.connect_scoped(move |&n| total.set(total.get() + n));
///     signal.emit(42);
/// }
/// signal.emit(43);
/// assert_eq!(total.get(), 42);
/// ```
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The id of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> std::fmt::Debug for ConnectionGuard<'_, Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

static_assertions::assert_not_impl_any!(Signal<()>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    /// Stand-in for a list widget owned by the UI thread.
    #[derive(Default)]
    struct Widget {
        reloads: Vec<usize>,
    }

    #[test]
    fn test_slot_reaches_ui_thread_state() {
        let signal = Signal::<usize>::new();
        let widget = Rc::new(RefCell::new(Widget::default()));

        let target = Rc::clone(&widget);
        signal.connect(move |&sections| target.borrow_mut().reloads.push(sections));

        signal.emit(2);
        signal.emit(5);

        assert_eq!(widget.borrow().reloads, vec![2, 5]);
        // The slot holds the only other handle.
        assert_eq!(Rc::strong_count(&widget), 2);
        signal.disconnect_all();
        assert_eq!(Rc::strong_count(&widget), 1);
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<()>::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for name in ["count", "reload", "scroll"] {
            let order = Rc::clone(&order);
            signal.connect(move |_| order.borrow_mut().push(name));
        }
        signal.emit(());

        assert_eq!(*order.borrow(), ["count", "reload", "scroll"]);
    }

    #[test]
    fn test_disconnect_and_block() {
        let signal = Signal::<i32>::new();
        let received = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&received);
        let id = signal.connect(move |&value| sink.borrow_mut().push(value));

        signal.emit(1);
        signal.set_blocked(true);
        signal.emit(2);
        assert!(signal.is_blocked());
        signal.set_blocked(false);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(3);

        assert_eq!(*received.borrow(), vec![1]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_guard_disconnects_on_drop() {
        let signal = Signal::<()>::new();
        let calls = Rc::new(Cell::new(0));

        let guard = {
            let calls = Rc::clone(&calls);
            signal.connect_scoped(move |_| calls.set(calls.get() + 1))
        };
        signal.emit(());
        assert!(format!("{guard:?}").contains("ConnectionGuard"));
        drop(guard);
        signal.emit(());

        assert_eq!(calls.get(), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_emit_uses_snapshot_of_connections() {
        let signal = Rc::new(Signal::<()>::new());
        let calls = Rc::new(RefCell::new(Vec::new()));

        // The first slot disconnects itself and connects a replacement.
        let own_id: Rc<Cell<Option<ConnectionId>>> = Rc::new(Cell::new(None));
        let weak = Rc::downgrade(&signal);
        let log = Rc::clone(&calls);
        let id_slot = Rc::clone(&own_id);
        let id = signal.connect(move |_| {
            log.borrow_mut().push("once");
            if let (Some(signal), Some(id)) = (weak.upgrade(), id_slot.get()) {
                signal.disconnect(id);
                let log = Rc::clone(&log);
                signal.connect(move |_| log.borrow_mut().push("replacement"));
            }
        });
        own_id.set(Some(id));

        signal.emit(());
        assert_eq!(*calls.borrow(), ["once"]);
        signal.emit(());
        assert_eq!(*calls.borrow(), ["once", "replacement"]);
    }
}
