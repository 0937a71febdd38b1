//! Editing capability for data sources.
//!
//! Editing is described separately from the [`DataSource`](super::DataSource)
//! contract, as four closures: can-edit, commit-edit, can-move, and
//! commit-move. Adapters treat them as a unit: only a descriptor with all four
//! present resolves to [`EditingCapability::Full`], anything less resolves to
//! [`EditingCapability::None`] and the adapter stays read-only.
//!
//! The closures own the mutation. Adapters hold no ordering state and never
//! touch item storage themselves.

use std::fmt;

use super::index::IndexPath;

/// A neutral edit action, independent of any toolkit's editing enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditAction {
    /// No action.
    #[default]
    None,
    /// Remove the item.
    Delete,
    /// Insert an item.
    Insert,
}

/// Decides whether the item at an index may be edited.
pub type CanEditFn = Box<dyn Fn(IndexPath) -> bool>;
/// Commits an edit action for the item at an index.
pub type CommitEditFn = Box<dyn Fn(EditAction, IndexPath)>;
/// Decides whether the item at an index may be moved.
pub type CanMoveFn = Box<dyn Fn(IndexPath) -> bool>;
/// Commits a move from one index to another.
pub type CommitMoveFn = Box<dyn Fn(IndexPath, IndexPath)>;

/// Four independently optional editing closures.
///
/// # Example
///
/// ```
/// use lattice_cells::model::{DataSourceEditor, EditAction, EditingCapability};
///
/// let editor = DataSourceEditor::new()
///     .with_can_edit(|_| true)
///     .with_commit_edit(|action, index| println!("{action:?} at {index}"))
///     .with_can_move(|_| false);
///
/// // Missing commit-move: the capability is not granted.
/// assert!(matches!(editor.into_capability(), EditingCapability::None));
/// ```
#[derive(Default)]
pub struct DataSourceEditor {
    can_edit: Option<CanEditFn>,
    commit_edit: Option<CommitEditFn>,
    can_move: Option<CanMoveFn>,
    commit_move: Option<CommitMoveFn>,
}

impl DataSourceEditor {
    /// Creates an editor with no closures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the can-edit closure.
    pub fn with_can_edit<F>(mut self, can_edit: F) -> Self
    where
        F: Fn(IndexPath) -> bool + 'static,
    {
        self.can_edit = Some(Box::new(can_edit));
        self
    }

    /// Sets the commit-edit closure.
    pub fn with_commit_edit<F>(mut self, commit_edit: F) -> Self
    where
        F: Fn(EditAction, IndexPath) + 'static,
    {
        self.commit_edit = Some(Box::new(commit_edit));
        self
    }

    /// Sets the can-move closure.
    pub fn with_can_move<F>(mut self, can_move: F) -> Self
    where
        F: Fn(IndexPath) -> bool + 'static,
    {
        self.can_move = Some(Box::new(can_move));
        self
    }

    /// Sets the commit-move closure.
    pub fn with_commit_move<F>(mut self, commit_move: F) -> Self
    where
        F: Fn(IndexPath, IndexPath) + 'static,
    {
        self.commit_move = Some(Box::new(commit_move));
        self
    }

    /// Returns `true` if all four closures are present.
    pub fn is_complete(&self) -> bool {
        self.can_edit.is_some()
            && self.commit_edit.is_some()
            && self.can_move.is_some()
            && self.commit_move.is_some()
    }

    /// Resolves the closures into an all-or-nothing capability.
    pub fn into_capability(self) -> EditingCapability {
        match (self.can_edit, self.commit_edit, self.can_move, self.commit_move) {
            (Some(can_edit), Some(commit_edit), Some(can_move), Some(commit_move)) => {
                EditingCapability::Full(Editor {
                    can_edit,
                    commit_edit,
                    can_move,
                    commit_move,
                })
            }
            _ => EditingCapability::None,
        }
    }
}

impl fmt::Debug for DataSourceEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceEditor")
            .field("can_edit", &self.can_edit.is_some())
            .field("commit_edit", &self.commit_edit.is_some())
            .field("can_move", &self.can_move.is_some())
            .field("commit_move", &self.commit_move.is_some())
            .finish()
    }
}

/// Whether a data source can be edited, resolved once.
#[derive(Debug, Default)]
pub enum EditingCapability {
    /// Read-only.
    #[default]
    None,
    /// All four editing closures are present.
    Full(Editor),
}

impl EditingCapability {
    /// Returns `true` for [`EditingCapability::Full`].
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }
}

impl From<DataSourceEditor> for EditingCapability {
    fn from(editor: DataSourceEditor) -> Self {
        editor.into_capability()
    }
}

/// A complete set of editing closures.
pub struct Editor {
    can_edit: CanEditFn,
    commit_edit: CommitEditFn,
    can_move: CanMoveFn,
    commit_move: CommitMoveFn,
}

impl Editor {
    /// Returns whether the item at `index` may be edited.
    pub fn can_edit(&self, index: IndexPath) -> bool {
        (self.can_edit)(index)
    }

    /// Commits `action` for the item at `index`.
    pub fn commit_edit(&self, action: EditAction, index: IndexPath) {
        (self.commit_edit)(action, index);
    }

    /// Returns whether the item at `index` may be moved.
    pub fn can_move(&self, index: IndexPath) -> bool {
        (self.can_move)(index)
    }

    /// Commits a move of the item at `from` to `to`.
    pub fn commit_move(&self, from: IndexPath, to: IndexPath) {
        (self.commit_move)(from, to);
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Editor")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    fn complete(log: Arc<Mutex<Vec<String>>>) -> DataSourceEditor {
        let edit_log = log.clone();
        DataSourceEditor::new()
            .with_can_edit(|index| index.item() > 0)
            .with_commit_edit(move |action, index| {
                edit_log.lock().push(format!("{action:?} {index}"));
            })
            .with_can_move(|index| index.section() == 0)
            .with_commit_move(move |from, to| log.lock().push(format!("move {from} {to}")))
    }

    #[test]
    fn test_all_four_closures_grant_capability() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let editor = complete(log.clone());
        assert!(editor.is_complete());

        let EditingCapability::Full(editor) = editor.into_capability() else {
            panic!("expected full editing capability");
        };
        assert!(!editor.can_edit(IndexPath::new(0, 0)));
        assert!(editor.can_edit(IndexPath::new(0, 1)));
        assert!(editor.can_move(IndexPath::new(0, 3)));
        assert!(!editor.can_move(IndexPath::new(1, 3)));

        editor.commit_edit(EditAction::Delete, IndexPath::new(0, 2));
        editor.commit_move(IndexPath::new(0, 0), IndexPath::new(0, 4));
        assert_eq!(
            *log.lock(),
            vec!["Delete [0, 2]".to_string(), "move [0, 0] [0, 4]".to_string()]
        );
    }

    #[test]
    fn test_any_missing_closure_is_read_only() {
        let partial = [
            DataSourceEditor::new()
                .with_commit_edit(|_, _| {})
                .with_can_move(|_| true)
                .with_commit_move(|_, _| {}),
            DataSourceEditor::new()
                .with_can_edit(|_| true)
                .with_can_move(|_| true)
                .with_commit_move(|_, _| {}),
            DataSourceEditor::new()
                .with_can_edit(|_| true)
                .with_commit_edit(|_, _| {})
                .with_commit_move(|_, _| {}),
            DataSourceEditor::new()
                .with_can_edit(|_| true)
                .with_commit_edit(|_, _| {})
                .with_can_move(|_| true),
            DataSourceEditor::new(),
        ];

        for editor in partial {
            assert!(!editor.is_complete());
            assert!(!EditingCapability::from(editor).is_full());
        }
    }

    #[test]
    fn test_debug_reports_presence() {
        let editor = DataSourceEditor::new().with_can_edit(|_| true);
        let debug = format!("{editor:?}");
        assert!(debug.contains("can_edit: true"));
        assert!(debug.contains("commit_move: false"));
    }
}
