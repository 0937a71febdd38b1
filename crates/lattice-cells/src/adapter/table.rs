//! Table view adapters.
//!
//! A table view asks its data source for section and row counts, a cell per
//! row, header and footer titles, and (if it supports editing) edit and move
//! permissions and commits. [`TableAdapter`] answers those callbacks from a
//! [`DataSource`], choosing once, at construction, between a read-only
//! variant and an editable one.

use lattice_cells_core::logging::{VendSpan, targets};

use crate::error::Result;
use crate::model::{
    CellOf, DataSource, DataSourceEditor, EditAction, EditingCapability, Editor, IndexPath,
    SupplementaryElementKind, ViewOf,
};

/// The editing style enum table views report, translated into an
/// [`EditAction`] before it reaches the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableEditingStyle {
    /// No editing control.
    #[default]
    None,
    /// The delete control.
    Delete,
    /// The insert control.
    Insert,
}

impl From<TableEditingStyle> for EditAction {
    fn from(style: TableEditingStyle) -> Self {
        match style {
            TableEditingStyle::None => EditAction::None,
            TableEditingStyle::Delete => EditAction::Delete,
            TableEditingStyle::Insert => EditAction::Insert,
        }
    }
}

/// The callback surface a table view requires of its data source.
///
/// The editing callbacks default to read-only behavior; only adapters that
/// report [`supports_editing`](Self::supports_editing) override them.
pub trait TableViewDataSource {
    /// The table view type.
    type View: ?Sized;
    /// The cell type vended.
    type Cell;

    /// Returns the number of sections.
    fn number_of_sections(&self) -> usize;

    /// Returns the number of rows in `section`.
    fn number_of_rows_in_section(&self, section: usize) -> usize;

    /// Vends the cell for the row at `index_path`.
    ///
    /// # Errors
    ///
    /// Any item lookup or vending error from the data source.
    fn cell_for_row_at(&self, view: &mut Self::View, index_path: IndexPath)
    -> Result<Self::Cell>;

    /// Returns the header title of `section`.
    fn title_for_header_in_section(&self, section: usize) -> Option<String>;

    /// Returns the footer title of `section`.
    fn title_for_footer_in_section(&self, section: usize) -> Option<String>;

    /// Returns `true` if the editing callbacks are live.
    fn supports_editing(&self) -> bool {
        false
    }

    /// Returns whether the row at `index_path` may be edited.
    fn can_edit_row_at(&self, _index_path: IndexPath) -> bool {
        false
    }

    /// Commits an edit of the row at `index_path`.
    fn commit_editing_style(&self, _style: TableEditingStyle, _index_path: IndexPath) {}

    /// Returns whether the row at `index_path` may be moved.
    fn can_move_row_at(&self, _index_path: IndexPath) -> bool {
        false
    }

    /// Commits a move of the row at `from` to `to`.
    fn move_row(&self, _from: IndexPath, _to: IndexPath) {}
}

fn section_text<D: DataSource>(
    data_source: &D,
    kind: &SupplementaryElementKind,
    section: usize,
) -> Option<String> {
    data_source.supplementary_text_for_element_kind(kind, IndexPath::section_start(section))
}

/// A read-only table adapter.
#[derive(Debug)]
pub struct BasicTableAdapter<D> {
    data_source: D,
}

impl<D: DataSource> BasicTableAdapter<D> {
    /// Creates a read-only adapter over `data_source`.
    pub fn new(data_source: D) -> Self {
        Self { data_source }
    }

    /// Returns the data source.
    pub fn data_source(&self) -> &D {
        &self.data_source
    }

    /// Returns the data source mutably.
    pub fn data_source_mut(&mut self) -> &mut D {
        &mut self.data_source
    }

    /// Returns the data source, consuming the adapter.
    pub fn into_data_source(self) -> D {
        self.data_source
    }
}

impl<D: DataSource> TableViewDataSource for BasicTableAdapter<D> {
    type View = ViewOf<D>;
    type Cell = CellOf<D>;

    fn number_of_sections(&self) -> usize {
        self.data_source.number_of_sections()
    }

    fn number_of_rows_in_section(&self, section: usize) -> usize {
        self.data_source.number_of_items_in_section(section)
    }

    fn cell_for_row_at(&self, view: &mut ViewOf<D>, index_path: IndexPath) -> Result<CellOf<D>> {
        let _span = VendSpan::new("cell_for_row_at");
        self.data_source.cell_for_item_in_view(view, index_path)
    }

    fn title_for_header_in_section(&self, section: usize) -> Option<String> {
        section_text(&self.data_source, &SupplementaryElementKind::Header, section)
    }

    fn title_for_footer_in_section(&self, section: usize) -> Option<String> {
        section_text(&self.data_source, &SupplementaryElementKind::Footer, section)
    }
}

/// A table adapter that also passes editing callbacks through to an
/// [`Editor`].
#[derive(Debug)]
pub struct EditableTableAdapter<D> {
    inner: BasicTableAdapter<D>,
    editor: Editor,
}

impl<D: DataSource> EditableTableAdapter<D> {
    /// Creates an editable adapter over `data_source`.
    pub fn new(data_source: D, editor: Editor) -> Self {
        Self {
            inner: BasicTableAdapter::new(data_source),
            editor,
        }
    }

    /// Returns the data source.
    pub fn data_source(&self) -> &D {
        self.inner.data_source()
    }

    /// Returns the data source mutably.
    pub fn data_source_mut(&mut self) -> &mut D {
        self.inner.data_source_mut()
    }

    /// Returns the editor.
    pub fn editor(&self) -> &Editor {
        &self.editor
    }
}

impl<D: DataSource> TableViewDataSource for EditableTableAdapter<D> {
    type View = ViewOf<D>;
    type Cell = CellOf<D>;

    fn number_of_sections(&self) -> usize {
        self.inner.number_of_sections()
    }

    fn number_of_rows_in_section(&self, section: usize) -> usize {
        self.inner.number_of_rows_in_section(section)
    }

    fn cell_for_row_at(&self, view: &mut ViewOf<D>, index_path: IndexPath) -> Result<CellOf<D>> {
        self.inner.cell_for_row_at(view, index_path)
    }

    fn title_for_header_in_section(&self, section: usize) -> Option<String> {
        self.inner.title_for_header_in_section(section)
    }

    fn title_for_footer_in_section(&self, section: usize) -> Option<String> {
        self.inner.title_for_footer_in_section(section)
    }

    fn supports_editing(&self) -> bool {
        true
    }

    fn can_edit_row_at(&self, index_path: IndexPath) -> bool {
        self.editor.can_edit(index_path)
    }

    fn commit_editing_style(&self, style: TableEditingStyle, index_path: IndexPath) {
        tracing::trace!(target: targets::ADAPTER, ?style, %index_path, "committing edit");
        self.editor.commit_edit(style.into(), index_path);
    }

    fn can_move_row_at(&self, index_path: IndexPath) -> bool {
        self.editor.can_move(index_path)
    }

    fn move_row(&self, from: IndexPath, to: IndexPath) {
        tracing::trace!(target: targets::ADAPTER, %from, %to, "committing move");
        self.editor.commit_move(from, to);
    }
}

/// A table adapter whose editing support is fixed at construction.
///
/// # Example
///
/// ```ignore
/// use lattice_cells::adapter::{TableAdapter, TableViewDataSource};
/// use lattice_cells::model::DataSourceEditor;
///
/// let adapter = TableAdapter::new(data_source, DataSourceEditor::new());
/// assert!(!adapter.is_editable());
/// let rows = adapter.number_of_rows_in_section(0);
/// ```
#[derive(Debug)]
pub enum TableAdapter<D> {
    /// No editing callbacks.
    ReadOnly(BasicTableAdapter<D>),
    /// Editing callbacks pass through to the editor.
    Editable(EditableTableAdapter<D>),
}

impl<D: DataSource> TableAdapter<D> {
    /// Creates the editable variant if `editor` has all four closures, the
    /// read-only variant otherwise.
    pub fn new(data_source: D, editor: DataSourceEditor) -> Self {
        Self::with_capability(data_source, editor.into_capability())
    }

    /// Creates the variant matching `capability`.
    pub fn with_capability(data_source: D, capability: EditingCapability) -> Self {
        let adapter = match capability {
            EditingCapability::Full(editor) => {
                Self::Editable(EditableTableAdapter::new(data_source, editor))
            }
            EditingCapability::None => Self::ReadOnly(BasicTableAdapter::new(data_source)),
        };
        tracing::debug!(
            target: targets::ADAPTER,
            identifier = ?adapter.data_source().identifier(),
            editable = adapter.is_editable(),
            "table adapter created"
        );
        adapter
    }

    /// Creates the read-only variant.
    pub fn read_only(data_source: D) -> Self {
        Self::with_capability(data_source, EditingCapability::None)
    }

    /// Returns `true` for the editable variant.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Editable(_))
    }

    /// Returns the data source.
    pub fn data_source(&self) -> &D {
        match self {
            Self::ReadOnly(adapter) => adapter.data_source(),
            Self::Editable(adapter) => adapter.data_source(),
        }
    }

    /// Returns the data source mutably.
    pub fn data_source_mut(&mut self) -> &mut D {
        match self {
            Self::ReadOnly(adapter) => adapter.data_source_mut(),
            Self::Editable(adapter) => adapter.data_source_mut(),
        }
    }

    fn as_dyn(&self) -> &dyn TableViewDataSource<View = ViewOf<D>, Cell = CellOf<D>> {
        match self {
            Self::ReadOnly(adapter) => adapter,
            Self::Editable(adapter) => adapter,
        }
    }
}

impl<D: DataSource> TableViewDataSource for TableAdapter<D> {
    type View = ViewOf<D>;
    type Cell = CellOf<D>;

    fn number_of_sections(&self) -> usize {
        self.as_dyn().number_of_sections()
    }

    fn number_of_rows_in_section(&self, section: usize) -> usize {
        self.as_dyn().number_of_rows_in_section(section)
    }

    fn cell_for_row_at(&self, view: &mut ViewOf<D>, index_path: IndexPath) -> Result<CellOf<D>> {
        self.as_dyn().cell_for_row_at(view, index_path)
    }

    fn title_for_header_in_section(&self, section: usize) -> Option<String> {
        self.as_dyn().title_for_header_in_section(section)
    }

    fn title_for_footer_in_section(&self, section: usize) -> Option<String> {
        self.as_dyn().title_for_footer_in_section(section)
    }

    fn supports_editing(&self) -> bool {
        self.as_dyn().supports_editing()
    }

    fn can_edit_row_at(&self, index_path: IndexPath) -> bool {
        self.as_dyn().can_edit_row_at(index_path)
    }

    fn commit_editing_style(&self, style: TableEditingStyle, index_path: IndexPath) {
        self.as_dyn().commit_editing_style(style, index_path);
    }

    fn can_move_row_at(&self, index_path: IndexPath) -> bool {
        self.as_dyn().can_move_row_at(index_path)
    }

    fn move_row(&self, from: IndexPath, to: IndexPath) {
        self.as_dyn().move_row(from, to);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::error::Error;
    use crate::model::testing::{HeaderView, RecordingView, TextCell};
    use crate::model::{DEFAULT_CELL_KEY, Factory, ReusableViewDescriptor, StaticDataSource};

    type TestFactory = Factory<String, TextCell, HeaderView, RecordingView>;
    type TestSource = StaticDataSource<TestFactory>;

    fn source(view: &mut RecordingView) -> TestSource {
        let mut factory = TestFactory::new();
        factory.register_cell(
            ReusableViewDescriptor::class::<TextCell>("Text"),
            view,
            DEFAULT_CELL_KEY,
            |cell, item, _| cell.text = item.clone(),
        );
        factory.register_supplementary_text(SupplementaryElementKind::Header, |index| {
            Some(format!("Header {}", index.section()))
        });
        StaticDataSource::with_sections(
            factory,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string()],
            ],
        )
        .with_identifier("letters")
    }

    /// Every closure logs its calls, so read-only adapters can be checked to
    /// never reach them.
    fn logging_editor(log: &Arc<Mutex<Vec<String>>>, complete: bool) -> DataSourceEditor {
        let (l1, l2, l3, l4) = (log.clone(), log.clone(), log.clone(), log.clone());
        let editor = DataSourceEditor::new()
            .with_can_edit(move |index| {
                l1.lock().push(format!("can_edit {index}"));
                true
            })
            .with_commit_edit(move |action, index| {
                l2.lock().push(format!("commit {action:?} {index}"));
            })
            .with_can_move(move |index| {
                l3.lock().push(format!("can_move {index}"));
                index.section() == 0
            });
        if complete {
            editor.with_commit_move(move |from, to| l4.lock().push(format!("move {from} {to}")))
        } else {
            editor
        }
    }

    #[test]
    fn test_editing_style_translation() {
        assert_eq!(EditAction::from(TableEditingStyle::None), EditAction::None);
        assert_eq!(EditAction::from(TableEditingStyle::Delete), EditAction::Delete);
        assert_eq!(EditAction::from(TableEditingStyle::Insert), EditAction::Insert);
    }

    #[test]
    fn test_counts_and_cells() {
        let mut view = RecordingView::new();
        let adapter = TableAdapter::read_only(source(&mut view));

        assert_eq!(adapter.number_of_sections(), 2);
        assert_eq!(adapter.number_of_rows_in_section(0), 2);
        assert_eq!(adapter.number_of_rows_in_section(1), 1);

        let cell = adapter
            .cell_for_row_at(&mut view, IndexPath::new(1, 0))
            .unwrap();
        assert_eq!(cell.text, "c");

        let err = adapter
            .cell_for_row_at(&mut view, IndexPath::new(1, 1))
            .unwrap_err();
        assert_eq!(err, Error::no_item(IndexPath::new(1, 1)));
    }

    #[test]
    fn test_header_and_footer_titles() {
        let mut view = RecordingView::new();
        let adapter = TableAdapter::read_only(source(&mut view));

        assert_eq!(
            adapter.title_for_header_in_section(1),
            Some("Header 1".to_string())
        );
        assert_eq!(adapter.title_for_footer_in_section(1), None);
    }

    #[test]
    fn test_three_of_four_closures_is_read_only() {
        let mut view = RecordingView::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let adapter = TableAdapter::new(source(&mut view), logging_editor(&log, false));

        assert!(!adapter.is_editable());
        assert!(!adapter.supports_editing());
        assert!(!adapter.can_edit_row_at(IndexPath::new(0, 0)));
        assert!(!adapter.can_move_row_at(IndexPath::new(0, 0)));
        adapter.commit_editing_style(TableEditingStyle::Delete, IndexPath::new(0, 0));
        adapter.move_row(IndexPath::new(0, 0), IndexPath::new(0, 1));

        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_all_four_closures_is_editable() {
        let mut view = RecordingView::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let adapter = TableAdapter::new(source(&mut view), logging_editor(&log, true));

        assert!(adapter.is_editable());
        assert!(adapter.supports_editing());
        assert!(adapter.can_edit_row_at(IndexPath::new(0, 1)));
        assert!(adapter.can_move_row_at(IndexPath::new(0, 1)));
        assert!(!adapter.can_move_row_at(IndexPath::new(1, 0)));
        adapter.commit_editing_style(TableEditingStyle::Delete, IndexPath::new(0, 1));
        adapter.move_row(IndexPath::new(0, 0), IndexPath::new(0, 1));

        assert_eq!(
            *log.lock(),
            vec![
                "can_edit [0, 1]",
                "can_move [0, 1]",
                "can_move [1, 0]",
                "commit Delete [0, 1]",
                "move [0, 0] [0, 1]",
            ]
        );
        // The adapter does not reorder storage itself.
        assert_eq!(adapter.data_source().items(0).unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_data_source_access() {
        let mut view = RecordingView::new();
        let mut adapter = TableAdapter::read_only(source(&mut view));
        assert_eq!(adapter.data_source().identifier(), Some("letters"));
        let source = adapter.data_source_mut();
        assert_eq!(source.number_of_sections(), 2);
    }
}
