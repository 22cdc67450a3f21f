//! Click-to-edit interaction.
//!
//! The controller turns pointer and key events into edits:
//!
//! ```text
//!            click on editable cell
//!   ┌──────┐ ───────────────────────> ┌─────────┐
//!   │ Idle │                          │ Editing │
//!   └──────┘ <─────────────────────── └─────────┘
//!            confirm key (commit) / cancel key
//! ```
//!
//! At most one cell is edited at a time. What happens when another cell is
//! activated during an edit is decided by the [`ActiveEditPolicy`].

use editable_grid_core::logging::targets;

use crate::config::{ActiveEditPolicy, GridConfig};
use crate::delegate::CellEditor;
use crate::error::{GridError, Result};
use crate::host::{ElementId, HostDocument, Key, PointerEvent, PointerKind};
use crate::model::GridModel;

/// The controller's edit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    /// A cell's editor is active.
    Editing {
        row: usize,
        column: usize,
        cell: ElementId,
    },
}

impl EditState {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// The `(row, column)` being edited.
    pub fn position(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Editing { row, column, .. } => Some((row, column)),
            Self::Idle => None,
        }
    }
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The event did not resolve to an editable action.
    Ignored,
    /// An edit started on the cell.
    EditStarted { row: usize, column: usize },
    /// The column cannot be edited; a notice was raised.
    NotEditable { column: usize },
    /// Another edit is active and the policy refuses to interrupt it.
    Blocked,
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Committed { row: usize, column: usize },
    Cancelled { row: usize, column: usize },
}

/// Drives the `Idle`/`Editing` state machine for one grid.
///
/// Editors are created on the first edit of a column and reused for every
/// later edit of that column.
pub struct InteractionController {
    edit_trigger: PointerKind,
    confirm_keys: Vec<Key>,
    cancel_keys: Vec<Key>,
    policy: ActiveEditPolicy,
    state: EditState,
    editors: Vec<Option<Box<dyn CellEditor>>>,
}

impl InteractionController {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            edit_trigger: config.edit_trigger,
            confirm_keys: config.confirm_keys.clone(),
            cancel_keys: config.cancel_keys.clone(),
            policy: config.active_edit_policy,
            state: EditState::Idle,
            editors: Vec::new(),
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn policy(&self) -> ActiveEditPolicy {
        self.policy
    }

    /// The editor created for `column`, if it has been used.
    pub fn editor(&self, column: usize) -> Option<&dyn CellEditor> {
        self.editors.get(column)?.as_deref()
    }

    /// Number of editors created so far.
    pub fn editor_count(&self) -> usize {
        self.editors.iter().flatten().count()
    }

    /// Drops all editors and returns to `Idle` without touching the host.
    ///
    /// Call after the model has been replaced.
    pub fn reset(&mut self, column_count: usize) {
        self.state = EditState::Idle;
        self.editors.clear();
        self.editors.resize_with(column_count, || None);
    }

    /// Resolves `target` to `(row, column, cell)`.
    ///
    /// The target must be a data `td` (or an input inside one) of `table`,
    /// and the position must exist in `model`. Cells of other tables, such
    /// as those left behind by an earlier load, do not resolve.
    pub fn resolve_cell(
        host: &dyn HostDocument,
        table: ElementId,
        model: &GridModel,
        target: ElementId,
    ) -> Option<(usize, usize, ElementId)> {
        let mut cell = target;
        if host.tag_name(cell).ok()? == "input" {
            cell = host.parent(cell)?;
        }
        if host.tag_name(cell).ok()? != "td" {
            return None;
        }

        let tr = host.parent(cell)?;
        if host.tag_name(tr).ok()? != "tr" || host.parent(tr)? != table {
            return None;
        }

        let row = host.child_index(tr)?.checked_sub(1)?;
        let column = host.child_index(cell)?;
        (row < model.row_count() && column < model.column_count()).then_some((row, column, cell))
    }

    /// Finds the `td` for `(row, column)` in `table`.
    pub fn locate_cell(
        host: &dyn HostDocument,
        table: ElementId,
        row: usize,
        column: usize,
    ) -> Option<ElementId> {
        let tr = *host.children(table).ok()?.get(row + 1)?;
        host.children(tr).ok()?.get(column).copied()
    }

    /// Handles a pointer event on the host document.
    ///
    /// `table` is the table currently showing `model`.
    pub fn mouse_clicked(
        &mut self,
        host: &mut dyn HostDocument,
        model: &mut GridModel,
        table: ElementId,
        event: PointerEvent,
    ) -> Result<ClickOutcome> {
        if event.kind != self.edit_trigger {
            return Ok(ClickOutcome::Ignored);
        }
        let Some((row, column, cell)) = Self::resolve_cell(&*host, table, model, event.target)
        else {
            return Ok(ClickOutcome::Ignored);
        };

        if let EditState::Editing { cell: active, .. } = self.state {
            if active == cell {
                return Ok(ClickOutcome::Ignored);
            }
        }

        if !model.is_column_editable(column) {
            let err = GridError::ColumnNotEditable { column };
            tracing::debug!(target: targets::CONTROLLER, row, column, "click on read-only column");
            host.notify(&err.to_string());
            return Ok(ClickOutcome::NotEditable { column });
        }

        if self.state.is_editing() && !self.interrupt_active(host, model)? {
            return Ok(ClickOutcome::Blocked);
        }

        self.start_edit(host, model, row, column, cell)?;
        Ok(ClickOutcome::EditStarted { row, column })
    }

    /// Starts editing `(row, column)` without a pointer event.
    pub fn begin_edit(
        &mut self,
        host: &mut dyn HostDocument,
        model: &mut GridModel,
        table: ElementId,
        row: usize,
        column: usize,
    ) -> Result<()> {
        if row >= model.row_count() {
            return Err(GridError::row_out_of_range(row, model.row_count()));
        }
        if column >= model.column_count() {
            return Err(GridError::column_out_of_range(column, model.column_count()));
        }
        if !model.is_column_editable(column) {
            return Err(GridError::ColumnNotEditable { column });
        }
        let cell = Self::locate_cell(&*host, table, row, column)
            .ok_or(GridError::CellNotRendered { row, column })?;

        if let EditState::Editing {
            row: active_row,
            column: active_column,
            ..
        } = self.state
        {
            if (active_row, active_column) == (row, column) {
                return Ok(());
            }
            if !self.interrupt_active(host, model)? {
                return Err(GridError::EditInProgress {
                    row: active_row,
                    column: active_column,
                });
            }
        }
        self.start_edit(host, model, row, column, cell)
    }

    /// Handles a key press on the active edit surface.
    pub fn key_pressed(
        &mut self,
        host: &mut dyn HostDocument,
        model: &mut GridModel,
        key: Key,
    ) -> Result<KeyOutcome> {
        let Some((row, column)) = self.state.position() else {
            return Ok(KeyOutcome::Ignored);
        };
        if self.confirm_keys.contains(&key) {
            self.commit(host, model)?;
            Ok(KeyOutcome::Committed { row, column })
        } else if self.cancel_keys.contains(&key) {
            self.cancel(host, model)?;
            Ok(KeyOutcome::Cancelled { row, column })
        } else {
            Ok(KeyOutcome::Ignored)
        }
    }

    /// Writes the active editor's value to the model and ends the edit.
    ///
    /// Does nothing when idle. If the editor or the model fails, the edit
    /// stays active.
    pub fn commit(&mut self, host: &mut dyn HostDocument, model: &mut GridModel) -> Result<()> {
        let EditState::Editing { row, column, cell } = self.state else {
            return Ok(());
        };
        let Some(editor) = self.editors.get_mut(column).and_then(Option::as_mut) else {
            self.state = EditState::Idle;
            return Ok(());
        };

        let value = match editor.editor_value(&*host)? {
            Some(value) => value,
            None => model.get_value(row, column)?.unwrap_or_default().to_string(),
        };
        model.set_value(value.as_str(), row, column)?;
        editor.apply_editing(host)?;
        self.state = EditState::Idle;
        if let Some(descriptor) = model.column(column) {
            descriptor.renderer().render(host, cell, &value)?;
        }

        tracing::debug!(target: targets::CONTROLLER, row, column, %value, "edit committed");
        Ok(())
    }

    /// Abandons the active edit, leaving the model unchanged.
    ///
    /// Does nothing when idle. If the editor fails, the edit stays active.
    pub fn cancel(&mut self, host: &mut dyn HostDocument, model: &GridModel) -> Result<()> {
        let EditState::Editing { row, column, cell } = self.state else {
            return Ok(());
        };
        if let Some(editor) = self.editors.get_mut(column).and_then(Option::as_mut) {
            editor.cancel_editing(host)?;
        }
        self.state = EditState::Idle;
        if let (Some(descriptor), Some(value)) = (model.column(column), model.get_value(row, column)?) {
            descriptor.renderer().render(host, cell, value)?;
        }

        tracing::debug!(target: targets::CONTROLLER, row, column, "edit cancelled");
        Ok(())
    }

    /// Applies the policy to the active edit. Returns false if the edit
    /// must stay active.
    fn interrupt_active(&mut self, host: &mut dyn HostDocument, model: &mut GridModel) -> Result<bool> {
        match self.policy {
            ActiveEditPolicy::CommitPrevious => self.commit(host, model).map(|()| true),
            ActiveEditPolicy::CancelPrevious => self.cancel(host, model).map(|()| true),
            ActiveEditPolicy::Refuse => Ok(false),
        }
    }

    fn start_edit(
        &mut self,
        host: &mut dyn HostDocument,
        model: &GridModel,
        row: usize,
        column: usize,
        cell: ElementId,
    ) -> Result<()> {
        let Some(factory) = model.column(column).and_then(|c| c.editor_factory()) else {
            return Err(GridError::ColumnNotEditable { column });
        };
        if self.editors.len() < model.column_count() {
            self.editors.resize_with(model.column_count(), || None);
        }
        let editor = self.editors[column].get_or_insert_with(|| factory());

        let value = model.get_value(row, column)?.unwrap_or_default();
        editor.edit(host, cell, value)?;
        self.state = EditState::Editing { row, column, cell };

        tracing::debug!(target: targets::CONTROLLER, row, column, "edit started");
        Ok(())
    }
}

impl std::fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionController")
            .field("edit_trigger", &self.edit_trigger)
            .field("policy", &self.policy)
            .field("state", &self.state)
            .field("editors", &self.editor_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::delegate::DelegateRegistry;
    use crate::host::{HostError, HostResult, MemoryDocument};
    use crate::loader::MetadataLoader;
    use crate::model::DataType;
    use crate::render::TableRenderer;

    const GRID: &str = r#"{
        "metadata": [
            {"name": "qty", "label": "Quantity", "datatype": "number", "editable": true},
            {"name": "desc", "label": "Description", "datatype": "string"},
            {"name": "note", "label": "Note", "datatype": "string", "editable": "yes"}
        ],
        "data": [["5", "apple", "ripe"], ["12", "pear", ""]]
    }"#;

    /// Opens without touching the host and fails to read or drop its value.
    #[derive(Default)]
    struct StuckEditor {
        cell: Option<ElementId>,
    }

    impl CellEditor for StuckEditor {
        fn edit(&mut self, _: &mut dyn HostDocument, cell: ElementId, _: &str) -> HostResult<()> {
            self.cell = Some(cell);
            Ok(())
        }

        fn editor_value(&self, _: &dyn HostDocument) -> HostResult<Option<String>> {
            Err(HostError::UnknownElement(self.cell.unwrap_or_default()))
        }

        fn apply_editing(&mut self, _: &mut dyn HostDocument) -> HostResult<()> {
            self.cell = None;
            Ok(())
        }

        fn cancel_editing(&mut self, _: &mut dyn HostDocument) -> HostResult<()> {
            Err(HostError::UnknownElement(self.cell.unwrap_or_default()))
        }

        fn is_editing(&self) -> bool {
            self.cell.is_some()
        }

        fn editing_cell(&self) -> Option<ElementId> {
            self.cell
        }
    }

    struct Fixture {
        doc: MemoryDocument,
        model: GridModel,
        table: ElementId,
        controller: InteractionController,
    }

    impl Fixture {
        fn new(config: GridConfig) -> Self {
            Self::with_model(config, MetadataLoader::new().parse(GRID).unwrap())
        }

        fn with_model(config: GridConfig, model: GridModel) -> Self {
            let mut doc = MemoryDocument::new();
            doc.add_container("grid");
            let table = TableRenderer::default().render(&mut doc, &model, "grid").unwrap();
            let mut controller = InteractionController::new(&config);
            controller.reset(model.column_count());
            Self {
                doc,
                model,
                table,
                controller,
            }
        }

        fn cell(&self, row: usize, column: usize) -> ElementId {
            let tr = self.doc.children(self.table).unwrap()[row + 1];
            self.doc.children(tr).unwrap()[column]
        }

        fn click(&mut self, row: usize, column: usize) -> ClickOutcome {
            let target = self.cell(row, column);
            self.controller
                .mouse_clicked(&mut self.doc, &mut self.model, self.table, PointerEvent::click(target))
                .unwrap()
        }

        fn type_text(&mut self, text: &str) {
            let input = self.doc.focused().unwrap();
            self.doc.set_input_value(input, text).unwrap();
        }

        fn press(&mut self, key: Key) -> KeyOutcome {
            self.controller.key_pressed(&mut self.doc, &mut self.model, key).unwrap()
        }
    }

    #[test]
    fn test_resolve_cell() {
        let fx = Fixture::new(GridConfig::new("grid"));
        let cell = fx.cell(1, 2);
        assert_eq!(
            InteractionController::resolve_cell(&fx.doc, fx.table, &fx.model, cell),
            Some((1, 2, cell))
        );

        let header_cell = fx.doc.children(fx.doc.children(fx.table).unwrap()[0]).unwrap()[0];
        assert_eq!(
            InteractionController::resolve_cell(&fx.doc, fx.table, &fx.model, header_cell),
            None
        );
        assert_eq!(
            InteractionController::resolve_cell(&fx.doc, fx.table, &fx.model, fx.table),
            None
        );
    }

    #[test]
    fn test_cells_of_other_tables_do_not_resolve() {
        let mut fx = Fixture::new(GridConfig::new("grid"));
        let old_cell = fx.cell(0, 0);
        let newer = TableRenderer::default().render(&mut fx.doc, &fx.model, "grid").unwrap();

        assert_eq!(
            InteractionController::resolve_cell(&fx.doc, newer, &fx.model, old_cell),
            None
        );
        let outcome = fx
            .controller
            .mouse_clicked(&mut fx.doc, &mut fx.model, newer, PointerEvent::click(old_cell))
            .unwrap();
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(fx.controller.state(), EditState::Idle);
    }

    #[test]
    fn test_commit_with_enter() {
        let mut fx = Fixture::new(GridConfig::new("grid"));
        assert_eq!(fx.click(0, 0), ClickOutcome::EditStarted { row: 0, column: 0 });
        assert_eq!(fx.doc.input_value(fx.doc.focused().unwrap()).unwrap(), "5");

        fx.type_text("7");
        assert_eq!(fx.press(Key::Enter), KeyOutcome::Committed { row: 0, column: 0 });

        let cell = fx.cell(0, 0);
        assert_eq!(fx.model.get_value(0, 0).unwrap(), Some("7"));
        assert_eq!(fx.doc.text(cell).unwrap(), "7");
        assert_eq!(fx.doc.attribute(cell, "class").unwrap().as_deref(), Some("number"));
        assert_eq!(fx.controller.state(), EditState::Idle);
    }

    #[test]
    fn test_cancel_with_escape() {
        let mut fx = Fixture::new(GridConfig::new("grid"));
        fx.click(1, 2);
        fx.type_text("bruised");
        assert_eq!(fx.press(Key::Escape), KeyOutcome::Cancelled { row: 1, column: 2 });

        assert_eq!(fx.model.get_value(1, 2).unwrap(), Some(""));
        assert_eq!(fx.doc.text(fx.cell(1, 2)).unwrap(), "");
        assert!(!fx.controller.state().is_editing());
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut fx = Fixture::new(GridConfig::new("grid"));
        assert_eq!(fx.press(Key::Enter), KeyOutcome::Ignored);
        fx.click(0, 0);
        assert_eq!(fx.press(Key::Char('x')), KeyOutcome::Ignored);
        assert!(fx.controller.state().is_editing());
    }

    #[test]
    fn test_read_only_column_raises_notice() {
        let mut fx = Fixture::new(GridConfig::new("grid"));
        assert_eq!(fx.click(0, 1), ClickOutcome::NotEditable { column: 1 });
        assert_eq!(fx.doc.notices(), ["Column 1 is not editable"]);
        assert_eq!(fx.controller.state(), EditState::Idle);
        assert_eq!(fx.doc.text(fx.cell(0, 1)).unwrap(), "apple");
    }

    #[test]
    fn test_wrong_trigger_ignored() {
        let mut fx = Fixture::new(GridConfig::new("grid").with_double_click(true));
        assert_eq!(fx.click(0, 0), ClickOutcome::Ignored);

        let target = fx.cell(0, 0);
        let outcome = fx
            .controller
            .mouse_clicked(&mut fx.doc, &mut fx.model, fx.table, PointerEvent::double_click(target))
            .unwrap();
        assert_eq!(outcome, ClickOutcome::EditStarted { row: 0, column: 0 });
    }

    #[test]
    fn test_click_on_active_input_ignored() {
        let mut fx = Fixture::new(GridConfig::new("grid"));
        fx.click(0, 0);
        let input = fx.doc.focused().unwrap();
        let outcome = fx
            .controller
            .mouse_clicked(&mut fx.doc, &mut fx.model, fx.table, PointerEvent::click(input))
            .unwrap();
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(fx.controller.state().is_editing());
    }

    #[test]
    fn test_policies() {
        let mut fx = Fixture::new(GridConfig::new("grid"));
        fx.click(0, 0);
        fx.type_text("8");
        assert_eq!(fx.click(1, 0), ClickOutcome::EditStarted { row: 1, column: 0 });
        assert_eq!(fx.model.get_value(0, 0).unwrap(), Some("8"));
        assert_eq!(fx.doc.text(fx.cell(0, 0)).unwrap(), "8");

        let mut fx = Fixture::new(
            GridConfig::new("grid").with_active_edit_policy(ActiveEditPolicy::CancelPrevious),
        );
        fx.click(0, 0);
        fx.type_text("8");
        fx.click(0, 2);
        assert_eq!(fx.model.get_value(0, 0).unwrap(), Some("5"));
        assert_eq!(fx.doc.text(fx.cell(0, 0)).unwrap(), "5");

        let mut fx =
            Fixture::new(GridConfig::new("grid").with_active_edit_policy(ActiveEditPolicy::Refuse));
        fx.click(0, 0);
        assert_eq!(fx.click(1, 2), ClickOutcome::Blocked);
        assert_eq!(fx.controller.state().position(), Some((0, 0)));
    }

    #[test]
    fn test_editor_reused_per_column() {
        let mut fx = Fixture::new(GridConfig::new("grid"));
        fx.click(0, 0);
        fx.press(Key::Escape);
        fx.click(1, 0);
        fx.press(Key::Enter);
        assert_eq!(fx.controller.editor_count(), 1);
        assert!(fx.controller.editor(1).is_none());

        fx.click(0, 2);
        assert_eq!(fx.controller.editor_count(), 2);
        assert!(fx.controller.editor(2).is_some_and(|e| e.is_editing()));
    }

    #[test]
    fn test_begin_edit() {
        let mut fx = Fixture::new(GridConfig::new("grid"));
        let err = fx
            .controller
            .begin_edit(&mut fx.doc, &mut fx.model, fx.table, 0, 1)
            .unwrap_err();
        assert!(matches!(err, GridError::ColumnNotEditable { column: 1 }));

        let err = fx
            .controller
            .begin_edit(&mut fx.doc, &mut fx.model, fx.table, 9, 0)
            .unwrap_err();
        assert!(err.is_index_out_of_range());

        fx.controller
            .begin_edit(&mut fx.doc, &mut fx.model, fx.table, 1, 0)
            .unwrap();
        assert_eq!(fx.controller.state().position(), Some((1, 0)));
        assert!(fx.doc.notices().is_empty());
    }

    #[test]
    fn test_begin_edit_on_unrendered_cell_keeps_active_edit() {
        let mut fx = Fixture::new(GridConfig::new("grid"));
        fx.click(0, 0);
        fx.type_text("8");

        let empty = fx.doc.create_element("table");
        let err = fx
            .controller
            .begin_edit(&mut fx.doc, &mut fx.model, empty, 1, 2)
            .unwrap_err();
        assert!(matches!(err, GridError::CellNotRendered { row: 1, column: 2 }));
        assert_eq!(err.to_string(), "Cell (1, 2) is not in the rendered table");

        assert_eq!(fx.controller.state().position(), Some((0, 0)));
        assert_eq!(fx.model.get_value(0, 0).unwrap(), Some("5"));
    }

    #[test]
    fn test_failed_commit_keeps_edit_active() {
        let mut registry = DelegateRegistry::new();
        registry.register_editor(
            DataType::from("stuck"),
            Arc::new(|| Box::new(StuckEditor::default()) as Box<dyn CellEditor>),
        );
        let model = MetadataLoader::with_registry(registry)
            .parse(r#"{"metadata": [{"name": "a", "label": "A", "datatype": "stuck", "editable": true}], "data": [["1"]]}"#)
            .unwrap();
        let mut fx = Fixture::with_model(GridConfig::new("grid"), model);

        assert_eq!(fx.click(0, 0), ClickOutcome::EditStarted { row: 0, column: 0 });
        assert!(fx.controller.commit(&mut fx.doc, &mut fx.model).is_err());
        assert_eq!(fx.controller.state().position(), Some((0, 0)));
        assert_eq!(fx.model.get_value(0, 0).unwrap(), Some("1"));

        assert!(fx.controller.cancel(&mut fx.doc, &fx.model).is_err());
        assert!(fx.controller.state().is_editing());
        assert!(fx.controller.editor(0).is_some_and(|e| e.is_editing()));
    }
}
