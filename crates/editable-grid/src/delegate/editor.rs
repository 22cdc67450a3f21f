//! In-place cell editors.

use std::sync::Arc;

use editable_grid_core::logging::targets;

use crate::host::{ElementId, HostDocument, HostResult};

/// Produces a fresh editor instance for a column.
pub type EditorFactory = Arc<dyn Fn() -> Box<dyn CellEditor> + Send + Sync>;

/// A stateful edit surface for one column.
///
/// An editor is `idle` until [`edit`](Self::edit) installs its input in a
/// cell, and returns to `idle` on [`apply_editing`](Self::apply_editing) or
/// [`cancel_editing`](Self::cancel_editing). Each editor owns the handle to
/// its own input; two editors never share one.
pub trait CellEditor {
    /// Replace the content of `cell` with an input pre-filled with `value`,
    /// then select and focus it.
    fn edit(&mut self, host: &mut dyn HostDocument, cell: ElementId, value: &str)
    -> HostResult<()>;

    /// The text currently typed into the input, if editing.
    fn editor_value(&self, host: &dyn HostDocument) -> HostResult<Option<String>>;

    /// Finish the edit, leaving the cell showing the typed text.
    fn apply_editing(&mut self, host: &mut dyn HostDocument) -> HostResult<()>;

    /// Abandon the edit, restoring the text the cell had before.
    fn cancel_editing(&mut self, host: &mut dyn HostDocument) -> HostResult<()>;

    fn is_editing(&self) -> bool;

    /// The cell being edited, if any.
    fn editing_cell(&self) -> Option<ElementId>;
}

#[derive(Debug, Clone)]
struct EditSession {
    cell: ElementId,
    input: ElementId,
    original: String,
}

/// The default editor: a single-line text input.
#[derive(Debug, Default)]
pub struct TextCellEditor {
    session: Option<EditSession>,
}

impl TextCellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The input element while editing.
    pub fn input(&self) -> Option<ElementId> {
        self.session.as_ref().map(|s| s.input)
    }
}

impl CellEditor for TextCellEditor {
    fn edit(
        &mut self,
        host: &mut dyn HostDocument,
        cell: ElementId,
        value: &str,
    ) -> HostResult<()> {
        if self.session.is_some() {
            self.cancel_editing(host)?;
        }

        let original = host.text(cell)?;
        let input = host.create_element("input");
        host.set_attribute(input, "type", "text")?;
        host.set_input_value(input, value)?;

        host.remove_children(cell)?;
        host.append_child(cell, input)?;
        host.select_contents(input)?;
        host.focus(input)?;

        tracing::trace!(target: targets::CONTROLLER, ?cell, "text editor opened");
        self.session = Some(EditSession {
            cell,
            input,
            original,
        });
        Ok(())
    }

    fn editor_value(&self, host: &dyn HostDocument) -> HostResult<Option<String>> {
        match &self.session {
            Some(session) => host.input_value(session.input).map(Some),
            None => Ok(None),
        }
    }

    fn apply_editing(&mut self, host: &mut dyn HostDocument) -> HostResult<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let value = host.input_value(session.input)?;
        host.set_text(session.cell, &value)
    }

    fn cancel_editing(&mut self, host: &mut dyn HostDocument) -> HostResult<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        host.set_text(session.cell, &session.original)
    }

    fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    fn editing_cell(&self) -> Option<ElementId> {
        self.session.as_ref().map(|s| s.cell)
    }
}

/// A factory for [`TextCellEditor`]s.
pub fn text_editor_factory() -> EditorFactory {
    Arc::new(|| Box::new(TextCellEditor::new()) as Box<dyn CellEditor>)
}
