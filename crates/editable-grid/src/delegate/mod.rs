//! Cell delegates: renderers and editors.
//!
//! Renderers are stateless and shared; editors carry the state of one
//! in-progress edit. The [`DelegateRegistry`] picks both from a column's
//! declared data type.

mod editor;
mod registry;
mod renderer;

pub use editor::{CellEditor, EditorFactory, TextCellEditor, text_editor_factory};
pub use registry::DelegateRegistry;
pub use renderer::{CellRenderer, DefaultCellRenderer, NumberCellRenderer};
