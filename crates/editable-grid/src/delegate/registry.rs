//! Data type to delegate mapping.

use std::collections::HashMap;
use std::sync::Arc;

use super::editor::{EditorFactory, text_editor_factory};
use super::renderer::{CellRenderer, DefaultCellRenderer, NumberCellRenderer};
use crate::model::DataType;

/// Chooses the renderer and editor factory for each declared data type.
///
/// Types without a registration fall back to the default renderer and the
/// default editor factory. Supporting a new type means registering it here;
/// the loader never matches on data types itself.
///
/// ```ignore
/// let mut registry = DelegateRegistry::new();
/// registry.register_renderer(DataType::Custom("date".into()), Arc::new(DateRenderer));
/// ```
#[derive(Clone)]
pub struct DelegateRegistry {
    renderers: HashMap<DataType, Arc<dyn CellRenderer>>,
    editors: HashMap<DataType, EditorFactory>,
    default_renderer: Arc<dyn CellRenderer>,
    default_editor: EditorFactory,
}

impl DelegateRegistry {
    /// A registry with the built-in `number` renderer and the text editor.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_renderer(DataType::Number, Arc::new(NumberCellRenderer));
        registry
    }

    /// A registry with only the fallbacks.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
            editors: HashMap::new(),
            default_renderer: Arc::new(DefaultCellRenderer),
            default_editor: text_editor_factory(),
        }
    }

    /// Registers the renderer for `datatype`, replacing any previous one.
    pub fn register_renderer(&mut self, datatype: DataType, renderer: Arc<dyn CellRenderer>) {
        self.renderers.insert(datatype, renderer);
    }

    /// Registers the editor factory for `datatype`, replacing any previous one.
    pub fn register_editor(&mut self, datatype: DataType, factory: EditorFactory) {
        self.editors.insert(datatype, factory);
    }

    /// Sets the renderer used for unregistered types.
    pub fn set_default_renderer(&mut self, renderer: Arc<dyn CellRenderer>) {
        self.default_renderer = renderer;
    }

    /// Sets the editor factory used for unregistered types.
    pub fn set_default_editor(&mut self, factory: EditorFactory) {
        self.default_editor = factory;
    }

    pub fn renderer_for(&self, datatype: &DataType) -> Arc<dyn CellRenderer> {
        self.renderers
            .get(datatype)
            .unwrap_or(&self.default_renderer)
            .clone()
    }

    pub fn editor_for(&self, datatype: &DataType) -> EditorFactory {
        self.editors
            .get(datatype)
            .unwrap_or(&self.default_editor)
            .clone()
    }
}

impl Default for DelegateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DelegateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateRegistry")
            .field("renderers", &self.renderers.keys().collect::<Vec<_>>())
            .field("editors", &self.editors.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
