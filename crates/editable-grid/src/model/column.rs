//! Column metadata.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::delegate::{CellRenderer, DefaultCellRenderer, EditorFactory};

/// The declared data type of a column.
///
/// Parsing never fails: names other than `string` and `number` become
/// [`DataType::Custom`] and keep their spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// Plain text.
    #[default]
    String,
    /// Numeric text, rendered with the `number` class.
    Number,
    /// Any other declared type.
    Custom(String),
}

impl DataType {
    /// The declared name of this type.
    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Custom(name) => name,
        }
    }
}

impl FromStr for DataType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "string" => Self::String,
            "number" => Self::Number,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<&str> for DataType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(datatype) => datatype,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static metadata for one column.
///
/// Columns are identified by position; names are not required to be unique.
#[derive(Clone)]
pub struct ColumnDescriptor {
    name: String,
    label: String,
    editable: bool,
    datatype: DataType,
    renderer: Arc<dyn CellRenderer>,
    editor: Option<EditorFactory>,
}

impl ColumnDescriptor {
    /// Creates a read-only column with the default renderer.
    pub fn new(name: impl Into<String>, label: impl Into<String>, datatype: DataType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            editable: false,
            datatype,
            renderer: Arc::new(DefaultCellRenderer),
            editor: None,
        }
    }

    /// Sets the renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn CellRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Makes the column editable with editors produced by `factory`.
    pub fn with_editor(mut self, factory: EditorFactory) -> Self {
        self.editable = true;
        self.editor = Some(factory);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the column accepts edits.
    pub fn is_editable(&self) -> bool {
        self.editable && self.editor.is_some()
    }

    pub fn datatype(&self) -> &DataType {
        &self.datatype
    }

    pub fn renderer(&self) -> &Arc<dyn CellRenderer> {
        &self.renderer
    }

    /// The editor factory, present only for editable columns.
    pub fn editor_factory(&self) -> Option<&EditorFactory> {
        self.editor.as_ref()
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("editable", &self.is_editable())
            .field("datatype", &self.datatype)
            .finish_non_exhaustive()
    }
}
