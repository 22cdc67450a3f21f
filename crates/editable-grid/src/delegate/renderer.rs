//! Cell renderers.

use crate::host::{ElementId, HostDocument, HostResult};
use crate::model::DataType;

/// A stateless display transform for one cell.
///
/// The table renderer sets the cell text to the raw value first, then hands
/// the cell to the column's renderer. A renderer may decorate the cell
/// (classes, attributes, replacing the text) but must not touch anything
/// outside it. Renderers are shared between columns of the same type.
pub trait CellRenderer: Send + Sync {
    /// The data type this renderer is specialized for, if any.
    fn datatype(&self) -> Option<DataType> {
        None
    }

    /// Decorate `cell`, which currently displays `value`.
    fn render(&self, host: &mut dyn HostDocument, cell: ElementId, value: &str) -> HostResult<()>;
}

/// Leaves the cell exactly as the table renderer filled it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCellRenderer;

impl CellRenderer for DefaultCellRenderer {
    fn render(&self, _host: &mut dyn HostDocument, _cell: ElementId, _value: &str) -> HostResult<()> {
        Ok(())
    }
}

/// Tags numeric cells with the `number` class.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberCellRenderer;

impl NumberCellRenderer {
    /// Class assigned to numeric cells.
    pub const CLASS: &'static str = "number";
}

impl CellRenderer for NumberCellRenderer {
    fn datatype(&self) -> Option<DataType> {
        Some(DataType::Number)
    }

    fn render(&self, host: &mut dyn HostDocument, cell: ElementId, _value: &str) -> HostResult<()> {
        host.set_attribute(cell, "class", Self::CLASS)
    }
}
