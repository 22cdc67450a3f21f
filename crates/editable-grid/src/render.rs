//! Materializes a grid model as a table in the host document.

use editable_grid_core::PerfSpan;
use editable_grid_core::logging::targets;

use crate::error::{GridError, Result};
use crate::host::{ElementId, HostDocument, HostResult};
use crate::model::{ColumnDescriptor, GridModel};

/// Builds `table` elements from a [`GridModel`].
///
/// The table holds one header row of `th` cells with the column labels,
/// followed by one `tr` of `td` cells per data row:
///
/// ```text
/// <table class="editablegrid">
///   <tr><th>Quantity</th><th>Description</th></tr>
///   <tr><td class="number">5</td><td>apple</td></tr>
/// </table>
/// ```
#[derive(Debug, Clone)]
pub struct TableRenderer {
    table_class: String,
}

impl TableRenderer {
    pub fn new(table_class: impl Into<String>) -> Self {
        Self {
            table_class: table_class.into(),
        }
    }

    pub fn table_class(&self) -> &str {
        &self.table_class
    }

    /// Renders `model` and appends the table to the element with id
    /// `container_id`.
    ///
    /// Earlier tables in the container are left in place.
    pub fn render(
        &self,
        host: &mut dyn HostDocument,
        model: &GridModel,
        container_id: &str,
    ) -> Result<ElementId> {
        let container =
            host.element_by_id(container_id)
                .ok_or_else(|| GridError::ContainerNotFound {
                    container_id: container_id.to_string(),
                })?;
        let table = self.build_table(host, model)?;
        host.append_child(container, table)?;
        Ok(table)
    }

    /// Builds a detached table for `model`.
    pub fn build_table(&self, host: &mut dyn HostDocument, model: &GridModel) -> HostResult<ElementId> {
        let _span = PerfSpan::new("render_table");

        let table = host.create_element("table");
        host.set_attribute(table, "class", &self.table_class)?;

        let header = host.create_element("tr");
        for column in model.columns() {
            let th = host.create_element("th");
            host.set_text(th, column.label())?;
            host.append_child(header, th)?;
        }
        host.append_child(table, header)?;

        for values in model.rows() {
            let tr = host.create_element("tr");
            for (column, value) in model.columns().iter().zip(values) {
                let td = host.create_element("td");
                Self::fill_cell(host, column, td, value)?;
                host.append_child(tr, td)?;
            }
            host.append_child(table, tr)?;
        }

        tracing::debug!(
            target: targets::RENDER,
            rows = model.row_count(),
            columns = model.column_count(),
            "table rendered"
        );
        Ok(table)
    }

    /// Shows `value` in `cell` and applies the column renderer.
    pub fn fill_cell(
        host: &mut dyn HostDocument,
        column: &ColumnDescriptor,
        cell: ElementId,
        value: &str,
    ) -> HostResult<()> {
        host.set_text(cell, value)?;
        column.renderer().render(host, cell, value)
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(crate::config::GridConfig::DEFAULT_TABLE_CLASS)
    }
}
