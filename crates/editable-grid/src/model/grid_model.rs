//! The grid's columns and row data.

use editable_grid_core::Signal;
use editable_grid_core::logging::targets;

use super::column::{ColumnDescriptor, DataType};
use crate::error::{GridError, Result};

/// A single cell value change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub row: usize,
    pub column: usize,
    pub old: String,
    pub new: String,
}

/// Signals emitted by a [`GridModel`].
pub struct ModelSignals {
    /// Emitted after `set_value` changes a cell.
    pub value_changed: Signal<CellChange>,

    /// Emitted after the model contents are replaced by a load.
    pub model_reset: Signal<()>,
}

impl ModelSignals {
    pub fn new() -> Self {
        Self {
            value_changed: Signal::new(),
            model_reset: Signal::new(),
        }
    }
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered column descriptors plus a matrix of raw string values.
///
/// Every row holds exactly one value per column. Values are stored as they
/// were loaded or written; the model never coerces them to the column type.
///
/// # Index policy
///
/// Reading a row that does not exist yields `Ok(None)`. Every other
/// out-of-range access fails with [`GridError::IndexOutOfRange`].
///
/// ```ignore
/// let model = GridModel::new(columns, vec![vec!["5".into(), "apple".into()]])?;
/// assert_eq!(model.get_value(0, 1)?, Some("apple"));
/// assert_eq!(model.get_value(9, 0)?, None);
/// ```
#[derive(Default)]
pub struct GridModel {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Vec<String>>,
    signals: ModelSignals,
}

impl GridModel {
    /// Creates a model, checking that every row matches the column count.
    ///
    /// Returns the offending row index and its length on mismatch.
    pub fn new(
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Vec<String>>,
    ) -> std::result::Result<Self, (usize, usize)> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err((index, row.len()));
        }
        Ok(Self {
            columns,
            rows,
            signals: ModelSignals::new(),
        })
    }

    /// Creates a model with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the raw value at `(row, column)`.
    ///
    /// `Ok(None)` when the row does not exist.
    pub fn get_value(&self, row: usize, column: usize) -> Result<Option<&str>> {
        let Some(values) = self.rows.get(row) else {
            return Ok(None);
        };
        values
            .get(column)
            .map(|value| Some(value.as_str()))
            .ok_or_else(|| GridError::column_out_of_range(column, self.columns.len()))
    }

    /// Overwrites the value at `(row, column)`.
    ///
    /// `value_changed` is emitted only if the stored value differs.
    pub fn set_value(&mut self, value: impl Into<String>, row: usize, column: usize) -> Result<()> {
        let row_count = self.rows.len();
        let column_count = self.columns.len();
        let cell = self
            .rows
            .get_mut(row)
            .ok_or_else(|| GridError::row_out_of_range(row, row_count))?
            .get_mut(column)
            .ok_or_else(|| GridError::column_out_of_range(column, column_count))?;

        let value = value.into();
        if *cell == value {
            return Ok(());
        }
        let old = std::mem::replace(cell, value.clone());
        tracing::trace!(target: targets::MODEL, row, column, %old, new = %value, "cell value changed");

        self.signals.value_changed.emit(CellChange {
            row,
            column,
            old,
            new: value,
        });
        Ok(())
    }

    /// The declared data type of `column`.
    pub fn column_type(&self, column: usize) -> Result<&DataType> {
        self.columns
            .get(column)
            .map(ColumnDescriptor::datatype)
            .ok_or_else(|| GridError::column_out_of_range(column, self.columns.len()))
    }

    pub fn column(&self, column: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(column)
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    pub fn column_name(&self, column: usize) -> Option<&str> {
        self.column(column).map(ColumnDescriptor::name)
    }

    pub fn column_label(&self, column: usize) -> Option<&str> {
        self.column(column).map(ColumnDescriptor::label)
    }

    /// False for unknown columns.
    pub fn is_column_editable(&self, column: usize) -> bool {
        self.column(column).is_some_and(ColumnDescriptor::is_editable)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    /// Replaces columns and rows with those of `other`, keeping this model's
    /// signal connections, then emits `model_reset`.
    pub fn replace_contents(&mut self, other: GridModel) {
        self.columns = other.columns;
        self.rows = other.rows;
        tracing::debug!(
            target: targets::MODEL,
            rows = self.rows.len(),
            columns = self.columns.len(),
            "model reset"
        );
        self.signals.model_reset.emit(());
    }
}

impl std::fmt::Debug for GridModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridModel")
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .finish_non_exhaustive()
    }
}
