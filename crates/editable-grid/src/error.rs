//! Error types for the grid.

use std::fmt;

use crate::host::HostError;
use crate::loader::LoadError;

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Which index of a cell coordinate was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A row index.
    Row,
    /// A column index.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur while mounting, loading or editing a grid.
///
/// Every variant that reaches the user is also raised as a host notice;
/// none of them leave the grid in a partially updated state.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The container element named in the configuration does not exist.
    #[error("Unable to get element [{container_id}]")]
    ContainerNotFound { container_id: String },

    /// No transport can fetch the requested location.
    #[error("No transport available to load '{location}'")]
    LoadTransportUnsupported { location: String },

    /// Fetching or parsing the grid document failed.
    #[error("Failed to load grid: {0}")]
    LoadFailure(#[from] LoadError),

    /// The column cannot be edited.
    #[error("Column {column} is not editable")]
    ColumnNotEditable { column: usize },

    /// A row or column index is outside the grid.
    #[error("{axis} index {index} out of range (len {len})")]
    IndexOutOfRange { axis: Axis, index: usize, len: usize },

    /// No rendered table shows the requested cell.
    #[error("Cell ({row}, {column}) is not in the rendered table")]
    CellNotRendered { row: usize, column: usize },

    /// Another cell is being edited and the active edit policy refuses to
    /// interrupt it.
    #[error("Cell ({row}, {column}) is already being edited")]
    EditInProgress { row: usize, column: usize },

    /// The host document rejected an operation.
    #[error("Host document error: {0}")]
    Host(#[from] HostError),
}

impl GridError {
    /// Create an out-of-range error for a row index.
    pub fn row_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            axis: Axis::Row,
            index,
            len,
        }
    }

    /// Create an out-of-range error for a column index.
    pub fn column_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            axis: Axis::Column,
            index,
            len,
        }
    }

    /// Returns true if this is an out-of-range error.
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GridError::ContainerNotFound {
            container_id: "grid".into(),
        };
        assert_eq!(err.to_string(), "Unable to get element [grid]");

        let err = GridError::ColumnNotEditable { column: 1 };
        assert_eq!(err.to_string(), "Column 1 is not editable");

        let err = GridError::column_out_of_range(5, 2);
        assert_eq!(err.to_string(), "column index 5 out of range (len 2)");
        assert!(err.is_index_out_of_range());
    }
}
