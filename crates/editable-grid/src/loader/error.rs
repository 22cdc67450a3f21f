//! Load error types.

use editable_grid_core::TransportError;

/// Errors that fail a load as a whole.
///
/// A failed load never produces a partial model.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document could not be fetched.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The document is not well-formed XML.
    #[error("malformed XML document: {0}")]
    Xml(String),

    /// The document is not valid JSON.
    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// A required section is absent.
    #[error("document has no {section} section")]
    MissingSection { section: &'static str },

    /// A column declaration lacks a required field.
    #[error("column {column} has no {field}")]
    MissingField { column: usize, field: &'static str },

    /// A column's `editable` flag is not a recognized boolean.
    #[error("column {column} has invalid editable value '{value}'")]
    InvalidEditable { column: usize, value: String },

    /// A data row does not have one value per column.
    #[error("row {row} has {found} values, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The document format could not be recognized.
    #[error("unrecognized document format")]
    UnknownFormat,
}

impl From<quick_xml::Error> for LoadError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

/// Result type alias for load operations.
pub type LoadResult<T> = std::result::Result<T, LoadError>;
