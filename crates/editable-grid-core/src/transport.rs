//! The document transport contract.
//!
//! A transport turns a source location into the text of the grid document.
//! Fetching is asynchronous relative to the caller; the grid awaits the
//! returned future and never blocks the host event loop on it.
//!
//! Implementations live next to the machinery they wrap: the file and static
//! transports ship with `editable-grid`, the HTTP transport with
//! `editable-grid-net`.

use std::future::Future;

/// Errors raised while fetching a grid document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// No transport can handle this kind of location.
    #[error("no transport available for '{location}'")]
    Unsupported { location: String },

    /// The location could not be parsed.
    #[error("invalid document location '{location}': {message}")]
    InvalidLocation { location: String, message: String },

    /// The document does not exist at the location.
    #[error("document not found: {location}")]
    NotFound { location: String },

    /// Reading the document failed.
    #[error("failed to read '{location}': {message}")]
    Io { location: String, message: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} while fetching '{location}'")]
    HttpStatus { location: String, status: u16 },

    /// The request itself failed (connection, timeout, TLS).
    #[error("request for '{location}' failed: {message}")]
    Request { location: String, message: String },
}

impl TransportError {
    /// Create an "unsupported" error.
    pub fn unsupported(location: impl Into<String>) -> Self {
        Self::Unsupported {
            location: location.into(),
        }
    }

    /// Returns true if no transport could handle the location.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Result type alias for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Fetches grid documents from a source location.
///
/// ```ignore
/// struct Fixed(&'static str);
///
/// impl DocumentTransport for Fixed {
///     async fn fetch(&self, _location: &str) -> TransportResult<String> {
///         Ok(self.0.to_string())
///     }
/// }
/// ```
pub trait DocumentTransport {
    /// Fetch the document text at `location`.
    fn fetch(&self, location: &str) -> impl Future<Output = TransportResult<String>>;

    /// Returns true if this transport can handle `location`.
    ///
    /// The default accepts everything; dispatching transports use this to
    /// pick a delegate.
    fn supports(&self, _location: &str) -> bool {
        true
    }
}
