//! Error types for the networking module.

use editable_grid_core::TransportError;

/// Network-specific errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetworkError {
    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The URL scheme is not HTTP or HTTPS.
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    /// Request timed out.
    #[error("Request timed out")]
    Timeout,
    /// Connection refused or failed.
    #[error("Connection error: {0}")]
    Connection(String),
    /// HTTP request failed for another reason.
    #[error("HTTP request error: {0}")]
    Request(String),
    /// HTTP error status (4xx or 5xx).
    #[error("HTTP {status}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
    },
    /// The response body could not be decoded as text.
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

impl NetworkError {
    /// Converts this error into the transport error reported to the grid.
    pub fn into_transport_error(self, location: &str) -> TransportError {
        let location = location.to_string();
        match self {
            Self::InvalidUrl(message) => TransportError::InvalidLocation { location, message },
            Self::UnsupportedScheme(_) => TransportError::Unsupported { location },
            Self::HttpStatus { status: 404 } => TransportError::NotFound { location },
            Self::HttpStatus { status } => TransportError::HttpStatus { location, status },
            Self::InvalidBody(message) => TransportError::Io { location, message },
            other @ (Self::Timeout | Self::Connection(_) | Self::Request(_)) => {
                TransportError::Request {
                    location,
                    message: other.to_string(),
                }
            }
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::InvalidBody(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// A specialized Result type for network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;
