//! HTTP document transport.

use std::time::Duration;

use editable_grid_core::logging::targets;
use editable_grid_core::{DocumentTransport, TransportResult};
use reqwest::redirect::Policy;
use url::Url;

use crate::error::{NetworkError, Result};

/// Configuration for the HTTP transport.
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Maximum number of redirects to follow (0 disables redirects).
    pub max_redirects: usize,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            max_redirects: 10,
            user_agent: Some(format!("EditableGrid/{} (Rust)", env!("CARGO_PKG_VERSION"))),
        }
    }
}

/// Builder for an [`HttpTransport`] with custom configuration.
#[derive(Default)]
pub struct HttpTransportBuilder {
    config: HttpTransportConfig,
}

impl HttpTransportBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Disable the request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<HttpTransport> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        builder = if self.config.max_redirects == 0 {
            builder.redirect(Policy::none())
        } else {
            builder.redirect(Policy::limited(self.config.max_redirects))
        };

        if let Some(ref ua) = self.config.user_agent {
            builder = builder.user_agent(ua);
        }

        let client = builder.build()?;
        Ok(HttpTransport {
            client,
            config: self.config,
        })
    }
}

/// Fetches grid documents over HTTP(S).
///
/// The transport is cheaply cloneable; clones share the connection pool.
///
/// ```ignore
/// use editable_grid_core::DocumentTransport;
/// use editable_grid_net::HttpTransport;
///
/// let transport = HttpTransport::new()?;
/// let text = transport.fetch("https://example.com/grid.xml").await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: HttpTransportConfig,
}

impl HttpTransport {
    /// Create a transport with the default configuration.
    pub fn new() -> Result<Self> {
        HttpTransportBuilder::new().build()
    }

    /// Create a builder for a custom configuration.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// The configuration this transport was built with.
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Parse `location` and check that it is an HTTP(S) URL.
    pub fn parse_location(location: &str) -> Result<Url> {
        let url = Url::parse(location)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(NetworkError::UnsupportedScheme(other.to_string())),
        }
    }

    /// GET the document at `location` and return its body as text.
    pub async fn get_text(&self, location: &str) -> Result<String> {
        let url = Self::parse_location(location)?;
        tracing::debug!(target: targets::TRANSPORT, %url, "fetching grid document");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        tracing::debug!(target: targets::TRANSPORT, bytes = text.len(), "grid document received");
        Ok(text)
    }
}

impl DocumentTransport for HttpTransport {
    async fn fetch(&self, location: &str) -> TransportResult<String> {
        self.get_text(location)
            .await
            .map_err(|err| err.into_transport_error(location))
    }

    fn supports(&self, location: &str) -> bool {
        Self::parse_location(location).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_configuration() {
        let transport = HttpTransport::builder()
            .timeout(Duration::from_secs(5))
            .max_redirects(0)
            .user_agent("grid-test")
            .build()
            .expect("Failed to build transport");

        assert_eq!(transport.config().timeout, Some(Duration::from_secs(5)));
        assert_eq!(transport.config().max_redirects, 0);
        assert_eq!(transport.config().user_agent.as_deref(), Some("grid-test"));
    }

    #[test]
    fn test_supports_only_http_schemes() {
        let transport = HttpTransport::new().unwrap();
        assert!(transport.supports("http://example.com/grid.xml"));
        assert!(transport.supports("https://example.com/grid.xml"));
        assert!(!transport.supports("file:///tmp/grid.xml"));
        assert!(!transport.supports("grid.xml"));
    }

    #[test]
    fn test_parse_location_rejects_other_schemes() {
        let err = HttpTransport::parse_location("ftp://example.com/grid.xml").unwrap_err();
        assert!(matches!(err, NetworkError::UnsupportedScheme(ref s) if s == "ftp"));
    }
}
