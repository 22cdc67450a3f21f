//! Document transports bundled with the grid.
//!
//! - [`FileTransport`] reads `file://` URLs and plain paths with `tokio::fs`.
//! - [`StaticTransport`] serves documents registered in memory.
//! - [`AutoTransport`] picks between the file transport and, with the `http`
//!   feature, the HTTP transport from `editable-grid-net`.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use editable_grid_core::logging::targets;
use editable_grid_core::{DocumentTransport, TransportError, TransportResult};

#[cfg(feature = "http")]
use editable_grid_net::HttpTransport;

const FILE_SCHEME: &str = "file://";

fn has_scheme(location: &str) -> bool {
    location.contains("://")
}

fn is_http(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Reads grid documents from the local filesystem.
///
/// Relative paths are resolved against the base directory when one is set,
/// otherwise against the process working directory.
#[derive(Debug, Clone, Default)]
pub struct FileTransport {
    base_dir: Option<PathBuf>,
}

impl FileTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir`.
    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    /// The filesystem path a location refers to, if it is a file location.
    pub fn resolve(&self, location: &str) -> Option<PathBuf> {
        let path = match location.strip_prefix(FILE_SCHEME) {
            Some(rest) => Path::new(rest),
            None if !has_scheme(location) => Path::new(location),
            None => return None,
        };
        if path.as_os_str().is_empty() {
            return None;
        }
        Some(match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        })
    }
}

impl DocumentTransport for FileTransport {
    async fn fetch(&self, location: &str) -> TransportResult<String> {
        let path = self
            .resolve(location)
            .ok_or_else(|| TransportError::unsupported(location))?;
        tracing::debug!(target: targets::TRANSPORT, path = %path.display(), "reading grid document");

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => TransportError::NotFound {
                    location: location.to_string(),
                },
                _ => TransportError::Io {
                    location: location.to_string(),
                    message: err.to_string(),
                },
            })
    }

    fn supports(&self, location: &str) -> bool {
        self.resolve(location).is_some()
    }
}

/// Serves documents registered up front, keyed by location.
///
/// ```ignore
/// let transport = StaticTransport::new().with_document("grid.xml", "<grid>...</grid>");
/// grid.load_with(&transport, "grid.xml", None::<fn()>).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticTransport {
    documents: HashMap<String, String>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_document(mut self, location: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(location, text);
        self
    }

    /// Registers `text` under `location`, returning any previous document.
    pub fn insert(&mut self, location: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.documents.insert(location.into(), text.into())
    }

    pub fn remove(&mut self, location: &str) -> Option<String> {
        self.documents.remove(location)
    }
}

impl DocumentTransport for StaticTransport {
    async fn fetch(&self, location: &str) -> TransportResult<String> {
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| TransportError::NotFound {
                location: location.to_string(),
            })
    }

    fn supports(&self, location: &str) -> bool {
        self.documents.contains_key(location)
    }
}

/// Dispatches on the location: `http(s)://` goes to the HTTP transport,
/// `file://` and bare paths to the file transport. Anything else is
/// [`TransportError::Unsupported`].
#[derive(Debug, Clone)]
pub struct AutoTransport {
    file: FileTransport,
    #[cfg(feature = "http")]
    http: Option<HttpTransport>,
}

impl AutoTransport {
    /// File access plus, when available, HTTP with default settings.
    pub fn new() -> Self {
        Self {
            file: FileTransport::new(),
            #[cfg(feature = "http")]
            http: match HttpTransport::new() {
                Ok(http) => Some(http),
                Err(err) => {
                    tracing::warn!(target: targets::TRANSPORT, error = %err, "HTTP transport unavailable");
                    None
                }
            },
        }
    }

    /// Replace the file transport.
    pub fn with_file(mut self, file: FileTransport) -> Self {
        self.file = file;
        self
    }

    /// Replace the HTTP transport.
    #[cfg(feature = "http")]
    pub fn with_http(mut self, http: HttpTransport) -> Self {
        self.http = Some(http);
        self
    }

    #[cfg(feature = "http")]
    fn has_http(&self) -> bool {
        self.http.is_some()
    }

    #[cfg(not(feature = "http"))]
    fn has_http(&self) -> bool {
        false
    }

    #[cfg(feature = "http")]
    async fn fetch_http(&self, location: &str) -> TransportResult<String> {
        match &self.http {
            Some(http) => http.fetch(location).await,
            None => Err(TransportError::unsupported(location)),
        }
    }

    #[cfg(not(feature = "http"))]
    async fn fetch_http(&self, location: &str) -> TransportResult<String> {
        Err(TransportError::unsupported(location))
    }
}

impl Default for AutoTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransport for AutoTransport {
    async fn fetch(&self, location: &str) -> TransportResult<String> {
        if is_http(location) {
            self.fetch_http(location).await
        } else if self.file.supports(location) {
            self.file.fetch(location).await
        } else {
            Err(TransportError::unsupported(location))
        }
    }

    fn supports(&self, location: &str) -> bool {
        if is_http(location) {
            self.has_http()
        } else {
            self.file.supports(location)
        }
    }
}
