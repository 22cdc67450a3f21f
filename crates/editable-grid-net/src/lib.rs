//! Networking module for Editable Grid.
//!
//! Provides [`HttpTransport`], a [`DocumentTransport`] that fetches grid
//! documents over HTTP(S) with `reqwest`.
//!
//! ```ignore
//! use editable_grid_core::DocumentTransport;
//! use editable_grid_net::HttpTransport;
//!
//! let transport = HttpTransport::builder()
//!     .timeout(std::time::Duration::from_secs(5))
//!     .build()?;
//! let document = transport.fetch("https://example.com/grid.xml").await?;
//! ```
//!
//! [`DocumentTransport`]: editable_grid_core::DocumentTransport

mod error;
pub mod http;

pub use error::{NetworkError, Result};
pub use http::{HttpTransport, HttpTransportBuilder, HttpTransportConfig};
