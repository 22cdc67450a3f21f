//! HTTP transport for grid documents.

mod client;

pub use client::{HttpTransport, HttpTransportBuilder, HttpTransportConfig};
