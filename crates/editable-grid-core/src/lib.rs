//! Core systems for Editable Grid.
//!
//! This crate provides the pieces shared by the grid and its transports:
//!
//! - **Signal/Slot System**: change notification for the grid model
//! - **Logging**: `tracing` targets and helpers
//! - **Transport Contract**: the [`DocumentTransport`] trait and its errors
//!
//! # Signal Example
//!
//! ```
//! use editable_grid_core::Signal;
//!
//! let loaded = Signal::<usize>::new();
//! loaded.connect(|rows| println!("loaded {rows} rows"));
//! loaded.emit(3);
//! ```

pub mod logging;
pub mod signal;
pub mod transport;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use transport::{DocumentTransport, TransportError, TransportResult};
