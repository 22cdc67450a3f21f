//! Editable Grid - a metadata-driven table with click-to-edit cells.
//!
//! A grid document declares columns (name, label, data type, editability)
//! and rows of raw values. The grid loads it, renders a table into a host
//! document, and lets the user edit cells in place.
//!
//! # Example
//!
//! ```no_run
//! use editable_grid::{EditableGrid, GridConfig, Key, MemoryDocument, PointerEvent};
//!
//! # async fn run() -> Result<(), editable_grid::GridError> {
//! let mut doc = MemoryDocument::new();
//! doc.add_container("tablecontent");
//!
//! let mut grid = EditableGrid::new(doc, GridConfig::new("tablecontent"));
//! grid.init()?;
//! grid.load("demo/grid.xml", None::<fn()>).await?;
//!
//! let first_cell = grid.host().elements_by_tag(grid.host().body(), "td")[0];
//! grid.mouse_clicked(PointerEvent::click(first_cell))?;
//! grid.key_pressed(Key::Enter)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`host`]: the host document trait and an in-memory implementation
//! - [`model`]: columns and row data
//! - [`delegate`]: cell renderers, editors and their registry
//! - [`loader`]: XML and JSON grid documents
//! - [`render`]: table construction
//! - [`controller`]: the edit state machine
//! - [`transport`]: file, static and auto-dispatching document transports

pub mod config;
pub mod controller;
pub mod delegate;
pub mod error;
pub mod grid;
pub mod host;
pub mod loader;
pub mod model;
pub mod render;
pub mod transport;

pub use config::{ActiveEditPolicy, ConfigError, ConfigFormat, GridConfig};
pub use controller::{ClickOutcome, EditState, InteractionController, KeyOutcome};
pub use delegate::{
    CellEditor, CellRenderer, DefaultCellRenderer, DelegateRegistry, EditorFactory,
    NumberCellRenderer, TextCellEditor, text_editor_factory,
};
pub use error::{Axis, GridError, Result};
pub use grid::EditableGrid;
pub use host::{ElementId, HostDocument, HostError, HostResult, Key, MemoryDocument, PointerEvent, PointerKind};
pub use loader::{DocumentFormat, LoadError, MetadataLoader};
pub use model::{CellChange, ColumnDescriptor, DataType, GridModel, ModelSignals};
pub use render::TableRenderer;
pub use transport::{AutoTransport, FileTransport, StaticTransport};

pub use editable_grid_core::{DocumentTransport, Signal, TransportError, TransportResult};

#[cfg(feature = "http")]
pub use editable_grid_net::HttpTransport;
