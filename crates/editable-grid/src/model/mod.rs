//! Grid data model.
//!
//! A [`GridModel`] holds the column descriptors produced by the loader and
//! the raw string values of every row. Changes are announced through
//! [`ModelSignals`].

mod column;
mod grid_model;

pub use column::{ColumnDescriptor, DataType};
pub use grid_model::{CellChange, GridModel, ModelSignals};
