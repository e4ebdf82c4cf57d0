//! Cell-related types and utilities
//!
//! This module contains:
//! - [`to_label`] / [`to_address`] - The address codec
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`CellValue`] - The value stored in a cell
//! - [`Cell`] - A position together with its value

mod address;
mod storage;
mod value;

pub use address::{to_address, to_label, CellAddress, CellRange, CellRangeIterator};
pub use storage::CellStorage;
pub use value::{Cell, CellValue};
