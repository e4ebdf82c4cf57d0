//! # cellnote-core
//!
//! Cell addressing and an in-memory spreadsheet model.
//!
//! This crate provides:
//! - [`to_label`] / [`to_address`] - Conversion between 1-based `(row, column)`
//!   pairs and A1-style labels such as `"ABC3"`
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`Worksheet`], [`Spreadsheet`], [`Library`] - The document model
//! - [`CellNote`] - Annotations attached to cells
//!
//! ## Example
//!
//! ```rust
//! use cellnote_core::{to_address, to_label, Spreadsheet};
//!
//! assert_eq!(to_label(3, 731).unwrap(), "ABC3");
//! assert_eq!(to_address("CZ1").unwrap().as_tuple(), (1, 104));
//!
//! let mut spreadsheet = Spreadsheet::new("0AkgM6iO", "Budget");
//! let sheet = spreadsheet.worksheet_mut("Sheet1").unwrap();
//!
//! sheet.update_acell("A1", "Hello").unwrap();
//! sheet.update_cell(1, 2, 42).unwrap();
//! sheet.set_note(10, 2, "Hello notes!").unwrap();
//!
//! assert_eq!(sheet.get_all_values(), vec![vec!["Hello", "42"]]);
//! ```

pub mod cell;
pub mod error;
pub mod library;
pub mod note;
pub mod query;
pub mod record;
pub mod spreadsheet;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{to_address, to_label, Cell, CellAddress, CellRange, CellValue};
pub use error::{Error, Result};
pub use library::{key_from_url, Library};
pub use note::CellNote;
pub use query::CellQuery;
pub use record::{Record, RecordOptions};
pub use spreadsheet::{Spreadsheet, SpreadsheetSettings};
pub use worksheet::Worksheet;

/// Maximum length of a worksheet title, in characters
pub const MAX_TITLE_LEN: usize = 100;
