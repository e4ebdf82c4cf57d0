//! Prelude module - common imports for cellnote users
//!
//! ```rust
//! use cellnote::prelude::*;
//! ```

pub use crate::{
    // Address codec
    to_address,
    to_label,

    Cell,
    CellAddress,
    CellNote,
    CellQuery,
    CellRange,
    CellValue,

    // Error types
    Error,
    Library,
    RecordOptions,
    Result,

    // Main types
    Spreadsheet,
    Worksheet,
};

#[cfg(feature = "csv")]
pub use crate::{
    // I/O types
    CsvReader,
    CsvWriter,
    // Extension traits
    SpreadsheetExt,
};
