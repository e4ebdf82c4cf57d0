//! # cellnote
//!
//! Spreadsheet cell addressing, cell notes and an in-memory worksheet model.
//!
//! ## Features
//!
//! - Convert between 1-based `(row, column)` pairs and A1-style labels
//! - Read and write cells by label, by coordinates, or by range
//! - Attach notes to cells
//! - Search cells by exact text or regex, read rows as header-keyed records
//! - Resize, append and insert rows
//! - Read and write CSV files (`csv` feature, on by default)
//!
//! ## Example
//!
//! ```rust
//! use cellnote::prelude::*;
//!
//! assert_eq!(to_label(3, 731).unwrap(), "ABC3");
//! assert_eq!(to_address("ABC3").unwrap().as_tuple(), (3, 731));
//!
//! let mut spreadsheet = Spreadsheet::new("0AkgM6iO", "Notes demo");
//! let sheet = spreadsheet.add_worksheet("Scratch", 16, 16).unwrap();
//!
//! sheet.update_acell("B10", "value").unwrap();
//! sheet.set_note(10, 2, "Hello notes!").unwrap();
//!
//! assert_eq!(sheet.anote("B10").unwrap().unwrap().text, "Hello notes!");
//! // spreadsheet.save("scratch.csv").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use cellnote_core::{
    // Address codec
    to_address,
    to_label,
    key_from_url,

    Cell,
    CellAddress,
    // Notes
    CellNote,
    CellQuery,
    CellRange,
    // Cell types
    CellValue,
    // Error types
    Error,
    Library,
    Record,
    RecordOptions,
    Result,

    // Main types
    Spreadsheet,
    SpreadsheetSettings,
    Worksheet,

    // Constants
    MAX_TITLE_LEN,
};

// Re-export I/O types
#[cfg(feature = "csv")]
pub use cellnote_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};

#[cfg(feature = "csv")]
use std::path::Path;

/// Extension trait for Spreadsheet to add file I/O
#[cfg(feature = "csv")]
pub trait SpreadsheetExt: Sized {
    /// Open a spreadsheet from a file
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Save the first worksheet to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

#[cfg(feature = "csv")]
impl SpreadsheetExt for Spreadsheet {
    /// The file stem becomes both key and title; the data lands in "Sheet1"
    fn open<P: AsRef<Path>>(path: P) -> Result<Spreadsheet> {
        let path = path.as_ref();

        match extension(path).as_deref() {
            Some("csv") => {
                let worksheet = CsvReader::read_file(path, &CsvReadOptions::default())
                    .map_err(|e| Error::other(e.to_string()))?;

                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let mut spreadsheet = Spreadsheet::empty(stem.as_str(), stem.as_str());
                spreadsheet.add_existing_worksheet(worksheet)?;
                Ok(spreadsheet)
            }
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        match extension(path).as_deref() {
            Some("csv") => {
                if let Some(sheet) = self.sheet1() {
                    CsvWriter::write_file(sheet, path, &CsvWriteOptions::default())
                        .map_err(|e| Error::other(e.to_string()))
                } else {
                    Err(Error::other("No worksheets to save"))
                }
            }
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }
}

#[cfg(feature = "csv")]
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
