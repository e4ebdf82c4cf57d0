//! Error types for cellnote-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cellnote-core
#[derive(Debug, Error)]
pub enum Error {
    /// Row or column below 1
    #[error("Invalid coordinate: row {row}, column {col} (both must be >= 1)")]
    InvalidCoordinate { row: u32, col: u32 },

    /// Label that is not uppercase letters followed by a row number >= 1
    #[error("Invalid cell label: {0:?}")]
    InvalidLabel(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0:?}")]
    InvalidRange(String),

    /// Row beyond the worksheet grid
    #[error("Row {0} out of bounds (row count: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column beyond the worksheet grid
    #[error("Column {0} out of bounds (column count: {1})")]
    ColumnOutOfBounds(u32, u32),

    /// Search pattern that is not a valid regular expression
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// No cell matched a search
    #[error("No cell matches {0}")]
    CellNotFound(String),

    /// Worksheet lookup by title or id failed
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// Worksheet title already used in the spreadsheet
    #[error("Worksheet title already exists: {0}")]
    DuplicateWorksheetTitle(String),

    /// Empty or otherwise unusable worksheet title
    #[error("Invalid worksheet title: {0:?}")]
    InvalidWorksheetTitle(String),

    /// Attempt to delete the only worksheet of a spreadsheet
    #[error("A spreadsheet must keep at least one worksheet")]
    LastWorksheet,

    /// Spreadsheet lookup by title, key or URL failed
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    /// URL without a recognizable spreadsheet key
    #[error("No spreadsheet key in URL: {0}")]
    InvalidUrl(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
