//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Exported text was not valid UTF-8
    #[error("Exported CSV is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Input larger than a worksheet can address
    #[error("CSV input too large: {0}")]
    TooLarge(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] cellnote_core::Error),
}
