//! In-memory catalog of spreadsheets
//!
//! Spreadsheets are found by title, by public key, or by a URL that carries
//! the key (`...?key=<key>` or `.../d/<key>/...`).

use crate::error::{Error, Result};
use crate::spreadsheet::Spreadsheet;

/// Extract the spreadsheet key from a URL
///
/// ```
/// use cellnote_core::key_from_url;
///
/// let url = "https://docs.google.com/spreadsheet/ccc?key=0AkgM6iO_6dp&usp=sharing";
/// assert_eq!(key_from_url(url).unwrap(), "0AkgM6iO_6dp");
///
/// let url = "https://docs.google.com/spreadsheets/d/1BxiMVs0XRA5/edit#gid=0";
/// assert_eq!(key_from_url(url).unwrap(), "1BxiMVs0XRA5");
/// ```
pub fn key_from_url(url: &str) -> Result<&str> {
    if let Some((_, key)) = lazy_regex::regex_captures!(r"[?&#]key=([^&#]+)", url) {
        return Ok(key);
    }
    if let Some((_, key)) = lazy_regex::regex_captures!(r"/d/([A-Za-z0-9_-]+)", url) {
        return Ok(key);
    }
    Err(Error::InvalidUrl(url.to_string()))
}

/// A collection of spreadsheets with unique keys
#[derive(Debug, Default)]
pub struct Library {
    spreadsheets: Vec<Spreadsheet>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a spreadsheet; its key must not already be present
    pub fn insert(&mut self, spreadsheet: Spreadsheet) -> Result<&mut Spreadsheet> {
        if self.position_by_key(spreadsheet.key()).is_some() {
            return Err(Error::other(format!(
                "Spreadsheet key already exists: {}",
                spreadsheet.key()
            )));
        }

        let index = self.spreadsheets.len();
        self.spreadsheets.push(spreadsheet);
        Ok(&mut self.spreadsheets[index])
    }

    /// Remove a spreadsheet by key
    pub fn remove(&mut self, key: &str) -> Result<Spreadsheet> {
        let index = self
            .position_by_key(key)
            .ok_or_else(|| Error::SpreadsheetNotFound(key.to_string()))?;
        Ok(self.spreadsheets.remove(index))
    }

    /// Open the first spreadsheet with this title
    pub fn open(&self, title: &str) -> Result<&Spreadsheet> {
        self.spreadsheets
            .iter()
            .find(|sp| sp.title() == title)
            .ok_or_else(|| Error::SpreadsheetNotFound(title.to_string()))
    }

    /// Open the first spreadsheet with this title for editing
    pub fn open_mut(&mut self, title: &str) -> Result<&mut Spreadsheet> {
        self.spreadsheets
            .iter_mut()
            .find(|sp| sp.title() == title)
            .ok_or_else(|| Error::SpreadsheetNotFound(title.to_string()))
    }

    /// Open a spreadsheet by key
    pub fn open_by_key(&self, key: &str) -> Result<&Spreadsheet> {
        self.position_by_key(key)
            .map(|i| &self.spreadsheets[i])
            .ok_or_else(|| Error::SpreadsheetNotFound(key.to_string()))
    }

    /// Open a spreadsheet by key for editing
    pub fn open_by_key_mut(&mut self, key: &str) -> Result<&mut Spreadsheet> {
        match self.position_by_key(key) {
            Some(i) => Ok(&mut self.spreadsheets[i]),
            None => Err(Error::SpreadsheetNotFound(key.to_string())),
        }
    }

    /// Open a spreadsheet by a URL carrying its key
    pub fn open_by_url(&self, url: &str) -> Result<&Spreadsheet> {
        self.open_by_key(key_from_url(url)?)
    }

    /// All spreadsheets, in insertion order
    pub fn openall(&self) -> &[Spreadsheet] {
        &self.spreadsheets
    }

    /// Get the number of spreadsheets
    pub fn len(&self) -> usize {
        self.spreadsheets.len()
    }

    /// Check if the library is empty
    pub fn is_empty(&self) -> bool {
        self.spreadsheets.is_empty()
    }

    fn position_by_key(&self, key: &str) -> Option<usize> {
        self.spreadsheets.iter().position(|sp| sp.key() == key)
    }
}
