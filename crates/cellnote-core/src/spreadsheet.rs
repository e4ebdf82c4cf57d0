//! Spreadsheet type - a keyed, titled collection of worksheets

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_TITLE_LEN;

const DEFAULT_ROWS: u32 = 1000;
const DEFAULT_COLS: u32 = 26;

/// A spreadsheet (document) identified by its public key
///
/// Worksheet ids are assigned in increasing order and never reused, so an id
/// keeps naming the same worksheet after others are deleted.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    /// Public key of the spreadsheet
    key: String,
    /// Document title
    title: String,
    /// Worksheets in display order
    worksheets: Vec<Worksheet>,
    /// Id for the next worksheet
    next_id: u32,
    /// Defaults for new worksheets
    settings: SpreadsheetSettings,
    /// Time of the last structural change or mutable worksheet access
    updated: DateTime<Utc>,
}

impl Spreadsheet {
    /// Create a spreadsheet holding one empty worksheet, "Sheet1"
    pub fn new<K: Into<String>, T: Into<String>>(key: K, title: T) -> Self {
        let first = Worksheet::with_grid(0, "Sheet1", DEFAULT_ROWS, DEFAULT_COLS);

        Self {
            key: key.into(),
            title: title.into(),
            worksheets: vec![first],
            next_id: 1,
            settings: SpreadsheetSettings::default(),
            updated: Utc::now(),
        }
    }

    /// Create a spreadsheet with no worksheets
    ///
    /// Used when worksheets are loaded from elsewhere and added with
    /// [`Spreadsheet::add_existing_worksheet`].
    pub fn empty<K: Into<String>, T: Into<String>>(key: K, title: T) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            worksheets: Vec::new(),
            next_id: 0,
            settings: SpreadsheetSettings::default(),
            updated: Utc::now(),
        }
    }

    /// Public key of the spreadsheet
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Document title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the document title
    pub fn set_title<T: Into<String>>(&mut self, title: T) {
        self.title = title.into();
        self.touch();
    }

    /// Time of the last change made through this spreadsheet
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Get spreadsheet settings
    pub fn settings(&self) -> &SpreadsheetSettings {
        &self.settings
    }

    /// Get mutable spreadsheet settings
    pub fn settings_mut(&mut self) -> &mut SpreadsheetSettings {
        &mut self.settings
    }

    // === Worksheet Access ===

    /// Get the number of worksheets
    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Iterate over all worksheets in display order
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// The first worksheet
    pub fn sheet1(&self) -> Option<&Worksheet> {
        self.worksheets.first()
    }

    /// Get a worksheet by position (0-based)
    pub fn get_worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by position (0-based)
    pub fn get_worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.touch();
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by title
    pub fn worksheet(&self, title: &str) -> Result<&Worksheet> {
        self.worksheets
            .iter()
            .find(|ws| ws.title() == title)
            .ok_or_else(|| Error::WorksheetNotFound(title.to_string()))
    }

    /// Get a mutable worksheet by title
    pub fn worksheet_mut(&mut self, title: &str) -> Result<&mut Worksheet> {
        self.touch();
        self.worksheets
            .iter_mut()
            .find(|ws| ws.title() == title)
            .ok_or_else(|| Error::WorksheetNotFound(title.to_string()))
    }

    /// Get a worksheet by id
    pub fn worksheet_by_id(&self, id: u32) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.id() == id)
    }

    /// Get a mutable worksheet by id
    pub fn worksheet_by_id_mut(&mut self, id: u32) -> Option<&mut Worksheet> {
        self.touch();
        self.worksheets.iter_mut().find(|ws| ws.id() == id)
    }

    // === Worksheet Management ===

    /// Add an empty worksheet at the end
    pub fn add_worksheet(&mut self, title: &str, rows: u32, cols: u32) -> Result<&mut Worksheet> {
        self.validate_title(title, None)?;
        let worksheet = Worksheet::new(self.next_id, title, rows, cols)?;
        self.push(worksheet)
    }

    /// Add an empty worksheet using the default grid size
    pub fn add_default_worksheet(&mut self, title: &str) -> Result<&mut Worksheet> {
        let (rows, cols) = (self.settings.default_rows, self.settings.default_cols);
        self.add_worksheet(title, rows, cols)
    }

    /// Add an existing worksheet at the end, giving it a fresh id
    pub fn add_existing_worksheet(&mut self, mut worksheet: Worksheet) -> Result<&mut Worksheet> {
        self.validate_title(worksheet.title(), None)?;
        worksheet.set_id(self.next_id);
        self.push(worksheet)
    }

    /// Delete a worksheet by id
    ///
    /// The last remaining worksheet cannot be deleted.
    pub fn del_worksheet(&mut self, id: u32) -> Result<Worksheet> {
        let index = self
            .worksheets
            .iter()
            .position(|ws| ws.id() == id)
            .ok_or_else(|| Error::WorksheetNotFound(format!("id {}", id)))?;

        if self.worksheets.len() == 1 {
            return Err(Error::LastWorksheet);
        }

        self.touch();
        let worksheet = self.worksheets.remove(index);
        log::debug!("Deleted worksheet '{}' (id {})", worksheet.title(), id);
        Ok(worksheet)
    }

    /// Rename a worksheet by id
    pub fn rename_worksheet(&mut self, id: u32, title: &str) -> Result<()> {
        let index = self
            .worksheets
            .iter()
            .position(|ws| ws.id() == id)
            .ok_or_else(|| Error::WorksheetNotFound(format!("id {}", id)))?;

        self.validate_title(title, Some(index))?;
        self.touch();
        self.worksheets[index].set_title(title);
        Ok(())
    }

    fn push(&mut self, worksheet: Worksheet) -> Result<&mut Worksheet> {
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| Error::other("No worksheet ids left in this spreadsheet"))?;
        self.touch();
        log::debug!(
            "Added worksheet '{}' (id {}, {}x{})",
            worksheet.title(),
            worksheet.id(),
            worksheet.row_count(),
            worksheet.col_count()
        );

        let index = self.worksheets.len();
        self.worksheets.push(worksheet);
        Ok(&mut self.worksheets[index])
    }

    fn touch(&mut self) {
        self.updated = Utc::now();
    }

    /// Validate a worksheet title, optionally excluding a sheet from the duplicate check
    fn validate_title(&self, title: &str, exclude_index: Option<usize>) -> Result<()> {
        if title.trim().is_empty() {
            return Err(Error::InvalidWorksheetTitle(title.into()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(Error::InvalidWorksheetTitle(format!(
                "{} (max {} characters)",
                title, MAX_TITLE_LEN
            )));
        }

        // Titles are unique case-insensitively
        let lower = title.to_lowercase();
        for (i, ws) in self.worksheets.iter().enumerate() {
            if Some(i) != exclude_index && ws.title().to_lowercase() == lower {
                return Err(Error::DuplicateWorksheetTitle(title.into()));
            }
        }

        Ok(())
    }
}

/// Spreadsheet-level settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadsheetSettings {
    /// Rows in a worksheet created without explicit dimensions
    pub default_rows: u32,
    /// Columns in a worksheet created without explicit dimensions
    pub default_cols: u32,
}

impl Default for SpreadsheetSettings {
    fn default() -> Self {
        Self {
            default_rows: DEFAULT_ROWS,
            default_cols: DEFAULT_COLS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spreadsheet() {
        let sp = Spreadsheet::new("0AkgM6iO", "Budget");
        assert_eq!(sp.key(), "0AkgM6iO");
        assert_eq!(sp.title(), "Budget");
        assert_eq!(sp.worksheet_count(), 1);

        let sheet1 = sp.sheet1().unwrap();
        assert_eq!(sheet1.title(), "Sheet1");
        assert_eq!((sheet1.row_count(), sheet1.col_count()), (1000, 26));
        assert_eq!(sheet1.id(), 0);
    }

    #[test]
    fn test_add_and_lookup_worksheets() {
        let mut sp = Spreadsheet::new("k", "t");

        let ws = sp.add_worksheet("Data", 16, 16).unwrap();
        assert_eq!(ws.id(), 1);

        assert_eq!(sp.worksheet("Data").unwrap().row_count(), 16);
        assert_eq!(sp.get_worksheet(1).unwrap().title(), "Data");
        assert!(sp.get_worksheet(2).is_none());
        assert!(matches!(
            sp.worksheet("Nope"),
            Err(Error::WorksheetNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_titles() {
        let mut sp = Spreadsheet::new("k", "t");

        assert!(matches!(
            sp.add_worksheet("SHEET1", 1, 1),
            Err(Error::DuplicateWorksheetTitle(_))
        ));
        assert!(matches!(
            sp.add_worksheet("  ", 1, 1),
            Err(Error::InvalidWorksheetTitle(_))
        ));
        assert!(sp.add_worksheet(&"x".repeat(MAX_TITLE_LEN + 1), 1, 1).is_err());
        assert!(matches!(
            sp.add_worksheet("Empty grid", 0, 1),
            Err(Error::InvalidCoordinate { .. })
        ));

        // Punctuation such as a time of day is fine
        assert!(sp
            .add_worksheet("Test In Progress - Mon Oct 19 10:00:00 2026", 16, 16)
            .is_ok());
    }

    #[test]
    fn test_delete_worksheets() {
        let mut sp = Spreadsheet::new("k", "t");
        let first = sp.add_worksheet("delete_ws_1", 1, 1).unwrap().id();
        let second = sp.add_worksheet("delete_ws_2", 100, 100).unwrap().id();

        sp.del_worksheet(first).unwrap();
        sp.del_worksheet(second).unwrap();
        assert_eq!(sp.worksheet_count(), 1);

        // Ids are not reused
        assert_eq!(sp.add_worksheet("again", 1, 1).unwrap().id(), 3);

        assert!(matches!(
            sp.del_worksheet(first),
            Err(Error::WorksheetNotFound(_))
        ));
    }

    #[test]
    fn test_last_worksheet_is_kept() {
        let mut sp = Spreadsheet::new("k", "t");
        assert!(matches!(sp.del_worksheet(0), Err(Error::LastWorksheet)));
    }

    #[test]
    fn test_rename_worksheet() {
        let mut sp = Spreadsheet::new("k", "t");
        sp.add_worksheet("Other", 1, 1).unwrap();

        sp.rename_worksheet(0, "sheet1").unwrap(); // case change of itself
        assert!(sp.rename_worksheet(0, "other").is_err());
        assert_eq!(sp.sheet1().unwrap().title(), "sheet1");
    }

    #[test]
    fn test_updated_moves_forward() {
        let mut sp = Spreadsheet::new("k", "t");
        let before = sp.updated();
        sp.add_worksheet("More", 1, 1).unwrap();
        assert!(sp.updated() >= before);
    }

    #[test]
    fn test_ids_do_not_wrap_around() {
        let mut sp = Spreadsheet::new("k", "t");
        sp.next_id = u32::MAX;

        assert!(matches!(
            sp.add_worksheet("Overflow", 1, 1),
            Err(Error::Other(_))
        ));
        assert_eq!(sp.worksheet_count(), 1);
        assert_eq!(sp.next_id, u32::MAX);
    }

    #[test]
    fn test_existing_worksheet_gets_fresh_id() {
        let mut sp = Spreadsheet::empty("k", "t");
        let ws = Worksheet::new(42, "Imported", 2, 2).unwrap();

        assert_eq!(sp.add_existing_worksheet(ws).unwrap().id(), 0);
        assert_eq!(sp.worksheet_count(), 1);
    }
}
