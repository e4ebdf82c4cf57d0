//! Cell notes
//!
//! A note is a free-text annotation attached to a cell, independent of the
//! cell's value. Each cell holds at most one note; setting a note replaces
//! the previous one.
//!
//! ## Example
//!
//! ```rust
//! use cellnote_core::{CellNote, Worksheet};
//!
//! let mut sheet = Worksheet::new(0, "Sheet1", 20, 5).unwrap();
//! sheet.set_note(10, 2, CellNote::new("Hello notes!")).unwrap();
//!
//! assert_eq!(sheet.note(10, 2).unwrap().text, "Hello notes!");
//! ```

use std::fmt;

/// A note attached to a cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellNote {
    /// Note text
    pub text: String,
    /// Who wrote the note (empty when unknown)
    pub author: String,
}

impl CellNote {
    /// Create a note with no author
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: String::new(),
        }
    }

    /// Set the note's author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Check if this note has an author
    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }
}

impl From<&str> for CellNote {
    fn from(text: &str) -> Self {
        CellNote::new(text)
    }
}

impl From<String> for CellNote {
    fn from(text: String) -> Self {
        CellNote::new(text)
    }
}

impl fmt::Display for CellNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_author() {
            write!(f, "[{}]: {}", self.author, self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note() {
        let note = CellNote::new("Text");
        assert_eq!(note.text, "Text");
        assert!(!note.has_author());
    }

    #[test]
    fn test_with_author() {
        let note = CellNote::from("Review this").with_author("archeg");
        assert!(note.has_author());
        assert_eq!(note.to_string(), "[archeg]: Review this");
    }

    #[test]
    fn test_display_without_author() {
        assert_eq!(CellNote::new("Hello").to_string(), "Hello");
    }
}
