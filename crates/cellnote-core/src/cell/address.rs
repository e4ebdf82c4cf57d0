//! Cell address codec and range types
//!
//! A cell position has two equivalent spellings:
//! - a 1-based `(row, column)` pair, held by [`CellAddress`]
//! - an A1-style label such as `"ABC3"`: column letters in bijective
//!   base-26 (A=1 ... Z=26, AA=27) followed by the decimal row number
//!
//! [`to_label`] and [`to_address`] convert between the two.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Encode a 1-based `(row, col)` pair as an A1-style label
///
/// # Examples
/// ```
/// use cellnote_core::to_label;
///
/// assert_eq!(to_label(3, 731).unwrap(), "ABC3");
/// assert_eq!(to_label(1, 104).unwrap(), "CZ1");
/// assert!(to_label(0, 5).is_err());
/// ```
pub fn to_label(row: u32, col: u32) -> Result<String> {
    Ok(CellAddress::new(row, col)?.label())
}

/// Decode an A1-style label into a 1-based address
///
/// The label must be one or more uppercase ASCII letters followed by one or
/// more digits, and the row number must be at least 1.
///
/// # Examples
/// ```
/// use cellnote_core::to_address;
///
/// let addr = to_address("ABC3").unwrap();
/// assert_eq!((addr.row(), addr.col()), (3, 731));
/// assert!(to_address("3ABC").is_err());
/// assert!(to_address("ABC0").is_err());
/// ```
pub fn to_address(label: &str) -> Result<CellAddress> {
    CellAddress::parse(label)
}

/// A cell position with 1-based row and column
///
/// Both coordinates are always >= 1; the only constructors check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(u32, u32)", into = "(u32, u32)"))]
pub struct CellAddress {
    row: u32,
    col: u32,
}

impl CellAddress {
    /// Create an address, rejecting a zero row or column
    pub fn new(row: u32, col: u32) -> Result<Self> {
        if row == 0 || col == 0 {
            return Err(Error::InvalidCoordinate { row, col });
        }
        Ok(Self { row, col })
    }

    /// Row number (1-based)
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Column number (1-based, A=1)
    pub fn col(&self) -> u32 {
        self.col
    }

    /// The `(row, col)` pair
    pub fn as_tuple(&self) -> (u32, u32) {
        (self.row, self.col)
    }

    /// Parse an A1-style label
    pub fn parse(label: &str) -> Result<Self> {
        let (_, letters, digits) = lazy_regex::regex_captures!(r"^([A-Z]+)([0-9]+)$", label)
            .ok_or_else(|| Error::InvalidLabel(label.to_string()))?;

        let col = Self::letters_to_column(letters)?;
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidLabel(label.to_string()))?;

        if row == 0 {
            return Err(Error::InvalidLabel(label.to_string()));
        }

        Ok(Self { row, col })
    }

    /// Convert a 1-based column number to letters (1 = A, 26 = Z, 27 = AA)
    ///
    /// Returns an empty string for column 0, which has no letter form.
    pub fn column_to_letters(col: u32) -> String {
        let mut letters = Vec::new();
        let mut n = col;

        while n > 0 {
            n -= 1;
            letters.push((n % 26) as u8 + b'A');
            n /= 26;
        }

        letters.reverse();
        // Every byte pushed above is in b'A'..=b'Z'
        letters.into_iter().map(char::from).collect()
    }

    /// Convert uppercase column letters to a 1-based column number
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidLabel(letters.to_string()));
        }

        let mut col: u32 = 0;
        for b in letters.bytes() {
            if !b.is_ascii_uppercase() {
                return Err(Error::InvalidLabel(letters.to_string()));
            }
            col = col
                .checked_mul(26)
                .and_then(|c| c.checked_add((b - b'A') as u32 + 1))
                .ok_or_else(|| Error::InvalidLabel(letters.to_string()))?;
        }

        Ok(col)
    }

    /// Format as an A1-style label
    pub fn label(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row)
    }

    /// Create a range from this address to another
    pub fn to(&self, other: CellAddress) -> CellRange {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<(u32, u32)> for CellAddress {
    type Error = Error;

    fn try_from((row, col): (u32, u32)) -> Result<Self> {
        Self::new(row, col)
    }
}

impl From<CellAddress> for (u32, u32) {
    fn from(addr: CellAddress) -> Self {
        addr.as_tuple()
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "(CellAddress, CellAddress)", into = "(CellAddress, CellAddress)")
)]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        // Normalize so start is top-left and end is bottom-right
        Self {
            start: CellAddress {
                row: start.row.min(end.row),
                col: start.col.min(end.col),
            },
            end: CellAddress {
                row: start.row.max(end.row),
                col: start.col.max(end.col),
            },
        }
    }

    /// Create a range from 1-based row/column numbers
    pub fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Result<Self> {
        Ok(Self::new(
            CellAddress::new(start_row, start_col)?,
            CellAddress::new(end_row, end_col)?,
        ))
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from A1:B10 notation, or a single label
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = |_| Error::InvalidRange(s.to_string());

        match s.split_once(':') {
            Some((start, end)) => {
                let start = CellAddress::parse(start).map_err(invalid)?;
                let end = CellAddress::parse(end).map_err(invalid)?;
                Ok(Self::new(start, end))
            }
            None => Ok(Self::single(CellAddress::parse(s).map_err(invalid)?)),
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row,
            current_col: self.start.col,
            remaining: self.cell_count(),
        }
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.label()
        } else {
            format!("{}:{}", self.start.label(), self.end.label())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl From<(CellAddress, CellAddress)> for CellRange {
    fn from((start, end): (CellAddress, CellAddress)) -> Self {
        Self::new(start, end)
    }
}

impl From<CellRange> for (CellAddress, CellAddress) {
    fn from(range: CellRange) -> Self {
        (range.start, range.end)
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u32,
    current_col: u32,
    remaining: u64,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let addr = CellAddress {
            row: self.current_row,
            col: self.current_col,
        };
        self.remaining -= 1;

        if self.current_col == self.range.end.col {
            self.current_col = self.range.start.col;
            self.current_row = self.current_row.saturating_add(1);
        } else {
            self.current_col += 1;
        }

        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellRangeIterator {}
