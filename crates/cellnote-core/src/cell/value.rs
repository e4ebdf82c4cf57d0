//! Cell value types

use std::fmt;

use super::CellAddress;

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value
    Number(f64),

    /// String value
    String(String),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Convert text the way record extraction does: finite numbers become
    /// [`CellValue::Number`], everything else stays a string
    ///
    /// ```
    /// use cellnote_core::CellValue;
    ///
    /// assert_eq!(CellValue::numericise("1.45"), CellValue::Number(1.45));
    /// assert_eq!(CellValue::numericise("b2"), CellValue::string("b2"));
    /// assert_eq!(CellValue::numericise("NaN"), CellValue::string("NaN"));
    /// ```
    pub fn numericise(text: &str) -> Self {
        if let Ok(n) = text.parse::<i64>() {
            return CellValue::Number(n as f64);
        }
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::string(text),
        }
    }

    /// Read text typed by a user or stored in a file, keeping it unchanged
    ///
    /// Text becomes a number or boolean only when that value displays as the
    /// exact same text, so reading and writing it back is lossless.
    ///
    /// ```
    /// use cellnote_core::CellValue;
    ///
    /// assert_eq!(CellValue::from_text("42.5"), CellValue::Number(42.5));
    /// assert_eq!(CellValue::from_text("TRUE"), CellValue::Boolean(true));
    /// assert_eq!(CellValue::from_text("007"), CellValue::string("007"));
    /// assert_eq!(CellValue::from_text(""), CellValue::Empty);
    /// ```
    pub fn from_text(text: &str) -> Self {
        match text {
            "" => CellValue::Empty,
            "TRUE" => CellValue::Boolean(true),
            "FALSE" => CellValue::Boolean(false),
            _ => match CellValue::numericise(text) {
                CellValue::Number(n) if n.to_string() == text => CellValue::Number(n),
                _ => CellValue::string(text),
            },
        }
    }

    /// Check if the cell is empty
    ///
    /// An empty string counts as empty: writing one clears the cell.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            CellValue::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::String(s.clone())
    }
}

/// A snapshot of one grid position: where it is and what it holds
///
/// Reads return cells; [`crate::Worksheet::update_cells`] writes them back.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    address: CellAddress,
    /// The value at this position
    pub value: CellValue,
}

impl Cell {
    /// Create a cell at an address
    pub fn new(address: CellAddress, value: CellValue) -> Self {
        Self { address, value }
    }

    /// The cell's address
    pub fn address(&self) -> CellAddress {
        self.address
    }

    /// Row number (1-based)
    pub fn row(&self) -> u32 {
        self.address.row()
    }

    /// Column number (1-based)
    pub fn col(&self) -> u32 {
        self.address.col()
    }

    /// A1-style label of the cell
    pub fn label(&self) -> String {
        self.address.label()
    }

    /// The value as a number, parsing numeric text
    ///
    /// `None` for empty cells, booleans and text that is not a number.
    pub fn numeric_value(&self) -> Option<f64> {
        match &self.value {
            CellValue::Number(n) => Some(*n),
            CellValue::String(s) => match CellValue::numericise(s.trim()) {
                CellValue::Number(n) => Some(n),
                _ => None,
            },
            _ => None,
        }
    }

    /// Replace the value
    pub fn set_value<V: Into<CellValue>>(&mut self, value: V) {
        self.value = value.into();
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Cell {} {:?}>", self.address, self.value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from(42.0), CellValue::Number(42.0));
        assert_eq!(CellValue::from(7), CellValue::Number(7.0));
        assert_eq!(CellValue::from(true), CellValue::Boolean(true));
        assert_eq!(CellValue::from("x"), CellValue::string("x"));
    }

    #[test]
    fn test_display_matches_written_text() {
        assert_eq!(CellValue::from(42).to_string(), "42");
        assert_eq!(CellValue::from(42.01).to_string(), "42.01");
        assert_eq!(CellValue::from(false).to_string(), "FALSE");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::from("Артур").to_string(), "Артур");
    }

    #[test]
    fn test_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::string("").is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_numericise() {
        assert_eq!(CellValue::numericise("1"), CellValue::Number(1.0));
        assert_eq!(CellValue::numericise("-0.4"), CellValue::Number(-0.4));
        assert_eq!(CellValue::numericise("1e3"), CellValue::Number(1000.0));
        assert_eq!(CellValue::numericise("inf"), CellValue::string("inf"));
        assert_eq!(CellValue::numericise("A4"), CellValue::string("A4"));
        assert_eq!(CellValue::numericise(""), CellValue::string(""));
    }

    #[test]
    fn test_from_text_keeps_text_unchanged() {
        assert_eq!(CellValue::from_text("12"), CellValue::Number(12.0));
        assert_eq!(CellValue::from_text("-0.4"), CellValue::Number(-0.4));
        assert_eq!(CellValue::from_text("FALSE"), CellValue::Boolean(false));

        for text in ["007", "1.10", "1e3", "-0", "  ", " 5", "true", "inf"] {
            let value = CellValue::from_text(text);
            assert_eq!(value, CellValue::string(text), "{text:?}");
            assert_eq!(value.to_string(), text);
        }
    }

    #[test]
    fn test_numeric_value() {
        let addr = CellAddress::new(1, 1).unwrap();

        let cell = Cell::new(addr, CellValue::Number(1.0 / 1024.0));
        assert_eq!(cell.numeric_value(), Some(1.0 / 1024.0));

        let cell = Cell::new(addr, CellValue::string("0.0009765625"));
        assert_eq!(cell.numeric_value(), Some(1.0 / 1024.0));

        let cell = Cell::new(addr, CellValue::string("Non-numeric value"));
        assert_eq!(cell.numeric_value(), None);

        assert_eq!(Cell::new(addr, CellValue::Boolean(true)).numeric_value(), None);
        assert_eq!(Cell::new(addr, CellValue::Empty).numeric_value(), None);
    }

    #[test]
    fn test_cell_accessors() {
        let mut cell = Cell::new(CellAddress::new(2, 11).unwrap(), CellValue::Empty);
        assert_eq!(cell.label(), "K2");
        assert_eq!((cell.row(), cell.col()), (2, 11));

        cell.set_value("o_O");
        assert_eq!(cell.value.as_string(), Some("o_O"));
        assert_eq!(cell.to_string(), "<Cell K2 \"o_O\">");
    }
}
