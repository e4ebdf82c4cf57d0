//! Cell search queries

use std::fmt;

use regex::Regex;

use crate::error::Result;

/// What [`crate::Worksheet::find`] and [`crate::Worksheet::findall`] look for
///
/// Queries are matched against a cell's display text.
///
/// ```
/// use cellnote_core::CellQuery;
///
/// assert!(CellQuery::from("42").matches("42"));
/// assert!(!CellQuery::from("42").matches("420"));
///
/// let query = CellQuery::pattern("[a-z]_[A-Z]").unwrap();
/// assert!(query.matches("xo_O1"));
/// ```
#[derive(Debug, Clone)]
pub enum CellQuery {
    /// The whole text equals this string
    Exact(String),
    /// The regex finds a match anywhere in the text
    Pattern(Regex),
}

impl CellQuery {
    /// Compile a regex query
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(CellQuery::Pattern(Regex::new(pattern)?))
    }

    /// Check a cell's display text against the query
    pub fn matches(&self, text: &str) -> bool {
        match self {
            CellQuery::Exact(expected) => text == expected,
            CellQuery::Pattern(re) => re.is_match(text),
        }
    }
}

impl From<&str> for CellQuery {
    fn from(s: &str) -> Self {
        CellQuery::Exact(s.to_string())
    }
}

impl From<String> for CellQuery {
    fn from(s: String) -> Self {
        CellQuery::Exact(s)
    }
}

impl From<Regex> for CellQuery {
    fn from(re: Regex) -> Self {
        CellQuery::Pattern(re)
    }
}

impl fmt::Display for CellQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellQuery::Exact(s) => write!(f, "{:?}", s),
            CellQuery::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_is_whole_text() {
        let query = CellQuery::from("abc");
        assert!(query.matches("abc"));
        assert!(!query.matches("abcd"));
        assert!(!query.matches("ABC"));
    }

    #[test]
    fn test_pattern_searches_anywhere() {
        let query = CellQuery::from(Regex::new("[a-z]_[A-Z]f00").unwrap());
        assert!(query.matches("deadbeefo_Of00"));
        assert!(!query.matches("o_of00"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            CellQuery::pattern("(unclosed"),
            Err(crate::Error::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(CellQuery::from("x").to_string(), "\"x\"");
        assert_eq!(CellQuery::pattern("a+").unwrap().to_string(), "/a+/");
    }
}
