//! Row records keyed by a header row

use std::collections::BTreeMap;

use crate::cell::CellValue;
use crate::error::{Error, Result};

/// One data row keyed by the header row's text
pub type Record = BTreeMap<String, CellValue>;

/// Options for [`crate::Worksheet::get_all_records`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOptions {
    /// 1-based row holding the headers (default: 1)
    pub head: u32,
    /// Read empty positions as `0` instead of `""`
    pub empty_to_zero: bool,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            head: 1,
            empty_to_zero: false,
        }
    }
}

impl RecordOptions {
    /// Use a different header row
    pub fn with_head(mut self, head: u32) -> Self {
        self.head = head;
        self
    }

    /// Read empty positions as zero
    pub fn with_empty_to_zero(mut self, empty_to_zero: bool) -> Self {
        self.empty_to_zero = empty_to_zero;
        self
    }
}

/// Build records from a value grid
///
/// Rows after `options.head` become records. Numeric text becomes a number;
/// when two headers share a name the right-most column wins.
pub fn records_from_values(values: &[Vec<String>], options: &RecordOptions) -> Result<Vec<Record>> {
    if options.head == 0 {
        return Err(Error::InvalidCoordinate { row: 0, col: 1 });
    }

    let head = options.head as usize;
    let Some(headers) = values.get(head - 1) else {
        return Ok(Vec::new());
    };

    let records = values[head..]
        .iter()
        .map(|row| {
            headers
                .iter()
                .zip(row)
                .map(|(key, text)| (key.clone(), record_value(text, options)))
                .collect()
        })
        .collect();

    Ok(records)
}

fn record_value(text: &str, options: &RecordOptions) -> CellValue {
    if text.is_empty() {
        if options.empty_to_zero {
            CellValue::Number(0.0)
        } else {
            CellValue::string("")
        }
    } else {
        CellValue::numericise(text)
    }
}
