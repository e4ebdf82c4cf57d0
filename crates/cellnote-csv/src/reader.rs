//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use cellnote_core::{CellValue, Worksheet};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Every record becomes a row, starting at row 1; there is no separate
    /// header handling. The grid is sized to the data, at least 1 x 1.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        let mut width = 0usize;
        for result in csv_reader.records() {
            let record = result?;
            width = width.max(record.len());
            rows.push(record);
        }

        let row_count = u32::try_from(rows.len())
            .map_err(|_| CsvError::TooLarge(format!("{} rows", rows.len())))?;
        let col_count =
            u32::try_from(width).map_err(|_| CsvError::TooLarge(format!("{} columns", width)))?;

        let mut worksheet = Worksheet::new(
            0,
            options.title.as_str(),
            row_count.max(1),
            col_count.max(1),
        )?;

        for (row, record) in (1u32..).zip(&rows) {
            for (col, field) in (1u32..).zip(record.iter()) {
                let value = if options.auto_detect_types {
                    Self::detect_type(field)
                } else {
                    CellValue::string(field)
                };
                worksheet.update_cell(row, col, value)?;
            }
        }

        log::debug!(
            "Read {} rows x {} columns into '{}'",
            row_count,
            col_count,
            options.title
        );
        Ok(worksheet)
    }

    /// Detect the type of a field value
    ///
    /// Only fields that display back as the same text are converted, so a
    /// read followed by a write leaves the file unchanged.
    fn detect_type(field: &str) -> CellValue {
        CellValue::from_text(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_sizes_grid_to_data() {
        let data = "a,b,c\n1,2\n";
        let ws = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!((ws.row_count(), ws.col_count()), (2, 3));
        assert_eq!(ws.acell("A1").unwrap().value, CellValue::string("a"));
        assert_eq!(ws.acell("B2").unwrap().value, CellValue::Number(2.0));
        assert_eq!(ws.acell("C2").unwrap().value, CellValue::Empty);
    }

    #[test]
    fn test_read_empty_input() {
        let ws = CsvReader::read("".as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!((ws.row_count(), ws.col_count()), (1, 1));
        assert!(ws.is_empty());
    }

    #[test]
    fn test_read_without_type_detection() {
        let options = CsvReadOptions {
            auto_detect_types: false,
            delimiter: b';',
            title: "Raw".to_string(),
            ..Default::default()
        };
        let ws = CsvReader::read("007;TRUE\n".as_bytes(), &options).unwrap();

        assert_eq!(ws.title(), "Raw");
        assert_eq!(ws.cell(1, 1).unwrap().value, CellValue::string("007"));
        assert_eq!(ws.cell(1, 2).unwrap().value, CellValue::string("TRUE"));
    }

    #[test]
    fn test_detect_type() {
        assert_eq!(CsvReader::detect_type("42"), CellValue::Number(42.0));
        assert_eq!(CsvReader::detect_type("FALSE"), CellValue::Boolean(false));
        assert_eq!(CsvReader::detect_type(""), CellValue::Empty);
        assert_eq!(CsvReader::detect_type("o_O"), CellValue::string("o_O"));
    }

    #[test]
    fn test_non_canonical_fields_stay_text() {
        let ws = CsvReader::read("007,1.10,  ,false\n".as_bytes(), &CsvReadOptions::default())
            .unwrap();

        assert_eq!(ws.cell(1, 1).unwrap().value, CellValue::string("007"));
        assert_eq!(ws.cell(1, 2).unwrap().value, CellValue::string("1.10"));
        assert_eq!(ws.cell(1, 3).unwrap().value, CellValue::string("  "));
        assert_eq!(ws.cell(1, 4).unwrap().value, CellValue::string("false"));
        assert_eq!(ws.get_all_values(), vec![vec!["007", "1.10", "  ", "false"]]);
    }

    #[test]
    fn test_read_multiline_field() {
        let data = "\"one\ntwo\",x\n";
        let ws = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(ws.acell("A1").unwrap().value.to_string(), "one\ntwo");
    }
}
