//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use cellnote_core::Worksheet;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Export a worksheet as CSV text
    ///
    /// Rows are joined with `\n` and the text has no trailing line break.
    pub fn export(worksheet: &Worksheet) -> CsvResult<String> {
        let options = CsvWriteOptions {
            line_terminator: LineTerminator::LF,
            ..Default::default()
        };

        let mut buf = Vec::new();
        Self::write(worksheet, &mut buf, &options)?;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        Ok(String::from_utf8(buf)?)
    }

    /// Write a worksheet to a writer
    ///
    /// Writes the rectangle from A1 to the last used row and column, the same
    /// grid [`Worksheet::get_all_values`] returns.
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        let values = worksheet.get_all_values();
        for record in &values {
            csv_writer.write_record(record)?;
        }

        csv_writer.flush()?;
        log::debug!(
            "Wrote {} rows from '{}'",
            values.len(),
            worksheet.title()
        );
        Ok(())
    }
}
