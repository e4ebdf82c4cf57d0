//! Worksheet type

use ahash::AHashMap;

use crate::cell::{Cell, CellAddress, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::note::CellNote;
use crate::query::CellQuery;
use crate::record::{records_from_values, Record, RecordOptions};

/// A worksheet: a grid of `row_count` x `col_count` cells plus notes
///
/// Rows and columns are 1-based everywhere. Every stored value and note lies
/// inside the grid; shrinking the grid discards what falls outside.
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet id, unique within its spreadsheet
    id: u32,
    /// Sheet title
    title: String,
    /// Grid height
    row_count: u32,
    /// Grid width
    col_count: u32,
    /// Cell values
    cells: CellStorage,
    /// Cell notes (keyed by (row, col))
    notes: AHashMap<(u32, u32), CellNote>,
}

impl Worksheet {
    /// Create an empty worksheet with the given grid size
    pub fn new<S: Into<String>>(id: u32, title: S, rows: u32, cols: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidCoordinate {
                row: rows,
                col: cols,
            });
        }

        Ok(Self::with_grid(id, title, rows, cols))
    }

    /// Create an empty worksheet; callers guarantee a non-zero grid
    pub(crate) fn with_grid<S: Into<String>>(id: u32, title: S, rows: u32, cols: u32) -> Self {
        Self {
            id,
            title: title.into(),
            row_count: rows,
            col_count: cols,
            cells: CellStorage::new(),
            notes: AHashMap::new(),
        }
    }

    /// Get the sheet id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get the sheet title
    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into();
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Number of rows in the grid
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Number of columns in the grid
    pub fn col_count(&self) -> u32 {
        self.col_count
    }

    // === Cell Access ===

    /// Read the cell at a label (e.g., "A1")
    pub fn acell(&self, label: &str) -> Result<Cell> {
        let addr = CellAddress::parse(label)?;
        self.cell(addr.row(), addr.col())
    }

    /// Read the cell at a row and column
    pub fn cell(&self, row: u32, col: u32) -> Result<Cell> {
        let addr = self.check_position(row, col)?;
        Ok(Cell::new(addr, self.value_at(row, col)))
    }

    /// Read every cell of a range such as "A1:A5", row by row
    pub fn range(&self, label_range: &str) -> Result<Vec<Cell>> {
        let range = CellRange::parse(label_range)?;
        self.check_position(range.end.row(), range.end.col())?;

        Ok(range
            .cells()
            .map(|addr| Cell::new(addr, self.value_at(addr.row(), addr.col())))
            .collect())
    }

    /// Get a value by row and column; unset positions are [`CellValue::Empty`]
    pub fn value_at(&self, row: u32, col: u32) -> CellValue {
        self.cells.get(row, col).cloned().unwrap_or_default()
    }

    // === Cell Modification ===

    /// Write the cell at a label
    pub fn update_acell<V: Into<CellValue>>(&mut self, label: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(label)?;
        self.update_cell(addr.row(), addr.col(), value)
    }

    /// Write the cell at a row and column
    ///
    /// Writing an empty value clears the position.
    pub fn update_cell<V: Into<CellValue>>(&mut self, row: u32, col: u32, value: V) -> Result<()> {
        self.check_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Write a batch of cells
    ///
    /// Every position is checked before anything is written.
    pub fn update_cells(&mut self, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            self.check_position(cell.row(), cell.col())?;
        }
        for cell in cells {
            self.cells.set_value(cell.row(), cell.col(), cell.value.clone());
        }
        Ok(())
    }

    /// Clear a cell by row and column
    pub fn clear_cell(&mut self, row: u32, col: u32) -> Result<Option<CellValue>> {
        self.check_position(row, col)?;
        Ok(self.cells.remove(row, col))
    }

    // === Bulk Reads ===

    /// Display text of a row, from column 1 to its last non-empty cell
    pub fn row_values(&self, row: u32) -> Result<Vec<String>> {
        self.check_position(row, 1)?;
        Ok(dense(self.cells.iter_row(row)))
    }

    /// Display text of a column, from row 1 to its last non-empty cell
    pub fn col_values(&self, col: u32) -> Result<Vec<String>> {
        self.check_position(1, col)?;
        Ok(dense(self.cells.iter_col(col)))
    }

    /// Display text of the rectangle from A1 to the last used row and column
    ///
    /// Unset positions read as `""`; an empty sheet yields no rows.
    pub fn get_all_values(&self) -> Vec<Vec<String>> {
        let Some((max_row, max_col)) = self.cells.used_extent() else {
            return Vec::new();
        };

        (1..=max_row)
            .map(|row| {
                (1..=max_col)
                    .map(|col| self.value_at(row, col).to_string())
                    .collect()
            })
            .collect()
    }

    /// Rows after the header row as maps from header text to value
    pub fn get_all_records(&self, options: &RecordOptions) -> Result<Vec<Record>> {
        records_from_values(&self.get_all_values(), options)
    }

    /// Bounding box of all non-empty cells
    pub fn used_range(&self) -> Option<CellRange> {
        let mut iter = self.cells.iter();
        let (first_row, first_col, _) = iter.next()?;
        let (mut min_col, mut max_row, mut max_col) = (first_col, first_row, first_col);

        for (row, col, _) in iter {
            min_col = min_col.min(col);
            max_col = max_col.max(col);
            max_row = row;
        }

        CellRange::from_indices(first_row, min_col, max_row, max_col).ok()
    }

    // === Search ===

    /// First cell, row by row, whose text matches the query
    pub fn find<Q: Into<CellQuery>>(&self, query: Q) -> Result<Cell> {
        let query = query.into();
        let found = self.matching_cells(&query).next();
        found.ok_or_else(|| Error::CellNotFound(query.to_string()))
    }

    /// Every cell, row by row, whose text matches the query
    pub fn findall<Q: Into<CellQuery>>(&self, query: Q) -> Vec<Cell> {
        let query = query.into();
        self.matching_cells(&query).collect()
    }

    fn matching_cells<'a>(&'a self, query: &'a CellQuery) -> impl Iterator<Item = Cell> + 'a {
        self.cells.iter().filter_map(move |(row, col, value)| {
            if query.matches(&value.to_string()) {
                let addr = CellAddress::new(row, col).ok()?;
                Some(Cell::new(addr, value.clone()))
            } else {
                None
            }
        })
    }

    // === Grid Size ===

    /// Add rows to the bottom of the grid
    pub fn add_rows(&mut self, rows: u32) -> Result<()> {
        let new_rows = self
            .row_count
            .checked_add(rows)
            .ok_or(Error::RowOutOfBounds(u32::MAX, self.row_count))?;
        self.resize(new_rows, self.col_count)
    }

    /// Add columns to the right of the grid
    pub fn add_cols(&mut self, cols: u32) -> Result<()> {
        let new_cols = self
            .col_count
            .checked_add(cols)
            .ok_or(Error::ColumnOutOfBounds(u32::MAX, self.col_count))?;
        self.resize(self.row_count, new_cols)
    }

    /// Set the grid size, discarding values and notes that fall outside
    pub fn resize(&mut self, rows: u32, cols: u32) -> Result<()> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidCoordinate {
                row: rows,
                col: cols,
            });
        }

        if rows < self.row_count || cols < self.col_count {
            let dropped = self.cells.truncate(rows, cols);
            let notes_before = self.notes.len();
            self.notes.retain(|&(r, c), _| r <= rows && c <= cols);
            let dropped_notes = notes_before - self.notes.len();

            if dropped > 0 || dropped_notes > 0 {
                log::warn!(
                    "Resizing '{}' to {}x{} discarded {} values and {} notes",
                    self.title,
                    rows,
                    cols,
                    dropped,
                    dropped_notes
                );
            }
        }

        log::debug!(
            "Resized '{}' from {}x{} to {}x{}",
            self.title,
            self.row_count,
            self.col_count,
            rows,
            cols
        );
        self.row_count = rows;
        self.col_count = cols;
        Ok(())
    }

    /// Add a row at the bottom of the grid holding `values`
    ///
    /// The grid is widened when `values` is longer than a row.
    pub fn append_row<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let index = self
            .row_count
            .checked_add(1)
            .ok_or(Error::RowOutOfBounds(u32::MAX, self.row_count))?;
        self.insert_row(values, index)
    }

    /// Insert a row at `index`, moving that row and everything below it down
    ///
    /// `index` may be one past the last row, which appends. Notes move with
    /// their cells. The grid is widened when `values` is longer than a row.
    pub fn insert_row<I, V>(&mut self, values: I, index: u32) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        if index == 0 {
            return Err(Error::InvalidCoordinate { row: 0, col: 1 });
        }
        if index > self.row_count.saturating_add(1) || self.row_count == u32::MAX {
            return Err(Error::RowOutOfBounds(index, self.row_count));
        }

        let values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        let width = u32::try_from(values.len())
            .map_err(|_| Error::ColumnOutOfBounds(u32::MAX, self.col_count))?;

        self.cells.shift_rows_down(index);
        self.notes = self
            .notes
            .drain()
            .map(|((r, c), note)| {
                let r = if r >= index { r + 1 } else { r };
                ((r, c), note)
            })
            .collect();

        self.row_count += 1;
        self.col_count = self.col_count.max(width);
        log::debug!(
            "Inserted row {} into '{}' ({} values)",
            index,
            self.title,
            values.len()
        );

        for (col, value) in (1..).zip(values) {
            self.cells.set_value(index, col, value);
        }
        Ok(())
    }

    // === Cell Notes ===

    /// Set the note on a cell, replacing any previous note
    pub fn set_note<N: Into<CellNote>>(&mut self, row: u32, col: u32, note: N) -> Result<()> {
        self.check_position(row, col)?;
        self.notes.insert((row, col), note.into());
        Ok(())
    }

    /// Set the note on a cell by label
    pub fn set_anote<N: Into<CellNote>>(&mut self, label: &str, note: N) -> Result<()> {
        let addr = CellAddress::parse(label)?;
        self.set_note(addr.row(), addr.col(), note)
    }

    /// Get the note on a cell
    pub fn note(&self, row: u32, col: u32) -> Option<&CellNote> {
        self.notes.get(&(row, col))
    }

    /// Get the note on a cell by label
    pub fn anote(&self, label: &str) -> Result<Option<&CellNote>> {
        let addr = CellAddress::parse(label)?;
        Ok(self.note(addr.row(), addr.col()))
    }

    /// Remove the note from a cell
    pub fn clear_note(&mut self, row: u32, col: u32) -> Option<CellNote> {
        self.notes.remove(&(row, col))
    }

    /// Get the number of notes in this worksheet
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// All notes with their addresses, row by row
    pub fn notes(&self) -> Vec<(CellAddress, &CellNote)> {
        let mut notes: Vec<_> = self
            .notes
            .iter()
            .filter_map(|(&(r, c), note)| Some((CellAddress::new(r, c).ok()?, note)))
            .collect();
        notes.sort_by_key(|(addr, _)| *addr);
        notes
    }

    // === Internal ===

    /// Check that a position is a valid address inside the grid
    fn check_position(&self, row: u32, col: u32) -> Result<CellAddress> {
        let addr = CellAddress::new(row, col)?;
        if row > self.row_count {
            return Err(Error::RowOutOfBounds(row, self.row_count));
        }
        if col > self.col_count {
            return Err(Error::ColumnOutOfBounds(col, self.col_count));
        }
        Ok(addr)
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the worksheet holds no values
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all non-empty cells, row by row
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &CellValue)> {
        self.cells.iter()
    }
}

/// Lay sparse `(index, value)` pairs out densely from index 1
fn dense<'a>(cells: impl Iterator<Item = (u32, &'a CellValue)>) -> Vec<String> {
    let mut out = Vec::new();
    for (index, value) in cells {
        out.resize(index as usize - 1, String::new());
        out.push(value.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet() -> Worksheet {
        Worksheet::new(7, "Test", 16, 16).unwrap()
    }

    #[test]
    fn test_new_worksheet() {
        let ws = sheet();
        assert_eq!(ws.id(), 7);
        assert_eq!(ws.title(), "Test");
        assert_eq!((ws.row_count(), ws.col_count()), (16, 16));
        assert!(ws.is_empty());

        assert!(Worksheet::new(0, "Zero", 0, 5).is_err());
    }

    #[test]
    fn test_update_and_read_cells() {
        let mut ws = sheet();

        ws.update_acell("A2", "hello").unwrap();
        assert_eq!(ws.acell("A2").unwrap().value, CellValue::string("hello"));

        ws.update_cell(1, 2, 42).unwrap();
        assert_eq!(ws.cell(1, 2).unwrap().value.to_string(), "42");

        ws.update_cell(1, 2, 42.01).unwrap();
        assert_eq!(ws.cell(1, 2).unwrap().value.to_string(), "42.01");

        ws.update_cell(1, 2, "line\nline").unwrap();
        assert_eq!(ws.cell(1, 2).unwrap().value.to_string(), "line\nline");

        assert_eq!(ws.cell(3, 3).unwrap().value, CellValue::Empty);
    }

    #[test]
    fn test_empty_write_clears() {
        let mut ws = sheet();
        ws.update_cell(1, 1, "x").unwrap();
        ws.update_cell(1, 1, "").unwrap();
        assert!(ws.is_empty());
    }

    #[test]
    fn test_out_of_grid_positions() {
        let mut ws = sheet();

        assert!(matches!(
            ws.cell(0, 1),
            Err(Error::InvalidCoordinate { .. })
        ));
        assert!(matches!(ws.cell(17, 1), Err(Error::RowOutOfBounds(17, 16))));
        assert!(matches!(
            ws.update_acell("Q1", "x"),
            Err(Error::ColumnOutOfBounds(17, 16))
        ));
        assert!(matches!(ws.acell("1A"), Err(Error::InvalidLabel(_))));
        assert!(ws.range("A1:A17").is_err());
    }

    #[test]
    fn test_update_cells_is_all_or_nothing() {
        let mut ws = sheet();
        let mut cells = ws.range("A1:A3").unwrap();
        for cell in &mut cells {
            cell.set_value("v");
        }
        cells.push(Cell::new(CellAddress::new(99, 1).unwrap(), "bad".into()));

        assert!(ws.update_cells(&cells).is_err());
        assert!(ws.is_empty());

        cells.pop();
        ws.update_cells(&cells).unwrap();
        assert_eq!(ws.cell_count(), 3);
    }

    #[test]
    fn test_get_all_values_is_rectangular() {
        let mut ws = sheet();
        ws.update_acell("A1", "A1").unwrap();
        ws.update_acell("D1", "D1").unwrap();
        ws.update_acell("B2", "b2").unwrap();
        ws.update_acell("A4", "A4").unwrap();

        assert_eq!(
            ws.get_all_values(),
            vec![
                vec!["A1", "", "", "D1"],
                vec!["", "b2", "", ""],
                vec!["", "", "", ""],
                vec!["A4", "", "", ""],
            ]
        );
    }

    #[test]
    fn test_row_and_col_values() {
        let mut ws = sheet();
        ws.update_cell(2, 1, "a").unwrap();
        ws.update_cell(2, 3, "c").unwrap();
        ws.update_cell(4, 1, "d").unwrap();

        assert_eq!(ws.row_values(2).unwrap(), ["a", "", "c"]);
        assert_eq!(ws.col_values(1).unwrap(), ["", "a", "", "d"]);
        assert!(ws.row_values(5).unwrap().is_empty());
    }

    #[test]
    fn test_used_range() {
        let mut ws = sheet();
        assert!(ws.used_range().is_none());

        ws.update_cell(6, 4, "A").unwrap();
        ws.update_cell(11, 8, "B").unwrap();
        ws.update_cell(9, 2, "C").unwrap();

        assert_eq!(ws.used_range().unwrap().to_string(), "B6:H11");
    }

    #[test]
    fn test_find_and_findall() {
        let mut ws = sheet();
        ws.update_cell(2, 10, "needle").unwrap();
        ws.update_cell(2, 11, "needle").unwrap();

        let cell = ws.find("needle").unwrap();
        assert_eq!(cell.label(), "J2");
        assert_eq!(ws.findall("needle").len(), 2);

        ws.update_cell(2, 11, "needleo_Ofeed").unwrap();
        let cell = ws.find(CellQuery::pattern("[a-z]_[A-Z]feed").unwrap()).unwrap();
        assert_eq!(cell.label(), "K2");

        assert!(matches!(ws.find("missing"), Err(Error::CellNotFound(_))));
        assert!(ws.findall("missing").is_empty());
    }

    #[test]
    fn test_resize() {
        let mut ws = sheet();
        ws.add_rows(10).unwrap();
        ws.add_cols(10).unwrap();
        assert_eq!((ws.row_count(), ws.col_count()), (26, 26));

        ws.update_cell(26, 26, "far").unwrap();
        ws.set_note(26, 1, "far note").unwrap();
        ws.update_cell(1, 1, "near").unwrap();

        ws.resize(16, 16).unwrap();
        assert_eq!((ws.row_count(), ws.col_count()), (16, 16));
        assert_eq!(ws.cell_count(), 1);
        assert_eq!(ws.note_count(), 0);

        assert!(ws.resize(0, 4).is_err());
    }

    #[test]
    fn test_append_row_widens_grid() {
        let mut ws = sheet();
        let values = vec!["o_0"; 20];

        ws.append_row(values.clone()).unwrap();

        assert_eq!(ws.row_count(), 17);
        assert_eq!(ws.col_count(), 20);
        assert_eq!(ws.row_values(17).unwrap(), values);
    }

    #[test]
    fn test_insert_row_shifts_values_and_notes() {
        let mut ws = sheet();
        ws.update_cell(1, 1, "first").unwrap();
        ws.set_note(1, 1, "moves").unwrap();

        ws.insert_row(["new", "row"], 1).unwrap();

        assert_eq!(ws.row_count(), 17);
        assert_eq!(ws.row_values(1).unwrap(), ["new", "row"]);
        assert_eq!(ws.row_values(2).unwrap(), ["first"]);
        assert_eq!(ws.note(2, 1).unwrap().text, "moves");
        assert!(ws.note(1, 1).is_none());

        assert!(matches!(
            ws.insert_row(["x"], 19),
            Err(Error::RowOutOfBounds(19, 17))
        ));
    }

    #[test]
    fn test_notes() {
        let mut ws = sheet();
        assert_eq!(ws.note_count(), 0);

        ws.set_note(10, 2, "Hello notes!").unwrap();
        ws.set_anote("B10", CellNote::new("Overwritten").with_author("me"))
            .unwrap();
        ws.set_anote("A1", "First").unwrap();

        assert_eq!(ws.note_count(), 2);
        assert_eq!(ws.anote("B10").unwrap().unwrap().text, "Overwritten");

        let labels: Vec<_> = ws.notes().iter().map(|(a, _)| a.label()).collect();
        assert_eq!(labels, ["A1", "B10"]);

        assert!(ws.clear_note(1, 1).is_some());
        assert!(ws.set_note(17, 1, "outside").is_err());
        assert_eq!(ws.note_count(), 1);
    }

    #[test]
    fn test_records() {
        let mut ws = sheet();
        ws.append_row(["", "", "", ""]).unwrap();
        ws.update_cells(&[
            Cell::new(CellAddress::new(1, 1).unwrap(), "id".into()),
            Cell::new(CellAddress::new(1, 2).unwrap(), "price".into()),
            Cell::new(CellAddress::new(2, 1).unwrap(), 1.into()),
            Cell::new(CellAddress::new(2, 2).unwrap(), "1.45".into()),
        ])
        .unwrap();

        let records = ws.get_all_records(&RecordOptions::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["price"], CellValue::Number(1.45));
        assert_eq!(records[0]["id"], CellValue::Number(1.0));
    }
}
