//! Cell storage implementation
//!
//! Sparse storage for worksheet values. Only non-empty cells are stored,
//! using a row-based BTreeMap structure so iteration is row-major.

use std::collections::BTreeMap;

use super::CellValue;

/// Sparse row-based storage for worksheet values
///
/// Structure: `BTreeMap<row, BTreeMap<col, CellValue>>`, both 1-based.
#[derive(Debug, Clone, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u32, CellValue>>,
}

impl CellStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a stored value
    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Store a value; an empty value removes the cell instead
    pub fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        if value.is_empty() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, value);
        }
    }

    /// Remove a cell, returning its value
    pub fn remove(&mut self, row: u32, col: u32) -> Option<CellValue> {
        let row_map = self.rows.get_mut(&row)?;
        let removed = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Check if no cells are stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest row and largest column holding a value, as `(max_row, max_col)`
    pub fn used_extent(&self) -> Option<(u32, u32)> {
        let max_row = *self.rows.keys().next_back()?;
        let max_col = self
            .rows
            .values()
            .filter_map(|r| r.keys().next_back().copied())
            .max()?;
        Some((max_row, max_col))
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &CellValue)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, v)| (row, col, v)))
    }

    /// Iterate over the cells of one row, left to right
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u32, &CellValue)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, v)| (col, v)))
    }

    /// Iterate over the cells of one column, top to bottom
    pub fn iter_col(&self, col: u32) -> impl Iterator<Item = (u32, &CellValue)> {
        self.rows
            .iter()
            .filter_map(move |(&row, cols)| cols.get(&col).map(|v| (row, v)))
    }

    /// Drop every cell outside `1..=max_row` x `1..=max_col`
    ///
    /// Returns the number of cells dropped.
    pub fn truncate(&mut self, max_row: u32, max_col: u32) -> usize {
        let before = self.cell_count();
        self.rows.split_off(&(max_row.saturating_add(1)));
        for cols in self.rows.values_mut() {
            cols.split_off(&(max_col.saturating_add(1)));
        }
        self.rows.retain(|_, cols| !cols.is_empty());
        before - self.cell_count()
    }

    /// Move every row `>= row` down by one, leaving `row` empty
    pub fn shift_rows_down(&mut self, row: u32) {
        let moved = self.rows.split_off(&row);
        self.rows
            .extend(moved.into_iter().map(|(r, cols)| (r + 1, cols)));
    }
}
