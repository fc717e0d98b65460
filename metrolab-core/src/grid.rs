//! Sparse reading grid
//!
//! The workbench grid holds raw analyst input as text, one column per
//! parameter (column index = parameter position), rows 0..n. Cells stay
//! text until an analysis run parses them; blank and non-numeric cells
//! are silently excluded from the sample rather than reported as
//! errors. Each column may carry an input-unit selection that differs
//! from the parameter's canonical unit.
//!
//! Ordered maps keep column iteration deterministic.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Sparse column → row → raw text grid plus per-column unit choices.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadingGrid {
    cells: BTreeMap<usize, BTreeMap<usize, String>>,
    units: BTreeMap<usize, String>,
}

impl ReadingGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text for a cell, overwriting any previous value.
    pub fn set_cell(&mut self, col: usize, row: usize, value: impl Into<String>) {
        self.cells.entry(col).or_default().insert(row, value.into());
    }

    /// Raw text of a cell, if the analyst has entered one.
    pub fn cell(&self, col: usize, row: usize) -> Option<&str> {
        self.cells.get(&col)?.get(&row).map(String::as_str)
    }

    /// Select the input unit for a column.
    pub fn set_unit(&mut self, col: usize, unit: impl Into<String>) {
        self.units.insert(col, unit.into());
    }

    /// Input unit for a column, falling back to `default` when the
    /// analyst has not selected one (or selected an empty string).
    pub fn unit_for<'a>(&'a self, col: usize, default: &'a str) -> &'a str {
        self.units
            .get(&col)
            .map(String::as_str)
            .filter(|unit| !unit.is_empty())
            .unwrap_or(default)
    }

    /// Whether the grid holds no cell data at all.
    pub fn is_empty(&self) -> bool {
        self.cells.values().all(BTreeMap::is_empty)
    }

    /// Drop all cells and unit selections.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.units.clear();
    }

    /// Parse a column's cells for rows `0..rows` into readings.
    ///
    /// Blank cells, non-numeric text, and non-finite values are
    /// excluded from the sample without raising.
    pub fn column_readings(&self, col: usize, rows: usize) -> Vec<f64> {
        let mut readings = Vec::new();
        let Some(column) = self.cells.get(&col) else {
            return readings;
        };
        for row in 0..rows {
            if let Some(text) = column.get(&row) {
                if let Ok(value) = text.trim().parse::<f64>() {
                    if value.is_finite() {
                        readings.push(value);
                    }
                }
            }
        }
        readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn readings_skip_blank_and_junk_cells() {
        let mut grid = ReadingGrid::new();
        grid.set_cell(0, 0, "8");
        grid.set_cell(0, 1, "");
        grid.set_cell(0, 2, "not a number");
        grid.set_cell(0, 3, " 9.5 ");
        grid.set_cell(0, 4, "NaN");

        assert_eq!(grid.column_readings(0, 10), vec![8.0, 9.5]);
    }

    #[test]
    fn readings_respect_row_bound() {
        let mut grid = ReadingGrid::new();
        grid.set_cell(0, 0, "1");
        grid.set_cell(0, 9, "2");
        grid.set_cell(0, 10, "3");

        assert_eq!(grid.column_readings(0, 10), vec![1.0, 2.0]);
    }

    #[test]
    fn missing_column_yields_empty_sample() {
        let grid = ReadingGrid::new();
        assert!(grid.column_readings(3, 10).is_empty());
    }

    #[test]
    fn unit_falls_back_to_default() {
        let mut grid = ReadingGrid::new();
        assert_eq!(grid.unit_for(0, "ppm"), "ppm");

        grid.set_unit(0, "ppb");
        assert_eq!(grid.unit_for(0, "ppm"), "ppb");

        // An empty selection behaves like no selection.
        grid.set_unit(0, "");
        assert_eq!(grid.unit_for(0, "ppm"), "ppm");
    }

    #[test]
    fn clear_drops_cells_and_units() {
        let mut grid = ReadingGrid::new();
        grid.set_cell(1, 1, "5");
        grid.set_unit(1, "ppb");
        grid.clear();

        assert!(grid.is_empty());
        assert_eq!(grid.unit_for(1, "ppm"), "ppm");
    }

    #[test]
    fn cells_overwrite_in_place() {
        let mut grid = ReadingGrid::new();
        grid.set_cell(0, 0, "1");
        grid.set_cell(0, 0, "2");
        assert_eq!(grid.cell(0, 0), Some("2"));
        assert_eq!(grid.column_readings(0, 1), vec![2.0]);
    }
}
