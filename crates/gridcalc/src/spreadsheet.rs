//! Spreadsheet: a grid paired with the formula engine that reads it

use std::path::Path;

use gridcalc_core::{CellAddress, Grid, Result};
use gridcalc_csv::{CsvReadOptions, CsvReader, CsvResult, CsvWriteOptions, CsvWriter};
use gridcalc_formula::{EvalResult, FormulaEngine, FormulaOptions, Value};

/// How a cell's raw content is presented on the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Only digits and decimal points
    Value,
    /// Anything else, including empty cells
    Label,
}

impl ContentKind {
    /// Classify raw cell text
    pub fn of(text: &str) -> Self {
        if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit() || c == '.') {
            ContentKind::Value
        } else {
            ContentKind::Label
        }
    }

    /// Single-letter tag shown next to the cell name
    pub fn tag(self) -> char {
        match self {
            ContentKind::Value => 'V',
            ContentKind::Label => 'L',
        }
    }
}

/// An editing session's grid and formula engine
///
/// Edits go through [`Spreadsheet::set`]; every read that evaluates a cell is
/// independent and recomputes from the current grid contents.
#[derive(Debug, Clone, Default)]
pub struct Spreadsheet {
    grid: Grid,
    engine: FormulaEngine,
}

impl Spreadsheet {
    /// Create an empty spreadsheet with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::from_grid(Grid::new(rows, cols)?))
    }

    /// Wrap an existing grid with a default engine
    pub fn from_grid(grid: Grid) -> Self {
        Self::with_options(grid, FormulaOptions::default())
    }

    /// Wrap an existing grid with a configured engine
    pub fn with_options(grid: Grid, options: FormulaOptions) -> Self {
        Self {
            grid,
            engine: FormulaEngine::new(options),
        }
    }

    /// Load a spreadsheet from a comma-delimited file
    pub fn open<P: AsRef<Path>>(path: P) -> CsvResult<Self> {
        let grid = CsvReader::read_file(path, &CsvReadOptions::default())?;
        Ok(Self::from_grid(grid))
    }

    /// The underlying grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the underlying grid
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The formula engine
    pub fn engine(&self) -> &FormulaEngine {
        &self.engine
    }

    // === Cell Access ===

    /// Raw text of a cell (1-based), `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.grid.get(row, col)
    }

    /// Replace the raw text of a cell (1-based), growing the grid if needed
    pub fn set<S: Into<String>>(&mut self, row: usize, col: usize, text: S) -> Result<()> {
        self.grid.set(row, col, text)
    }

    /// Evaluate arbitrary text against the current grid
    pub fn evaluate(&self, text: &str) -> EvalResult<Value> {
        self.engine.evaluate_str(text, &self.grid)
    }

    /// Evaluate a cell (1-based)
    pub fn evaluate_cell(&self, row: usize, col: usize) -> EvalResult<Value> {
        self.engine.evaluate_cell(row, col, &self.grid)
    }

    /// The text a renderer shows for a cell (1-based)
    ///
    /// Plain content is shown as-is, formulas as their value, failed
    /// formulas as an empty string.
    pub fn display_value(&self, row: usize, col: usize) -> String {
        let text = self.grid.get(row, col).unwrap_or_default();
        self.engine.display_value(text, &self.grid)
    }

    /// Whether a cell's raw content reads as a value or a label
    pub fn content_kind(&self, row: usize, col: usize) -> ContentKind {
        ContentKind::of(self.grid.get(row, col).unwrap_or_default())
    }

    /// Status line for a cell, e.g. `B3 (V) 42`
    pub fn describe_cell(&self, row: usize, col: usize) -> String {
        let text = self.grid.get(row, col).unwrap_or_default();
        format!(
            "{} ({}) {}",
            CellAddress::new(row, col),
            ContentKind::of(text).tag(),
            text
        )
    }

    // === Files ===

    /// Replace the grid with the contents of a comma-delimited file
    ///
    /// On failure the current grid is kept.
    pub fn load_csv<P: AsRef<Path>>(&mut self, path: P) -> CsvResult<()> {
        let path = path.as_ref();
        match CsvReader::read_file(path, &CsvReadOptions::default()) {
            Ok(grid) => {
                self.grid = grid;
                Ok(())
            }
            Err(e) => {
                log::warn!("could not load {}: {}; keeping current grid", path.display(), e);
                Err(e)
            }
        }
    }

    /// Save the grid as a comma-delimited file
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> CsvResult<()> {
        CsvWriter::write_file(&self.grid, path, &CsvWriteOptions::default())
    }

    /// Erase all content and reset to a 1x1 grid
    pub fn clear(&mut self) {
        self.grid.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_formula::EvalError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_kind() {
        assert_eq!(ContentKind::of("42"), ContentKind::Value);
        assert_eq!(ContentKind::of("3.14"), ContentKind::Value);
        assert_eq!(ContentKind::of("-3"), ContentKind::Label);
        assert_eq!(ContentKind::of("A1+1"), ContentKind::Label);
        assert_eq!(ContentKind::of(""), ContentKind::Label);
    }

    #[test]
    fn test_describe_cell() {
        let mut sheet = Spreadsheet::default();
        sheet.set(3, 2, "42").unwrap();
        sheet.set(1, 1, "total").unwrap();
        assert_eq!(sheet.describe_cell(3, 2), "B3 (V) 42");
        assert_eq!(sheet.describe_cell(1, 1), "A1 (L) total");
    }

    #[test]
    fn test_display_value() {
        let mut sheet = Spreadsheet::new(2, 2).unwrap();
        sheet.set(1, 1, "3").unwrap();
        sheet.set(1, 2, "A1*A1").unwrap();
        sheet.set(2, 1, "Revenue").unwrap();
        sheet.set(2, 2, "B2+1").unwrap();

        assert_eq!(sheet.display_value(1, 1), "3");
        assert_eq!(sheet.display_value(1, 2), "9");
        assert_eq!(sheet.display_value(2, 1), "Revenue");
        assert_eq!(sheet.display_value(2, 2), "");
        assert_eq!(sheet.display_value(9, 9), "");
        assert!(matches!(
            sheet.evaluate_cell(2, 2),
            Err(EvalError::CircularReference(_))
        ));
    }

    #[test]
    fn test_edits_are_seen_by_next_evaluation() {
        let mut sheet = Spreadsheet::new(1, 2).unwrap();
        sheet.set(1, 1, "1").unwrap();
        sheet.set(1, 2, "A1+1").unwrap();
        assert_eq!(sheet.evaluate_cell(1, 2), Ok(Value::Number(2.0)));

        sheet.set(1, 1, "41").unwrap();
        assert_eq!(sheet.evaluate_cell(1, 2), Ok(Value::Number(42.0)));
    }
}
