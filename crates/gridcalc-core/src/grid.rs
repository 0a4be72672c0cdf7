//! Grid type

use crate::address::CellAddress;
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A bounded, resizable 2-D store of raw cell text
///
/// Coordinates passed to the public API are 1-based; storage is 0-based.
/// The table is always rectangular: every row holds exactly [`Grid::cols`]
/// entries.
///
/// With the `serde` feature a grid serializes as its rows of cell text and
/// deserializes through [`Grid::from_rows`], so the limits and the
/// rectangular shape hold for deserialized grids too.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")
)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<String>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            cells: vec![vec![String::new()]],
        }
    }
}

impl Grid {
    /// Create an empty grid with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::check_limits(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![vec![String::new(); cols]; rows],
        })
    }

    /// Build a grid from rows of cell text
    ///
    /// The column count is the longest row's length; shorter rows are padded
    /// with empty cells so the table stays rectangular.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self::check_limits(row_count, col_count)?;

        let cells = rows
            .into_iter()
            .map(|mut row| {
                row.iter_mut().for_each(|text| strip_newlines(text));
                row.resize(col_count, String::new());
                row
            })
            .collect();

        Ok(Self {
            rows: row_count,
            cols: col_count,
            cells,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether a 1-based coordinate lies inside the current bounds
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        (1..=self.rows).contains(&row) && (1..=self.cols).contains(&col)
    }

    /// Whether an address lies inside the current bounds
    pub fn contains(&self, addr: &CellAddress) -> bool {
        self.in_bounds(addr.row, addr.col)
    }

    // === Cell Access ===

    /// Get a cell's text by 1-based row and column
    ///
    /// Returns `None` outside the current bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(self.cells[row - 1][col - 1].as_str())
    }

    /// Get a cell's text by address
    pub fn get_at(&self, addr: &CellAddress) -> Option<&str> {
        self.get(addr.row, addr.col)
    }

    /// Get a cell's text by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&str>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_at(&addr))
    }

    /// Set a cell's text by 1-based row and column
    ///
    /// Newline characters are removed before storing. Writing past the
    /// current bounds grows the grid to fit, up to [`MAX_ROWS`] x [`MAX_COLS`].
    pub fn set<S: Into<String>>(&mut self, row: usize, col: usize, text: S) -> Result<()> {
        if row == 0 || col == 0 {
            return Err(Error::InvalidIndex { row, col });
        }

        self.ensure_size(row, col)?;

        let mut text = text.into();
        strip_newlines(&mut text);
        self.cells[row - 1][col - 1] = text;
        Ok(())
    }

    /// Set a cell's text by address string (e.g., "A1")
    pub fn set_cell<S: Into<String>>(&mut self, address: &str, text: S) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set(addr.row, addr.col, text)
    }

    /// Iterate over the cells of a 1-based row
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = &str> + '_ {
        row.checked_sub(1)
            .and_then(|idx| self.cells.get(idx))
            .into_iter()
            .flat_map(|cells| cells.iter().map(String::as_str))
    }

    // === Dimensions ===

    /// Resize to exactly `rows` x `cols`
    ///
    /// Shrinking truncates content; growing pads with empty cells. Fails with
    /// [`Error::SizeLimitExceeded`] and leaves the grid unchanged if either
    /// dimension exceeds the maximum.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        Self::check_limits(rows, cols)?;

        self.cells.resize_with(rows, Vec::new);
        for row in &mut self.cells {
            row.resize(cols, String::new());
        }
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Grow (never shrink) so that the 1-based `row`, `col` is in bounds
    pub fn ensure_size(&mut self, row: usize, col: usize) -> Result<()> {
        let rows = self.rows.max(row);
        let cols = self.cols.max(col);
        if rows == self.rows && cols == self.cols {
            return Ok(());
        }

        log::debug!(
            "growing grid from {}x{} to {}x{}",
            self.rows,
            self.cols,
            rows,
            cols
        );
        self.resize(rows, cols)
    }

    /// Erase all content and reset to a 1x1 empty grid
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn check_limits(rows: usize, cols: usize) -> Result<()> {
        if rows > MAX_ROWS || cols > MAX_COLS {
            return Err(Error::size_limit(rows, cols));
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<String>>> for Grid {
    type Error = Error;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<String>> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

fn strip_newlines(text: &mut String) {
    text.retain(|c| c != '\n');
}
