//! Error types for gridcalc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridcalc-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Zero row or column in a 1-based coordinate
    #[error("Invalid cell index ({row}, {col}): rows and columns start at 1")]
    InvalidIndex { row: usize, col: usize },

    /// Growth or resize past the grid limits
    #[error("Grid size {rows}x{cols} exceeds the maximum of {max_rows}x{max_cols}")]
    SizeLimitExceeded {
        rows: usize,
        cols: usize,
        max_rows: usize,
        max_cols: usize,
    },

    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),
}

impl Error {
    pub(crate) fn size_limit(rows: usize, cols: usize) -> Self {
        Error::SizeLimitExceeded {
            rows,
            cols,
            max_rows: crate::MAX_ROWS,
            max_cols: crate::MAX_COLS,
        }
    }
}
