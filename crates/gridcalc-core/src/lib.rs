//! # gridcalc-core
//!
//! Core data structures for the gridcalc formula engine.
//!
//! This crate provides:
//! - [`Grid`] - A bounded, resizable 2-D store of raw cell text
//! - [`CellAddress`] - A1-style cell addressing
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::Grid;
//!
//! let mut grid = Grid::new(2, 2).unwrap();
//!
//! // Coordinates are 1-based
//! grid.set(1, 1, "42").unwrap();
//! grid.set(2, 1, "A1*2").unwrap();
//!
//! assert_eq!(grid.get(1, 1), Some("42"));
//! assert_eq!(grid.get(5, 5), None);
//! ```

pub mod address;
pub mod error;
pub mod grid;

pub use address::CellAddress;
pub use error::{Error, Result};
pub use grid::Grid;

/// Maximum number of rows in a grid
pub const MAX_ROWS: usize = 100;

/// Maximum number of columns in a grid
pub const MAX_COLS: usize = 100;
