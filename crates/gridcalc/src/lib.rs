//! # gridcalc
//!
//! A grid of cells holding literal text, numbers or formulas that reference
//! other cells, evaluated on demand.
//!
//! ## Features
//!
//! - Bounded, resizable cell grid with 1-based addressing
//! - Formula language: `+ - * /` with precedence, cell references (`A1`),
//!   range functions (`SUM`, `AVER`, `MAX`, `MIN`, `STDDEV` over `A1..A10`)
//! - Circular reference detection
//! - Comma-delimited load/save
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Spreadsheet::new(3, 2).unwrap();
//! sheet.set(1, 1, "10").unwrap();
//! sheet.set(2, 1, "32").unwrap();
//! sheet.set(3, 1, "SUM(A1..A2)").unwrap();
//! sheet.set(3, 2, "A3/2").unwrap();
//!
//! assert_eq!(sheet.evaluate_cell(3, 2).unwrap(), Value::Number(21.0));
//! assert_eq!(sheet.display_value(3, 1), "42");
//! ```

pub mod prelude;
pub mod shared;
pub mod spreadsheet;

pub use shared::SharedSheet;
pub use spreadsheet::{ContentKind, Spreadsheet};

// Re-export core types
pub use gridcalc_core::{CellAddress, Error, Grid, Result, MAX_COLS, MAX_ROWS};

// Re-export formula types
pub use gridcalc_formula::{
    format_number, is_plain_text, EvalError, EvalResult, FormulaEngine, FormulaOptions, Lexer,
    LexerOptions, RangeFunction, Token, TokenKind, Value,
};

// Re-export I/O types
pub use gridcalc_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvResult, CsvWriteOptions, CsvWriter, LineTerminator,
};
