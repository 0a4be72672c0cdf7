//! # gridcalc-formula
//!
//! Formula engine for gridcalc.
//!
//! This crate provides:
//! - Cell text classification (text → typed tokens)
//! - Formula evaluation (tokens → value), resolving cell references and
//!   range functions recursively against a [`Grid`](gridcalc_core::Grid)
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::Grid;
//! use gridcalc_formula::{FormulaEngine, Value};
//!
//! let mut grid = Grid::new(3, 1).unwrap();
//! grid.set(1, 1, "1").unwrap();
//! grid.set(2, 1, "2").unwrap();
//! grid.set(3, 1, "SUM(A1..A2)").unwrap();
//!
//! let engine = FormulaEngine::default();
//! let value = engine.evaluate_str("A3*2", &grid).unwrap();
//! assert_eq!(value, Value::Number(6.0));
//! ```

pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod options;
pub mod value;

pub use error::{EvalError, EvalResult};
pub use evaluator::{is_plain_text, FormulaEngine};
pub use functions::RangeFunction;
pub use lexer::{Lexer, Token, TokenKind};
pub use options::{FormulaOptions, LexerOptions};
pub use value::{format_number, Value};
