//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Cell addressing
    CellAddress,
    ContentKind,

    // I/O types
    CsvReader,
    CsvWriter,

    // Error types
    Error,
    EvalError,
    EvalResult,

    // Formula engine
    FormulaEngine,
    FormulaOptions,
    // Main types
    Grid,
    Result,
    SharedSheet,
    Spreadsheet,
    Token,
    TokenKind,
    Value,
};
