//! # gridcalc-csv
//!
//! Delimited file reader and writer for gridcalc grids.
//!
//! The format is deliberately minimal: one row per line, fields split on the
//! delimiter, no quoting or escaping. A field that contains the delimiter is
//! written as-is and therefore reads back as several fields.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
