//! A spreadsheet shared between editors
//!
//! Resolution reads an unbounded, dynamically determined set of cells, so a
//! whole evaluation runs under one read lock and edits wait for it to finish.

use std::sync::Arc;

use gridcalc_core::Result;
use gridcalc_formula::{EvalResult, Value};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::spreadsheet::Spreadsheet;

/// Cloneable handle to a spreadsheet guarded by a reader-writer lock
#[derive(Debug, Clone, Default)]
pub struct SharedSheet {
    inner: Arc<RwLock<Spreadsheet>>,
}

impl SharedSheet {
    /// Share a spreadsheet
    pub fn new(sheet: Spreadsheet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(sheet)),
        }
    }

    /// Replace the raw text of a cell (1-based)
    pub fn set<S: Into<String>>(&self, row: usize, col: usize, text: S) -> Result<()> {
        self.inner.write().set(row, col, text)
    }

    /// Evaluate a cell (1-based) against a consistent snapshot of the grid
    pub fn evaluate_cell(&self, row: usize, col: usize) -> EvalResult<Value> {
        self.inner.read().evaluate_cell(row, col)
    }

    /// Evaluate arbitrary text against a consistent snapshot of the grid
    pub fn evaluate(&self, text: &str) -> EvalResult<Value> {
        self.inner.read().evaluate(text)
    }

    /// The text a renderer shows for a cell (1-based)
    pub fn display_value(&self, row: usize, col: usize) -> String {
        self.inner.read().display_value(row, col)
    }

    /// Hold the read lock for several evaluations, e.g. a full redraw
    pub fn read(&self) -> RwLockReadGuard<'_, Spreadsheet> {
        self.inner.read()
    }

    /// Hold the write lock for several edits
    pub fn write(&self) -> RwLockWriteGuard<'_, Spreadsheet> {
        self.inner.write()
    }
}

impl From<Spreadsheet> for SharedSheet {
    fn from(sheet: Spreadsheet) -> Self {
        Self::new(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_edits_and_evaluations() {
        let shared = SharedSheet::new(Spreadsheet::new(1, 3).unwrap());
        shared.set(1, 1, "1").unwrap();
        shared.set(1, 2, "1").unwrap();
        shared.set(1, 3, "A1+B1").unwrap();

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for n in 1..=100 {
                    // Both cells change under one write lock
                    let mut sheet = shared.write();
                    sheet.set(1, 1, n.to_string()).unwrap();
                    sheet.set(1, 2, n.to_string()).unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        let value = shared.evaluate_cell(1, 3).unwrap();
                        let n = value.as_number().unwrap();
                        // Never a half-applied edit
                        assert_eq!(n % 2.0, 0.0);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(shared.evaluate_cell(1, 3), Ok(Value::Number(200.0)));
    }

    #[test]
    fn test_display_through_handle() {
        let shared: SharedSheet = Spreadsheet::default().into();
        shared.set(1, 1, "2").unwrap();
        shared.set(1, 2, "A1*21").unwrap();
        assert_eq!(shared.display_value(1, 2), "42");
        assert_eq!(shared.read().grid().cols(), 2);
    }
}
