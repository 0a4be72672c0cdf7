//! Cell address type

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Maximum number of column letters in a reference (A..ZZ)
const MAX_COLUMN_LETTERS: usize = 2;

/// Maximum number of row digits in a reference (1..999)
const MAX_ROW_DIGITS: usize = 3;

/// A cell address in A1 notation (e.g., "A1", "AA300")
///
/// Both indices are 1-based, matching the addressing used by [`Grid`](crate::Grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row index (1-based)
    pub row: usize,
    /// Column index (1-based, A=1, B=2, ..., ZZ=702)
    pub col: usize,
}

impl CellAddress {
    /// Create a new cell address from 1-based indices
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// Only the reference shape the formula language accepts is valid: one or
    /// two uppercase letters followed by one to three digits.
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B3").unwrap();
    /// assert_eq!(addr.row, 3);
    /// assert_eq!(addr.col, 2);
    ///
    /// let addr = CellAddress::parse("AA300").unwrap();
    /// assert_eq!(addr.col, 27);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();

        let letters = bytes.iter().take_while(|b| b.is_ascii_uppercase()).count();
        if letters == 0 || letters > MAX_COLUMN_LETTERS {
            return Err(Error::InvalidAddress(format!(
                "expected 1-{} column letters in '{}'",
                MAX_COLUMN_LETTERS, s
            )));
        }

        let digits = &s[letters..];
        if digits.is_empty()
            || digits.len() > MAX_ROW_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Error::InvalidAddress(format!(
                "expected 1-{} row digits in '{}'",
                MAX_ROW_DIGITS, s
            )));
        }

        let row: usize = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self {
            row,
            col: Self::letters_to_column(&s[..letters])?,
        })
    }

    /// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, etc.)
    pub fn column_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27, etc.)
    pub fn letters_to_column(letters: &str) -> Result<usize> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col = 0usize;
        for c in letters.chars() {
            if !c.is_ascii_uppercase() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c as usize - 'A' as usize + 1);
        }

        Ok(col)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row)
    }

    /// Whether this address shares a row or a column with `other`
    pub fn is_colinear_with(&self, other: &CellAddress) -> bool {
        self.row == other.row || self.col == other.col
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
