//! Evaluation values

use crate::error::{EvalError, EvalResult};
use crate::lexer::is_number_literal;
use std::fmt;

/// Fractional digits rendered before trimming
const DECIMAL_DIGITS: usize = 15;

/// The result of evaluating cell text
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    /// Cell content that is not a number or formula, passed through as-is
    Text(String),
}

impl Value {
    /// Convert to number, if possible
    ///
    /// Text converts only when it is a number literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) if is_number_literal(s) => parse_number(s),
            Value::Text(_) => None,
        }
    }

    /// Force conversion to number for arithmetic
    pub fn to_number(&self) -> EvalResult<f64> {
        self.as_number()
            .ok_or_else(|| EvalError::NonNumericOperand(self.to_string()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Render a number in canonical decimal form
///
/// Fixed-point with 15 fractional digits, then trailing zeros and a dangling
/// decimal point are trimmed.
///
/// ```
/// use gridcalc_formula::format_number;
///
/// assert_eq!(format_number(8.0), "8");
/// assert_eq!(format_number(0.25), "0.25");
/// assert_eq!(format_number(-1.5), "-1.5");
/// ```
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let formatted = format!("{:.*}", DECIMAL_DIGITS, n);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a number literal (already normalized or not) into an `f64`
///
/// Literals that overflow to infinity are rejected.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}
