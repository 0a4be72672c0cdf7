//! Range functions
//!
//! Aggregates applied to the numeric cells of a single row or column segment.

use crate::error::{EvalError, EvalResult};
use std::fmt;
use std::str::FromStr;

/// Prefix accepted in front of any function keyword (`@SUM` is `SUM`)
pub const ALIAS_PREFIX: char = '@';

/// A recognized range function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeFunction {
    Sum,
    Aver,
    Max,
    Min,
    StdDev,
}

impl RangeFunction {
    /// Every range function, in keyword order
    pub const ALL: [RangeFunction; 5] = [
        RangeFunction::Sum,
        RangeFunction::Aver,
        RangeFunction::Max,
        RangeFunction::Min,
        RangeFunction::StdDev,
    ];

    /// The keyword used in cell text
    pub fn name(self) -> &'static str {
        match self {
            RangeFunction::Sum => "SUM",
            RangeFunction::Aver => "AVER",
            RangeFunction::Max => "MAX",
            RangeFunction::Min => "MIN",
            RangeFunction::StdDev => "STDDEV",
        }
    }

    /// Look up a keyword, ignoring a leading `@`
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.strip_prefix(ALIAS_PREFIX).unwrap_or(keyword);
        Self::ALL.into_iter().find(|f| f.name() == keyword)
    }

    /// Whether the function needs at least one numeric cell
    pub fn requires_values(self) -> bool {
        !matches!(self, RangeFunction::Sum)
    }

    /// Apply the function to the numeric cells of a range
    pub fn apply(self, values: &[f64]) -> EvalResult<f64> {
        if values.is_empty() && self.requires_values() {
            return Err(EvalError::InvalidRange(format!(
                "{} needs at least one numeric cell",
                self
            )));
        }

        let result = match self {
            RangeFunction::Sum => sum(values),
            RangeFunction::Aver => mean(values),
            RangeFunction::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            RangeFunction::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            RangeFunction::StdDev => {
                // Population standard deviation (divide by N)
                let mean = mean(values);
                let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                    / values.len() as f64;
                variance.sqrt()
            }
        };

        Ok(result)
    }
}

impl fmt::Display for RangeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RangeFunction {
    type Err = EvalError;

    fn from_str(s: &str) -> EvalResult<Self> {
        Self::from_keyword(s).ok_or_else(|| EvalError::SyntaxError(s.to_string()))
    }
}

fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

fn mean(values: &[f64]) -> f64 {
    sum(values) / values.len() as f64
}
