//! Formula error types

use thiserror::Error;

/// Result type for formula evaluation
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while evaluating cell text
///
/// Every failure aborts the whole evaluation; no partial value is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A token the evaluator cannot use (label or unrecognized text)
    #[error("Syntax error: unexpected token '{0}'")]
    SyntaxError(String),

    /// Operand/operator stack imbalance
    #[error("Invalid expression")]
    InvalidExpression,

    /// Reference outside the current grid bounds
    #[error("Invalid cell reference: {0}")]
    InvalidCellReference(String),

    /// Range endpoints out of bounds, not on one row or column, or holding
    /// no numeric cells for an aggregate that needs at least one
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Division by a numeric zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Arithmetic on a value that is not a number
    #[error("Non-numeric value in operation: '{0}'")]
    NonNumericOperand(String),

    /// Operator outside the arithmetic set
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// A cell reached itself while resolving its references
    #[error("Circular reference detected involving cell {0}")]
    CircularReference(String),

    /// Reference chain longer than the configured limit
    #[error("Reference chain deeper than {0} cells")]
    DepthLimitExceeded(usize),
}
