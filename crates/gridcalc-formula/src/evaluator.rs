//! Formula evaluator
//!
//! Reduces a token sequence to a single [`Value`] with two stacks (operands
//! and operators), resolving cell references and range functions against a
//! read-only [`Grid`]. Referenced cells are tokenized and evaluated on demand;
//! the chain of cells being resolved is tracked so that a cell reaching
//! itself fails with [`EvalError::CircularReference`].

use crate::error::{EvalError, EvalResult};
use crate::functions::RangeFunction;
use crate::lexer::{is_number_literal, split_range_call, Lexer, Token, TokenKind};
use crate::options::FormulaOptions;
use crate::value::{parse_number, Value};
use ahash::AHashSet;
use gridcalc_core::{CellAddress, Grid};

/// Binding strength of an operator; higher binds tighter
fn precedence(op: &str) -> u8 {
    match op {
        "+" | "-" => 1,
        "*" | "/" => 2,
        _ => 0,
    }
}

/// Apply a binary operator to two operands
fn apply_operator(op: &str, lhs: &Value, rhs: &Value) -> EvalResult<f64> {
    if !matches!(op, "+" | "-" | "*" | "/") {
        return Err(EvalError::UnknownOperator(op.to_string()));
    }

    let a = lhs.to_number()?;
    let b = rhs.to_number()?;

    Ok(match op {
        "+" => a + b,
        "-" => a - b,
        "*" => a * b,
        _ => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
    })
}

/// Whether tokenized cell text is plain content rather than something to
/// evaluate: nothing at all, or text that starts with a label or unknown word
pub fn is_plain_text(tokens: &[Token]) -> bool {
    tokens
        .first()
        .map_or(true, |t| matches!(t.kind, TokenKind::Unknown | TokenKind::Label))
}

/// Formula engine: a lexer plus evaluation settings
///
/// Each call is independent; the engine holds no per-evaluation state and
/// never writes to the grid.
#[derive(Debug, Clone)]
pub struct FormulaEngine {
    lexer: Lexer,
    max_depth: usize,
}

impl Default for FormulaEngine {
    fn default() -> Self {
        Self::new(FormulaOptions::default())
    }
}

impl FormulaEngine {
    /// Create an engine from options
    pub fn new(options: FormulaOptions) -> Self {
        Self {
            lexer: Lexer::new(options.lexer),
            max_depth: options.max_depth,
        }
    }

    /// Tokenize cell text
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.lexer.tokenize(text)
    }

    /// Evaluate a token sequence against a grid
    pub fn evaluate(&self, tokens: &[Token], grid: &Grid) -> EvalResult<Value> {
        Evaluation::new(self, grid).evaluate(tokens)
    }

    /// Tokenize and evaluate text against a grid
    ///
    /// # Example
    /// ```rust
    /// use gridcalc_core::Grid;
    /// use gridcalc_formula::{EvalError, FormulaEngine, Value};
    ///
    /// let mut grid = Grid::default();
    /// grid.set(1, 1, "3").unwrap();
    ///
    /// let engine = FormulaEngine::default();
    /// assert_eq!(engine.evaluate_str("A1+5", &grid), Ok(Value::Number(8.0)));
    /// assert_eq!(engine.evaluate_str("5/0", &grid), Err(EvalError::DivisionByZero));
    /// ```
    pub fn evaluate_str(&self, text: &str, grid: &Grid) -> EvalResult<Value> {
        self.evaluate(&self.tokenize(text), grid)
    }

    /// Resolve the value of a cell, following references recursively
    pub fn resolve_cell(&self, addr: &CellAddress, grid: &Grid) -> EvalResult<Value> {
        Evaluation::new(self, grid).resolve(addr)
    }

    /// Resolve the value of a cell by 1-based row and column
    pub fn evaluate_cell(&self, row: usize, col: usize, grid: &Grid) -> EvalResult<Value> {
        self.resolve_cell(&CellAddress::new(row, col), grid)
    }

    /// The text a renderer shows for cell content
    ///
    /// Plain content is shown as-is; anything else is evaluated, and a failed
    /// evaluation shows as an empty string.
    pub fn display_value(&self, text: &str, grid: &Grid) -> String {
        let tokens = self.tokenize(text);
        if is_plain_text(&tokens) {
            return text.to_string();
        }

        match self.evaluate(&tokens, grid) {
            Ok(value) => value.to_string(),
            Err(e) => {
                log::debug!("evaluation of {:?} failed: {}", text, e);
                String::new()
            }
        }
    }
}

/// State of one top-level evaluation
struct Evaluation<'a> {
    engine: &'a FormulaEngine,
    grid: &'a Grid,
    /// Cells currently being resolved, outermost first
    path: AHashSet<CellAddress>,
}

impl<'a> Evaluation<'a> {
    fn new(engine: &'a FormulaEngine, grid: &'a Grid) -> Self {
        Self {
            engine,
            grid,
            path: AHashSet::new(),
        }
    }

    fn evaluate(&mut self, tokens: &[Token]) -> EvalResult<Value> {
        let mut values: Vec<Value> = Vec::new();
        let mut ops: Vec<&str> = Vec::new();

        for token in tokens {
            match token.kind {
                TokenKind::Number => {
                    let n = parse_number(&token.value)
                        .ok_or_else(|| EvalError::SyntaxError(token.value.clone()))?;
                    values.push(Value::Number(n));
                }
                TokenKind::MatrixReference => {
                    let addr = parse_reference(&token.value)?;
                    values.push(self.resolve(&addr)?);
                }
                TokenKind::Formula => {
                    values.push(Value::Number(self.range_function(&token.value)?));
                }
                TokenKind::Operator => {
                    while let Some(&top) = ops.last() {
                        if precedence(top) < precedence(&token.value) {
                            break;
                        }
                        ops.pop();
                        reduce(&mut values, top)?;
                    }
                    ops.push(&token.value);
                }
                TokenKind::Label | TokenKind::Unknown => {
                    return Err(EvalError::SyntaxError(token.value.clone()));
                }
            }
        }

        while let Some(op) = ops.pop() {
            reduce(&mut values, op)?;
        }

        match (values.pop(), values.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(EvalError::InvalidExpression),
        }
    }

    /// Resolve a referenced cell to its value
    fn resolve(&mut self, addr: &CellAddress) -> EvalResult<Value> {
        if !self.grid.contains(addr) {
            return Err(EvalError::InvalidCellReference(addr.to_string()));
        }

        if self.path.contains(addr) {
            log::debug!("circular reference through {}", addr);
            return Err(EvalError::CircularReference(addr.to_string()));
        }

        if self.path.len() >= self.engine.max_depth {
            log::debug!("reference chain too deep at {}", addr);
            return Err(EvalError::DepthLimitExceeded(self.engine.max_depth));
        }

        self.path.insert(*addr);
        let result = self.resolve_contents(addr);
        self.path.remove(addr);
        result
    }

    fn resolve_contents(&mut self, addr: &CellAddress) -> EvalResult<Value> {
        let grid = self.grid;
        let text = grid.get_at(addr).unwrap_or_default();
        log::trace!("resolving {} = {:?}", addr, text);

        let tokens = self.engine.lexer.tokenize(text);
        match tokens.as_slice() {
            [token] => match token.kind {
                TokenKind::Formula => self.range_function(&token.value).map(Value::Number),
                TokenKind::MatrixReference => self.resolve(&parse_reference(&token.value)?),
                TokenKind::Number => parse_number(&token.value)
                    .map(Value::Number)
                    .ok_or_else(|| EvalError::SyntaxError(token.value.clone())),
                _ => Ok(Value::Text(text.to_string())),
            },
            [] => Ok(Value::Text(text.to_string())),
            _ => self.evaluate(&tokens),
        }
    }

    /// Evaluate a range function call such as `SUM(A1..A10)`
    fn range_function(&self, call: &str) -> EvalResult<f64> {
        let (keyword, start, end) =
            split_range_call(call).ok_or_else(|| EvalError::SyntaxError(call.to_string()))?;
        let function: RangeFunction = keyword.parse()?;

        let start = parse_range_endpoint(start)?;
        let end = parse_range_endpoint(end)?;

        if !self.grid.contains(&start) || !self.grid.contains(&end) {
            return Err(EvalError::InvalidRange(format!(
                "{}..{} is outside the grid",
                start, end
            )));
        }

        if !start.is_colinear_with(&end) {
            return Err(EvalError::InvalidRange(format!(
                "{}..{} must lie on one row or column",
                start, end
            )));
        }

        let cells: Vec<CellAddress> = if start.col == end.col {
            let (first, last) = ordered(start.row, end.row);
            (first..=last)
                .map(|row| CellAddress::new(row, start.col))
                .collect()
        } else {
            let (first, last) = ordered(start.col, end.col);
            (first..=last)
                .map(|col| CellAddress::new(start.row, col))
                .collect()
        };

        // Only literal numbers count; text, formulas and empty cells are skipped
        let numbers: Vec<f64> = cells
            .iter()
            .filter_map(|addr| self.grid.get_at(addr))
            .map(str::trim)
            .filter(|text| is_number_literal(text))
            .filter_map(parse_number)
            .collect();
        log::trace!("{} over {} numeric of {} cells", function, numbers.len(), cells.len());

        function.apply(&numbers)
    }
}

/// Pop two operands and apply `op`, pushing the result
fn reduce(values: &mut Vec<Value>, op: &str) -> EvalResult<()> {
    let (Some(rhs), Some(lhs)) = (values.pop(), values.pop()) else {
        return Err(EvalError::InvalidExpression);
    };
    values.push(Value::Number(apply_operator(op, &lhs, &rhs)?));
    Ok(())
}

fn parse_reference(text: &str) -> EvalResult<CellAddress> {
    CellAddress::parse(text).map_err(|_| EvalError::InvalidCellReference(text.to_string()))
}

fn parse_range_endpoint(text: &str) -> EvalResult<CellAddress> {
    CellAddress::parse(text).map_err(|_| EvalError::InvalidRange(text.to_string()))
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
