//! Engine options

use crate::functions::RangeFunction;

/// Default limit on nested cell resolution
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for the lexer
#[derive(Debug, Clone)]
pub struct LexerOptions {
    /// Recognized operator symbols
    pub operators: Vec<String>,
    /// Recognized range functions (each also accepted with an `@` prefix)
    pub functions: Vec<RangeFunction>,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            operators: ["+", "-", "*", "/"].into_iter().map(String::from).collect(),
            functions: RangeFunction::ALL.to_vec(),
        }
    }
}

/// Options for the formula engine
#[derive(Debug, Clone)]
pub struct FormulaOptions {
    /// Lexer configuration
    pub lexer: LexerOptions,
    /// Maximum depth of nested cell resolution before giving up
    pub max_depth: usize,
}

impl Default for FormulaOptions {
    fn default() -> Self {
        Self {
            lexer: LexerOptions::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
