//! Cell text lexer
//!
//! Splits raw cell text into typed tokens in two steps:
//!
//! 1. A single scanning pass cuts the text into maximal candidate substrings
//!    (operators, numbers, words, range function calls, stray characters).
//! 2. Each candidate is classified by the first matching rule of
//!    [`CLASSIFICATION_RULES`], then a merge pass turns a cell reference glued
//!    to a following non-operator token into a single label.

use crate::functions::{RangeFunction, ALIAS_PREFIX};
use crate::options::LexerOptions;
use lazy_regex::{regex_captures, regex_is_match};
use std::fmt;

/// Marker that may precede a formula in cell text (`=A1+1`)
const FORMULA_MARKER: char = '=';

/// Token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Numeric literal (`12`, `0.5`, `1.2E4`)
    Number,
    /// Opaque text mixing letters and digits
    Label,
    /// Cell reference (`A1`, `AA300`)
    MatrixReference,
    /// Range function call (`SUM(A1..A10)`)
    Formula,
    /// Arithmetic operator
    Operator,
    /// Anything else
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A classified piece of cell text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, value: S) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// One classification rule: the first rule whose predicate accepts a
/// candidate decides its kind
pub struct Rule {
    pub kind: TokenKind,
    pub matches: fn(&Lexer, &str) -> bool,
}

/// Classification rules in precedence order
pub const CLASSIFICATION_RULES: [Rule; 5] = [
    Rule {
        kind: TokenKind::MatrixReference,
        matches: matches_reference,
    },
    Rule {
        kind: TokenKind::Formula,
        matches: matches_formula,
    },
    Rule {
        kind: TokenKind::Number,
        matches: matches_number,
    },
    Rule {
        kind: TokenKind::Label,
        matches: matches_label,
    },
    Rule {
        kind: TokenKind::Operator,
        matches: matches_operator,
    },
];

fn matches_reference(_: &Lexer, candidate: &str) -> bool {
    is_cell_reference(candidate)
}

fn matches_formula(lexer: &Lexer, candidate: &str) -> bool {
    split_range_call(candidate)
        .and_then(|(keyword, _, _)| RangeFunction::from_keyword(keyword))
        .map_or(false, |function| lexer.options.functions.contains(&function))
}

fn matches_number(_: &Lexer, candidate: &str) -> bool {
    is_number_literal(candidate)
}

fn matches_label(_: &Lexer, candidate: &str) -> bool {
    candidate.chars().any(|c| c.is_ascii_alphabetic())
        && candidate.chars().any(|c| c.is_ascii_digit())
}

fn matches_operator(lexer: &Lexer, candidate: &str) -> bool {
    lexer.options.operators.iter().any(|op| op == candidate)
}

/// Whether text is a cell reference: one or two uppercase letters followed
/// by one to three digits
pub fn is_cell_reference(text: &str) -> bool {
    regex_is_match!(r"^[A-Z]{1,2}[0-9]{1,3}$", text)
}

/// Whether text is a number literal (`-` sign, decimal point and exponent
/// optional; a leading `.` is allowed)
pub fn is_number_literal(text: &str) -> bool {
    regex_is_match!(r"^-?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)(?:[eE][-+]?[0-9]+)?$", text)
}

/// Split `KEYWORD(START..END)` into its keyword (with any `@` kept) and the
/// two endpoint references
pub fn split_range_call(text: &str) -> Option<(&str, &str, &str)> {
    regex_captures!(
        r"^(@?[A-Z]+)\(([A-Z]{1,2}[0-9]{1,3})\.\.([A-Z]{1,2}[0-9]{1,3})\)$",
        text
    )
    .map(|(_, keyword, start, end)| (keyword, start, end))
}

/// Insert the `0` missing from a leading-dot number (`.5` → `0.5`)
fn normalize_number(text: &str) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{rest}"),
        _ if text.starts_with('.') => format!("0{text}"),
        _ => text.to_string(),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Cell text lexer
#[derive(Debug, Clone)]
pub struct Lexer {
    options: LexerOptions,
    /// Operators, longest first, for scanning
    scan_operators: Vec<String>,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new(LexerOptions::default())
    }
}

impl Lexer {
    /// Create a lexer recognizing the given operators and range functions
    pub fn new(options: LexerOptions) -> Self {
        let mut scan_operators: Vec<String> = options
            .operators
            .iter()
            .filter(|op| !op.is_empty())
            .cloned()
            .collect();
        scan_operators.sort_by(|a, b| b.len().cmp(&a.len()));

        Self {
            options,
            scan_operators,
        }
    }

    /// Split cell text into tokens
    ///
    /// # Example
    /// ```rust
    /// use gridcalc_formula::{Lexer, Token, TokenKind};
    ///
    /// let tokens = Lexer::default().tokenize("A1+5");
    /// assert_eq!(
    ///     tokens,
    ///     vec![
    ///         Token::new(TokenKind::MatrixReference, "A1"),
    ///         Token::new(TokenKind::Operator, "+"),
    ///         Token::new(TokenKind::Number, "5"),
    ///     ]
    /// );
    /// ```
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();

        for candidate in self.split_candidates(text) {
            let token = self.classify(candidate);

            // A reference followed by anything but an operator or unknown
            // text is really a label ("A1B2", "A1 5")
            if let Some(last) = tokens.last_mut() {
                if last.kind == TokenKind::MatrixReference
                    && token.kind != TokenKind::Operator
                    && token.kind != TokenKind::Unknown
                {
                    last.kind = TokenKind::Label;
                    last.value.push_str(&token.value);
                    continue;
                }
            }

            tokens.push(token);
        }

        tokens
    }

    /// Classify a single candidate substring
    pub fn classify(&self, candidate: &str) -> Token {
        let kind = CLASSIFICATION_RULES
            .iter()
            .find(|rule| (rule.matches)(self, candidate))
            .map_or(TokenKind::Unknown, |rule| rule.kind);

        match kind {
            TokenKind::Number => Token::new(kind, normalize_number(candidate)),
            _ => Token::new(kind, candidate),
        }
    }

    /// Cut text into maximal candidate substrings
    pub fn split_candidates<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut scanner = Scanner::new(text);
        scanner.skip_whitespace();
        if scanner.peek_char() == Some(FORMULA_MARKER) {
            scanner.advance();
        }

        let mut candidates = Vec::new();
        let mut operand_expected = true;

        loop {
            scanner.skip_whitespace();
            if scanner.is_at_end() {
                break;
            }

            let start = scanner.pos;
            self.scan_candidate(&mut scanner, operand_expected);
            let candidate = &text[start..scanner.pos];

            operand_expected = self.scan_operators.iter().any(|op| op == candidate);
            candidates.push(candidate);
        }

        candidates
    }

    fn scan_candidate(&self, scanner: &mut Scanner<'_>, operand_expected: bool) {
        let Some(c) = scanner.peek_char() else {
            return;
        };

        // A minus sign in operand position belongs to the number after it
        if c == '-' && operand_expected && scanner.number_starts_at(1) {
            scanner.advance();
            scanner.scan_number_or_word();
            return;
        }

        if let Some(op) = self
            .scan_operators
            .iter()
            .find(|op| scanner.rest().starts_with(op.as_str()))
        {
            scanner.pos += op.len();
            return;
        }

        if scanner.number_starts_at(0) {
            scanner.scan_number_or_word();
        } else if is_word_char(c)
            || (c == ALIAS_PREFIX && scanner.peek_char_at(1).map_or(false, is_word_char))
        {
            scanner.scan_word_or_call();
        } else {
            scanner.advance();
        }
    }
}

/// Character cursor over cell text
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn scan_number_or_word(&mut self) {
        self.skip_digits();

        if self.peek_char() == Some('.') && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit())
        {
            self.advance();
            self.skip_digits();
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            let digit_at = match self.peek_char_at(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_char_at(digit_at).map_or(false, |c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    self.advance();
                }
                self.skip_digits();
            }
        }

        // Digits glued to letters form one word ("12abc")
        self.skip_word_chars();
    }

    fn scan_word_or_call(&mut self) {
        if self.peek_char() == Some(ALIAS_PREFIX) {
            self.advance();
        }
        self.skip_word_chars();

        // A word directly followed by '(' runs through the closing ')'
        if self.peek_char() == Some('(') {
            if let Some(close) = self.rest().find(')') {
                self.pos += close + 1;
            }
        }
    }

    fn number_starts_at(&self, offset: usize) -> bool {
        match self.peek_char_at(offset) {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self
                .peek_char_at(offset + 1)
                .map_or(false, |c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_word_chars(&mut self) {
        while self.peek_char().map_or(false, is_word_char) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use super::TokenKind::*;

    fn lex(text: &str) -> Vec<(TokenKind, String)> {
        Lexer::default()
            .tokenize(text)
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect()
    }

    fn tok(kind: TokenKind, value: &str) -> (TokenKind, String) {
        (kind, value.to_string())
    }

    #[test]
    fn test_reference_plus_number() {
        assert_eq!(
            lex("A1+5"),
            vec![tok(MatrixReference, "A1"), tok(Operator, "+"), tok(Number, "5")]
        );
        assert_eq!(lex(" A1 +  5 "), lex("A1+5"));
    }

    #[test]
    fn test_formula_marker_is_dropped() {
        assert_eq!(
            lex("=A1+1"),
            vec![tok(MatrixReference, "A1"), tok(Operator, "+"), tok(Number, "1")]
        );
    }

    #[test]
    fn test_references() {
        assert_eq!(lex("AA300"), vec![tok(MatrixReference, "AA300")]);
        assert_eq!(lex("Z9"), vec![tok(MatrixReference, "Z9")]);
        // Too many letters or digits
        assert_eq!(lex("ABC1"), vec![tok(Label, "ABC1")]);
        assert_eq!(lex("A1000"), vec![tok(Label, "A1000")]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lex("42"), vec![tok(Number, "42")]);
        assert_eq!(lex("12.34"), vec![tok(Number, "12.34")]);
        assert_eq!(lex(".5"), vec![tok(Number, "0.5")]);
        assert_eq!(lex("1.23E4"), vec![tok(Number, "1.23E4")]);
        assert_eq!(lex("5e-3"), vec![tok(Number, "5e-3")]);
        assert_eq!(lex(".123E2"), vec![tok(Number, "0.123E2")]);
    }

    #[test]
    fn test_negative_numbers() {
        assert_eq!(lex("-5"), vec![tok(Number, "-5")]);
        assert_eq!(lex("-.5"), vec![tok(Number, "-0.5")]);
        assert_eq!(
            lex("2*-3"),
            vec![tok(Number, "2"), tok(Operator, "*"), tok(Number, "-3")]
        );
        // Binary minus stays an operator
        assert_eq!(
            lex("3-5"),
            vec![tok(Number, "3"), tok(Operator, "-"), tok(Number, "5")]
        );
        assert_eq!(
            lex("A1-5"),
            vec![tok(MatrixReference, "A1"), tok(Operator, "-"), tok(Number, "5")]
        );
    }

    #[test]
    fn test_formulas() {
        assert_eq!(lex("SUM(A1..A10)"), vec![tok(Formula, "SUM(A1..A10)")]);
        assert_eq!(lex("@AVER(B1..B3)"), vec![tok(Formula, "@AVER(B1..B3)")]);
        assert_eq!(
            lex("STDDEV(A1..C1)*2"),
            vec![
                tok(Formula, "STDDEV(A1..C1)"),
                tok(Operator, "*"),
                tok(Number, "2")
            ]
        );
        // Unknown keyword falls through to the label rule
        assert_eq!(lex("COUNT(A1..A2)"), vec![tok(Label, "COUNT(A1..A2)")]);
    }

    #[test]
    fn test_configured_functions_only() {
        let lexer = Lexer::new(LexerOptions {
            functions: vec![RangeFunction::Sum],
            ..LexerOptions::default()
        });
        assert_eq!(lexer.tokenize("SUM(A1..A2)")[0].kind, Formula);
        assert_eq!(lexer.tokenize("MAX(A1..A2)")[0].kind, Label);
    }

    #[test]
    fn test_labels_and_unknowns() {
        assert_eq!(lex("abc123"), vec![tok(Label, "abc123")]);
        assert_eq!(lex("12abc"), vec![tok(Label, "12abc")]);
        assert_eq!(lex("hello"), vec![tok(Unknown, "hello")]);
        assert_eq!(
            lex("(1+2)"),
            vec![
                tok(Unknown, "("),
                tok(Number, "1"),
                tok(Operator, "+"),
                tok(Number, "2"),
                tok(Unknown, ")")
            ]
        );
        assert!(lex("").is_empty());
        assert!(lex("   ").is_empty());
    }

    #[test]
    fn test_reference_merges_into_label() {
        assert_eq!(lex("A1B2"), vec![tok(Label, "A1B2")]);
        assert_eq!(lex("A1foo"), vec![tok(Label, "A1foo")]);
        assert_eq!(lex("A1 B2"), vec![tok(Label, "A1B2")]);
        assert_eq!(lex("A1 5"), vec![tok(Label, "A15")]);
        // Operators and unknown text do not merge
        assert_eq!(
            lex("A1 hello"),
            vec![tok(MatrixReference, "A1"), tok(Unknown, "hello")]
        );
    }

    #[test]
    fn test_merge_is_pairwise() {
        assert_eq!(
            lex("A1 B2 C3"),
            vec![tok(Label, "A1B2"), tok(MatrixReference, "C3")]
        );
        assert_eq!(lex("A1 B2 C3 D4"), vec![tok(Label, "A1B2"), tok(Label, "C3D4")]);
    }

    #[test]
    fn test_custom_operators() {
        let lexer = Lexer::new(LexerOptions {
            operators: vec!["+".into(), "^".into(), "**".into()],
            ..LexerOptions::default()
        });
        let kinds: Vec<_> = lexer.tokenize("2**3^A1").into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![Number, Operator, Number, Operator, MatrixReference]
        );
        // '-' is no longer an operator
        assert_eq!(lexer.tokenize("1 - 2")[1].kind, Unknown);
    }

    #[test]
    fn test_classify_order() {
        let lexer = Lexer::default();
        assert_eq!(lexer.classify("B7").kind, MatrixReference);
        assert_eq!(lexer.classify("MIN(A1..A3)").kind, Formula);
        assert_eq!(lexer.classify("-1.5").kind, Number);
        assert_eq!(lexer.classify("x1").kind, Label);
        assert_eq!(lexer.classify("/").kind, Operator);
        assert_eq!(lexer.classify("%").kind, Unknown);
    }

    #[test]
    fn test_split_range_call() {
        assert_eq!(
            split_range_call("@SUM(A1..B10)"),
            Some(("@SUM", "A1", "B10"))
        );
        assert_eq!(split_range_call("SUM(A1:B10)"), None);
    }
}
