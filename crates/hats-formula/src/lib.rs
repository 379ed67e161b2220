#![deny(missing_docs)]

//! Guessing-formula language for the hat puzzle.
//!
//! Raw text flows through [`validate`] (which tokenizes as its last step),
//! is parsed once into an [`Expr`], and is then evaluated per person by
//! [`Formula::guess`].

/// Parse tree types.
pub mod ast;
/// Tree-walking evaluator and the error sentinel.
pub mod eval;
/// Recursive-descent parser.
pub mod parser;
/// Tokenizer.
pub mod token;
/// Grammar validator.
pub mod validate;

use std::fmt::{self, Display};

use hats_core::{ErrorInfo, HatsError, PuzzleConfig};
use tracing::trace;

pub use ast::{BinOp, Expr};
pub use eval::{EvalError, EvaluationContext, ERROR};
pub use parser::ParseError;
pub use token::{tokenize, Token, TokenKind, TokenizeError};
pub use validate::{validate, ValidationError, ValidationResult, MAX_TOKENS};

impl From<ValidationError> for HatsError {
    fn from(err: ValidationError) -> Self {
        HatsError::Formula(ErrorInfo::new(err.category(), err.to_string()))
    }
}

impl From<ParseError> for HatsError {
    fn from(err: ParseError) -> Self {
        HatsError::Formula(ErrorInfo::new("parse", err.to_string()))
    }
}

impl From<EvalError> for HatsError {
    fn from(err: EvalError) -> Self {
        HatsError::Evaluation(ErrorInfo::new("evaluation", err.to_string()))
    }
}

/// A validated, parsed formula bound to a puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    source: String,
    tokens: Vec<Token>,
    expr: Expr,
    config: PuzzleConfig,
}

impl Formula {
    /// Validates and parses `source` for `config`.
    pub fn compile(source: &str, config: &PuzzleConfig) -> Result<Self, HatsError> {
        let lexemes = validate::check_lexemes(source, config)
            .map_err(|err| HatsError::from(err).with_formula(source))?;
        let expr = parser::parse(&lexemes, config)
            .map_err(|err| HatsError::from(err).with_formula(source))?;
        let tokens = token::tokens_of(&lexemes);
        Ok(Self {
            source: source.to_string(),
            tokens,
            expr,
            config: *config,
        })
    }

    /// The text the formula was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Tokens in scan order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parse tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Puzzle the formula was validated against.
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Guess for the person described by `ctx`.
    pub fn try_guess(&self, ctx: &EvaluationContext<'_>) -> Result<u8, EvalError> {
        eval::evaluate_digit(&self.expr, ctx)
    }

    /// Guess for `person`, or [`ERROR`] if it cannot be computed.
    pub fn guess(&self, hats: &[u8], person: usize) -> i64 {
        let ctx = EvaluationContext::new(person, hats, &self.config);
        match self.try_guess(&ctx) {
            Ok(digit) => i64::from(digit),
            Err(err) => {
                trace!(formula = %self.source, person, %err, "guess evaluation failed");
                ERROR
            }
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

trait WithFormula {
    fn with_formula(self, source: &str) -> Self;
}

impl WithFormula for HatsError {
    fn with_formula(self, source: &str) -> Self {
        match self {
            HatsError::Formula(info) => HatsError::Formula(info.with_context("formula", source)),
            other => other,
        }
    }
}

/// One-shot evaluation of `formula` for `person`.
///
/// Returns a digit in `[0, base)`, or [`ERROR`] when the formula does not
/// compile or cannot be evaluated for this assignment.
pub fn evaluate_guess(formula: &str, config: &PuzzleConfig, hats: &[u8], person: usize) -> i64 {
    match Formula::compile(formula, config) {
        Ok(compiled) => compiled.guess(hats, person),
        Err(err) => {
            trace!(formula, %err, "formula rejected before evaluation");
            ERROR
        }
    }
}
