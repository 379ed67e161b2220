//! Pure tree-walking evaluator.

use hats_core::PuzzleConfig;
use thiserror::Error;

use crate::ast::Expr;

/// Sentinel returned in place of a guess when evaluation fails.
///
/// Lies outside every puzzle's colour range, so it never matches a hat.
pub const ERROR: i64 = -1;

/// Inputs for evaluating one person's guess.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// Ordinal of the person guessing.
    pub person: usize,
    /// Hat colours of everyone, including the person guessing.
    pub hats: &'a [u8],
    /// Active puzzle.
    pub config: &'a PuzzleConfig,
}

impl<'a> EvaluationContext<'a> {
    /// Builds a context for `person`.
    pub fn new(person: usize, hats: &'a [u8], config: &'a PuzzleConfig) -> Self {
        Self {
            person,
            hats,
            config,
        }
    }
}

/// Failure while computing a guess.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Person index outside the circle.
    #[error("person {person} is outside a circle of {count}")]
    PersonOutOfRange {
        /// Requested person.
        person: usize,
        /// People in the puzzle.
        count: usize,
    },
    /// Assignment does not cover every person.
    #[error("assignment has {found} hats, expected {expected}")]
    AssignmentLength {
        /// People in the puzzle.
        expected: usize,
        /// Hats supplied.
        found: usize,
    },
    /// Variable could not be resolved against the assignment.
    #[error("variable `{0}` could not be resolved")]
    UnresolvedVariable(String),
}

/// Evaluates `expr` in the integers modulo the puzzle base.
///
/// Every leaf and every intermediate result is kept in `[0, base)`, which
/// agrees with reducing the exact integer result at the end.
pub fn evaluate(expr: &Expr, ctx: &EvaluationContext<'_>) -> Result<i64, EvalError> {
    let base = ctx.config.base;
    match expr {
        Expr::Number { value, .. } => Ok(i64::from(normalize(*value, base))),
        Expr::Var { name, rule } => rule
            .resolve(ctx.person, ctx.hats)
            .map(|value| i64::from(normalize(value, base)))
            .ok_or_else(|| EvalError::UnresolvedVariable(name.clone())),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = evaluate(lhs, ctx)?;
            let rhs = evaluate(rhs, ctx)?;
            Ok(op.apply(lhs, rhs, base))
        }
    }
}

/// Evaluates `expr` and reduces it into `[0, base)`.
pub fn evaluate_digit(expr: &Expr, ctx: &EvaluationContext<'_>) -> Result<u8, EvalError> {
    let count = ctx.config.person_count;
    if ctx.hats.len() != count {
        return Err(EvalError::AssignmentLength {
            expected: count,
            found: ctx.hats.len(),
        });
    }
    if ctx.person >= count {
        return Err(EvalError::PersonOutOfRange {
            person: ctx.person,
            count,
        });
    }
    let raw = evaluate(expr, ctx)?;
    Ok(normalize(raw, ctx.config.base))
}

/// `((v mod b) + b) mod b`.
pub fn normalize(value: i64, base: u8) -> u8 {
    // rem_euclid is non-negative and below `base`, which fits in u8.
    value.rem_euclid(i64::from(base.max(1))) as u8
}
