//! Parse tree for validated formulas.

use std::fmt::{self, Display};

use hats_core::VarRule;
use serde::{Deserialize, Serialize};

use crate::token::TIMES;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `×`
    Mul,
}

impl BinOp {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul => 2,
        }
    }

    /// Maps an operator character to its operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            "×" => Some(BinOp::Mul),
            _ => None,
        }
    }

    /// Applies the operator in the ring of integers modulo `base`.
    ///
    /// Operands must already lie in `[0, base)`; the result does too.
    pub fn apply(self, lhs: i64, rhs: i64, base: u8) -> i64 {
        let raw = match self {
            BinOp::Add => lhs + rhs,
            BinOp::Sub => lhs - rhs,
            BinOp::Mul => lhs * rhs,
        };
        raw.rem_euclid(i64::from(base.max(1)))
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "{TIMES}"),
        }
    }
}

/// Expression node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum Expr {
    /// Integer literal, stored reduced modulo the puzzle base.
    Number {
        /// Literal reduced into `[0, base)`.
        value: i64,
        /// Digits as written.
        literal: String,
    },
    /// Variable resolved against the evaluation context.
    Var {
        /// Spelling in the source formula.
        name: String,
        /// Resolution rule from the puzzle table.
        rule: VarRule,
    },
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Builds a binary node.
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    fn precedence(&self) -> Option<u8> {
        match self {
            Expr::Binary { op, .. } => Some(op.precedence()),
            _ => None,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number { literal, .. } => write!(f, "{literal}"),
            Expr::Var { name, .. } => write!(f, "{name}"),
            Expr::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                let wrap_lhs = lhs.precedence().is_some_and(|p| p < prec);
                let wrap_rhs = rhs
                    .precedence()
                    .is_some_and(|p| p < prec || (p == prec && *op == BinOp::Sub));
                write_operand(f, lhs, wrap_lhs)?;
                write!(f, " {op} ")?;
                write_operand(f, rhs, wrap_rhs)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}
