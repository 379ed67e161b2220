//! Recursive-descent parser from lexemes to [`Expr`].
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor ('×' factor)*
//! factor := number | variable | '(' expr ')'
//! ```

use hats_core::{PuzzleConfig, VarRule};
use thiserror::Error;

use crate::ast::{BinOp, Expr};
use crate::token::{Lexeme, Token, TokenKind};

/// Structural failure while building the parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input ended where an operand was expected.
    #[error("unexpected end of formula")]
    UnexpectedEnd,
    /// A lexeme that cannot appear at this point.
    #[error("unexpected `{0}`")]
    Unexpected(String),
    /// `(` without its `)`.
    #[error("unclosed parenthesis")]
    UnclosedParenthesis,
    /// Input left over after a complete expression.
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
    /// Variable not present in the puzzle table.
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
}

pub(crate) fn parse(lexemes: &[Lexeme], config: &PuzzleConfig) -> Result<Expr, ParseError> {
    let mut parser = Parser {
        lexemes,
        pos: 0,
        config,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(lexeme) => Err(ParseError::TrailingInput(describe(lexeme))),
    }
}

struct Parser<'a> {
    lexemes: &'a [Lexeme],
    pos: usize,
    config: &'a PuzzleConfig,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Lexeme> {
        let lexeme = self.lexemes.get(self.pos)?;
        self.pos += 1;
        Some(lexeme)
    }

    /// Consumes the next lexeme if it is one of `ops`.
    fn operator(&mut self, ops: &[BinOp]) -> Option<BinOp> {
        let Some(Lexeme::Token(token)) = self.peek() else {
            return None;
        };
        if token.kind != TokenKind::Operator {
            return None;
        }
        let op = BinOp::from_symbol(&token.text).filter(|op| ops.contains(op))?;
        self.pos += 1;
        Some(op)
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.operator(&[BinOp::Add, BinOp::Sub]) {
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.factor()?;
        while let Some(op) = self.operator(&[BinOp::Mul]) {
            let rhs = self.factor()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        match self.next().ok_or(ParseError::UnexpectedEnd)? {
            Lexeme::Open => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Lexeme::Close) => Ok(inner),
                    Some(other) => Err(ParseError::Unexpected(describe(other))),
                    None => Err(ParseError::UnclosedParenthesis),
                }
            }
            Lexeme::Close => Err(ParseError::Unexpected(")".into())),
            Lexeme::Token(token) => self.operand(token),
        }
    }

    fn operand(&self, token: &Token) -> Result<Expr, ParseError> {
        match token.kind {
            TokenKind::Number => Ok(Expr::Number {
                value: reduce_literal(&token.text, self.config.base),
                literal: token.text.clone(),
            }),
            TokenKind::Variable => {
                let rule = resolve_variable(&token.text, self.config)
                    .ok_or_else(|| ParseError::UnknownVariable(token.text.clone()))?;
                Ok(Expr::Var {
                    name: token.text.clone(),
                    rule,
                })
            }
            TokenKind::Operator => Err(ParseError::Unexpected(token.text.clone())),
        }
    }
}

/// Maps variable text to its rule in the puzzle table.
pub(crate) fn resolve_variable(text: &str, config: &PuzzleConfig) -> Option<VarRule> {
    if let Some(rule) = config.variable(text) {
        return Some(rule);
    }
    let chars: Vec<char> = text.chars().collect();
    match chars.as_slice() {
        [prefix, '[', digit @ '1'..='9', ']'] => {
            let distance = u8::try_from(digit.to_digit(10)?).ok()?;
            config.bracket(*prefix).map(|family| family.rule(distance))
        }
        _ => None,
    }
}

/// Folds decimal digits modulo `base`, so literals of any length fit.
pub(crate) fn reduce_literal(digits: &str, base: u8) -> i64 {
    let base = i64::from(base.max(1));
    digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0, |acc, digit| (acc * 10 + i64::from(digit)) % base)
}

fn describe(lexeme: &Lexeme) -> String {
    match lexeme {
        Lexeme::Token(token) => token.text.clone(),
        Lexeme::Open => "(".into(),
        Lexeme::Close => ")".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::lex;

    fn parse_text(text: &str) -> Result<Expr, ParseError> {
        let config = PuzzleConfig::TEN;
        parse(&lex(text, &config).unwrap(), &config)
    }

    #[test]
    fn multiplication_binds_tighter() {
        let expr = parse_text("1+2×3").unwrap();
        let Expr::Binary { op, rhs, .. } = expr else {
            panic!("expected binary node");
        };
        assert_eq!(op, BinOp::Add);
        assert!(matches!(*rhs, Expr::Binary { op: BinOp::Mul, .. }));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = parse_text("9-3-1").unwrap();
        assert_eq!(expr.to_string(), "9 - 3 - 1");
        let Expr::Binary { lhs, .. } = expr else {
            panic!("expected binary node");
        };
        assert!(matches!(*lhs, Expr::Binary { op: BinOp::Sub, .. }));
    }

    #[test]
    fn display_keeps_required_parentheses_only() {
        assert_eq!(parse_text("(i+1)×2").unwrap().to_string(), "(i + 1) × 2");
        assert_eq!(parse_text("9-(3-1)").unwrap().to_string(), "9 - (3 - 1)");
        assert_eq!(parse_text("((i))+(l[2]×3)").unwrap().to_string(), "i + l[2] × 3");
    }

    #[test]
    fn brackets_resolve_to_signed_offsets() {
        let config = PuzzleConfig::TEN;
        assert_eq!(
            resolve_variable("r[4]", &config),
            Some(VarRule::Neighbor { offset: -4 })
        );
        assert_eq!(resolve_variable("other", &config), None);
    }

    #[test]
    fn structural_errors_are_reported() {
        assert_eq!(parse_text("(1+2"), Err(ParseError::UnclosedParenthesis));
        assert_eq!(parse_text("1+"), Err(ParseError::UnexpectedEnd));
        assert_eq!(parse_text("1)"), Err(ParseError::TrailingInput(")".into())));
    }

    #[test]
    fn long_literals_reduce_modulo_base() {
        assert_eq!(reduce_literal("99999999999999999999", 10), 9);
        assert_eq!(reduce_literal("1234567890123456789012", 2), 0);
        assert_eq!(reduce_literal("7", 10), 7);
        let expr = parse_text("99999999999999999999").unwrap();
        assert_eq!(
            expr,
            Expr::Number {
                value: 9,
                literal: "99999999999999999999".into(),
            }
        );
        assert_eq!(expr.to_string(), "99999999999999999999");
    }
}
