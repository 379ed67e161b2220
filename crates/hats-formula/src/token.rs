//! Left-to-right, longest-match tokenizer.

use hats_core::PuzzleConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Multiplication sign accepted in formulas.
pub const TIMES: char = '×';

/// Returns true for `+`, `-` and `×`.
pub fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | TIMES)
}

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// A run of decimal digits.
    Number,
    /// A named or bracketed variable.
    Variable,
    /// `+`, `-` or `×`.
    Operator,
}

/// A typed token with its literal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Token classification.
    pub kind: TokenKind,
    /// Literal text as written in the formula.
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Whether the token is a number or variable.
    pub fn is_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Number | TokenKind::Variable)
    }
}

/// Character the tokenizer could not classify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected character `{ch}` at position {position}")]
pub struct TokenizeError {
    /// Offending character.
    pub ch: char,
    /// Character offset within the scanned text.
    pub position: usize,
}

/// Token stream item including the structural parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lexeme {
    Token(Token),
    Open,
    Close,
}

/// Splits a whitespace-free formula into tokens.
///
/// Parentheses are structural and are not emitted.
pub fn tokenize(formula: &str, config: &PuzzleConfig) -> Result<Vec<Token>, TokenizeError> {
    Ok(tokens_of(&lex(formula, config)?))
}

/// Grammar tokens of a lexeme stream, parentheses dropped.
pub(crate) fn tokens_of(lexemes: &[Lexeme]) -> Vec<Token> {
    lexemes
        .iter()
        .filter_map(|lexeme| match lexeme {
            Lexeme::Token(token) => Some(token.clone()),
            Lexeme::Open | Lexeme::Close => None,
        })
        .collect()
}

pub(crate) fn lex(formula: &str, config: &PuzzleConfig) -> Result<Vec<Lexeme>, TokenizeError> {
    let chars: Vec<char> = formula.chars().collect();
    let mut lexemes = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        let rest = &chars[pos..];
        if let Some(name) = match_word(rest, config) {
            lexemes.push(Lexeme::Token(Token::new(TokenKind::Variable, name)));
            pos += name.chars().count();
            continue;
        }
        if let Some(text) = match_bracket(rest, config) {
            lexemes.push(Lexeme::Token(Token::new(TokenKind::Variable, text)));
            pos += 4;
            continue;
        }
        let c = chars[pos];
        if c.is_ascii_digit() {
            let run: String = rest.iter().take_while(|d| d.is_ascii_digit()).collect();
            pos += run.len();
            lexemes.push(Lexeme::Token(Token::new(TokenKind::Number, run)));
            continue;
        }
        let lexeme = match c {
            '(' => Lexeme::Open,
            ')' => Lexeme::Close,
            c if is_operator(c) => Lexeme::Token(Token::new(TokenKind::Operator, c.to_string())),
            ch => return Err(TokenizeError { ch, position: pos }),
        };
        lexemes.push(lexeme);
        pos += 1;
    }
    Ok(lexemes)
}

/// Longest named variable that prefixes `rest`.
fn match_word(rest: &[char], config: &PuzzleConfig) -> Option<&'static str> {
    config
        .variables
        .iter()
        .map(|var| var.name)
        .filter(|name| starts_with(rest, name))
        .max_by_key(|name| name.len())
}

/// Well-formed `p[d]` construct with `d` in 1-9.
fn match_bracket(rest: &[char], config: &PuzzleConfig) -> Option<String> {
    match rest {
        [prefix, '[', digit @ '1'..='9', ']', ..] if config.bracket(*prefix).is_some() => {
            Some(format!("{prefix}[{digit}]"))
        }
        _ => None,
    }
}

pub(crate) fn starts_with(rest: &[char], word: &str) -> bool {
    let mut idx = 0;
    for expected in word.chars() {
        match rest.get(idx) {
            Some(c) if *c == expected => idx += 1,
            _ => return false,
        }
    }
    true
}
