//! Grammar validation: the gate every formula passes before evaluation.
//!
//! Checks run in a fixed order and the first failure wins: emptiness,
//! parenthesis structure, character whitelist, bracket content, presence of an
//! operand, and finally the token-sequence grammar.

use hats_core::PuzzleConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::token::{self, is_operator, starts_with, Lexeme, Token, TokenKind};

/// Maximum number of tokens a formula may contain.
pub const MAX_TOKENS: usize = 12;

/// Stand-in for a nested group or a multi-letter variable while scanning.
const PLACEHOLDER: char = '#';

/// Reason a formula was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "kebab-case")]
pub enum ValidationError {
    /// Nothing but whitespace.
    #[error("formula is empty")]
    Empty,
    /// A `)` without a matching `(`, or an unclosed `(`.
    #[error("unmatched parenthesis")]
    UnbalancedParentheses,
    /// `()` with nothing inside.
    #[error("empty parentheses")]
    EmptyParentheses,
    /// A group holding nothing but operators.
    #[error("parentheses contain only operators")]
    OperatorOnlyParentheses,
    /// A group opening with an operator.
    #[error("parentheses cannot start with an operator")]
    LeadingOperatorInParentheses,
    /// A group closing with an operator.
    #[error("parentheses cannot end with an operator")]
    TrailingOperatorInParentheses,
    /// Characters outside the puzzle's whitelist.
    #[error("invalid characters: {found}")]
    InvalidCharacters {
        /// Offending characters in order of first appearance.
        found: String,
    },
    /// Bracket syntax that is not `l[..]` / `r[..]`.
    #[error("malformed bracket near `{fragment}`")]
    MalformedBracket {
        /// Text around the problem.
        fragment: String,
    },
    /// Bracket holding anything other than a single digit 1-9.
    #[error("invalid bracket content `{content}`: expected a single digit from 1 to 9")]
    InvalidBracketContent {
        /// Text found between the brackets.
        content: String,
    },
    /// No number or variable at all.
    #[error("formula needs at least one number or variable")]
    NoOperand,
    /// Token budget exceeded.
    #[error("too many tokens: {count} (maximum {max})")]
    TooManyTokens {
        /// Tokens found.
        count: usize,
        /// Allowed maximum.
        max: usize,
    },
    /// First token is an operator.
    #[error("formula must start with a number or variable")]
    LeadingOperator,
    /// Last token is an operator.
    #[error("formula must end with a number or variable")]
    TrailingOperator,
    /// Two operators back to back.
    #[error("two operators in a row: `{first}` followed by `{second}`")]
    ConsecutiveOperators {
        /// First operator.
        first: String,
        /// Second operator.
        second: String,
    },
    /// Two operands touching without an operator.
    #[error("missing operator between `{left}` and `{right}`")]
    MissingOperator {
        /// Left operand.
        left: String,
        /// Right operand.
        right: String,
    },
    /// Operator lacking an operand on one side.
    #[error("operator `{operator}` needs a number or variable on both sides")]
    DanglingOperator {
        /// The operator.
        operator: String,
    },
}

impl ValidationError {
    /// Stable kebab-case identifier for the error category.
    pub fn category(&self) -> &'static str {
        match self {
            ValidationError::Empty => "empty",
            ValidationError::UnbalancedParentheses => "unbalanced-parentheses",
            ValidationError::EmptyParentheses => "empty-parentheses",
            ValidationError::OperatorOnlyParentheses => "operator-only-parentheses",
            ValidationError::LeadingOperatorInParentheses => "leading-operator-in-parentheses",
            ValidationError::TrailingOperatorInParentheses => "trailing-operator-in-parentheses",
            ValidationError::InvalidCharacters { .. } => "invalid-characters",
            ValidationError::MalformedBracket { .. } => "malformed-bracket",
            ValidationError::InvalidBracketContent { .. } => "invalid-bracket-content",
            ValidationError::NoOperand => "no-operand",
            ValidationError::TooManyTokens { .. } => "too-many-tokens",
            ValidationError::LeadingOperator => "leading-operator",
            ValidationError::TrailingOperator => "trailing-operator",
            ValidationError::ConsecutiveOperators { .. } => "consecutive-operators",
            ValidationError::MissingOperator { .. } => "missing-operator",
            ValidationError::DanglingOperator { .. } => "dangling-operator",
        }
    }
}

/// Outcome handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the formula passed every check.
    pub is_valid: bool,
    /// Message for display; empty when valid.
    pub error: String,
    /// Category of the failure, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,
}

impl ValidationResult {
    /// Result for an accepted formula.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: String::new(),
            category: None,
        }
    }
}

impl From<Result<Vec<Token>, ValidationError>> for ValidationResult {
    fn from(result: Result<Vec<Token>, ValidationError>) -> Self {
        match result {
            Ok(_) => Self::valid(),
            Err(err) => Self {
                is_valid: false,
                error: err.to_string(),
                category: Some(err.category().to_string()),
            },
        }
    }
}

/// Validates a raw formula for `config`.
pub fn validate(formula: &str, config: &PuzzleConfig) -> ValidationResult {
    check(formula, config).into()
}

/// Validates a raw formula and returns its tokens on success.
pub fn check(formula: &str, config: &PuzzleConfig) -> Result<Vec<Token>, ValidationError> {
    check_lexemes(formula, config).map(|lexemes| token::tokens_of(&lexemes))
}

/// Validates a raw formula and returns the full lexeme stream, parentheses
/// included, ready for the parser.
pub(crate) fn check_lexemes(
    formula: &str,
    config: &PuzzleConfig,
) -> Result<Vec<Lexeme>, ValidationError> {
    if formula.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    let compact = compact(formula);
    let chars: Vec<char> = compact.chars().collect();

    check_parentheses(&chars)?;
    check_charset(&compact, config)?;
    check_brackets(&mask_words(&chars, config), config)?;
    if !has_operand(&compact, config) {
        return Err(ValidationError::NoOperand);
    }

    // Whitelisted input with well-formed brackets always tokenizes.
    let lexemes = token::lex(&compact, config).map_err(|err| {
        ValidationError::InvalidCharacters {
            found: err.ch.to_string(),
        }
    })?;
    check_tokens(&token::tokens_of(&lexemes))?;
    Ok(lexemes)
}

/// Strips every whitespace character.
pub fn compact(formula: &str) -> String {
    formula.chars().filter(|c| !c.is_whitespace()).collect()
}

fn check_parentheses(chars: &[char]) -> Result<(), ValidationError> {
    let mut open = Vec::new();
    for (idx, c) in chars.iter().enumerate() {
        match c {
            '(' => open.push(idx),
            ')' => {
                let start = open.pop().ok_or(ValidationError::UnbalancedParentheses)?;
                check_group(&top_level(&chars[start + 1..idx]))?;
            }
            _ => {}
        }
    }
    if open.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::UnbalancedParentheses)
    }
}

/// Content of a group with nested groups collapsed to one placeholder.
fn top_level(inner: &[char]) -> Vec<char> {
    let mut depth = 0usize;
    let mut out = Vec::with_capacity(inner.len());
    for c in inner {
        match c {
            '(' => {
                if depth == 0 {
                    out.push(PLACEHOLDER);
                }
                depth += 1;
            }
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 => out.push(*c),
            _ => {}
        }
    }
    out
}

fn check_group(content: &[char]) -> Result<(), ValidationError> {
    let (Some(first), Some(last)) = (content.first(), content.last()) else {
        return Err(ValidationError::EmptyParentheses);
    };
    if content.iter().all(|c| is_operator(*c)) {
        return Err(ValidationError::OperatorOnlyParentheses);
    }
    if is_operator(*first) {
        return Err(ValidationError::LeadingOperatorInParentheses);
    }
    if is_operator(*last) {
        return Err(ValidationError::TrailingOperatorInParentheses);
    }
    Ok(())
}

fn is_whitelisted(c: char, config: &PuzzleConfig) -> bool {
    if config.allows_digit(c) || c == '(' || c == ')' || is_operator(c) {
        return true;
    }
    if !config.brackets.is_empty() && (c == '[' || c == ']' || config.bracket(c).is_some()) {
        return true;
    }
    config
        .variables
        .iter()
        .any(|var| var.name.chars().count() == 1 && var.name.starts_with(c))
}

fn check_charset(compact: &str, config: &PuzzleConfig) -> Result<(), ValidationError> {
    let mut remaining = compact.to_string();
    for var in config.variables.iter().filter(|var| var.name.len() > 1) {
        remaining = remaining.replace(var.name, "");
    }
    let mut found = String::new();
    for c in remaining.chars() {
        if !is_whitelisted(c, config) && !found.contains(c) {
            found.push(c);
        }
    }
    if found.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidCharacters { found })
    }
}

/// Replaces multi-letter variables with a placeholder so their letters are
/// not mistaken for bracket prefixes.
fn mask_words(chars: &[char], config: &PuzzleConfig) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len());
    let mut pos = 0;
    'scan: while pos < chars.len() {
        for var in config.variables.iter().filter(|var| var.name.len() > 1) {
            if starts_with(&chars[pos..], var.name) {
                out.push(PLACEHOLDER);
                pos += var.name.chars().count();
                continue 'scan;
            }
        }
        out.push(chars[pos]);
        pos += 1;
    }
    out
}

fn check_brackets(chars: &[char], config: &PuzzleConfig) -> Result<(), ValidationError> {
    let mut pos = 0;
    while pos < chars.len() {
        let c = chars[pos];
        if config.bracket(c).is_some() {
            if chars.get(pos + 1) != Some(&'[') {
                return Err(ValidationError::MalformedBracket {
                    fragment: chars[pos..(pos + 2).min(chars.len())].iter().collect(),
                });
            }
            let Some(offset) = chars[pos + 2..].iter().position(|c| *c == ']') else {
                return Err(ValidationError::MalformedBracket {
                    fragment: chars[pos..].iter().collect(),
                });
            };
            let close = pos + 2 + offset;
            let content = &chars[pos + 2..close];
            if !matches!(content, ['1'..='9']) {
                return Err(ValidationError::InvalidBracketContent {
                    content: content.iter().collect(),
                });
            }
            pos = close + 1;
            continue;
        }
        if c == '[' || c == ']' {
            return Err(ValidationError::MalformedBracket {
                fragment: c.to_string(),
            });
        }
        pos += 1;
    }
    Ok(())
}

fn has_operand(compact: &str, config: &PuzzleConfig) -> bool {
    compact.chars().any(|c| c.is_ascii_digit())
        || config.variables.iter().any(|var| compact.contains(var.name))
}

fn check_tokens(tokens: &[Token]) -> Result<(), ValidationError> {
    if tokens.len() > MAX_TOKENS {
        return Err(ValidationError::TooManyTokens {
            count: tokens.len(),
            max: MAX_TOKENS,
        });
    }
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Err(ValidationError::NoOperand);
    };
    if !first.is_operand() {
        return Err(ValidationError::LeadingOperator);
    }
    if !last.is_operand() {
        return Err(ValidationError::TrailingOperator);
    }
    for pair in tokens.windows(2) {
        if pair[0].kind == TokenKind::Operator && pair[1].kind == TokenKind::Operator {
            return Err(ValidationError::ConsecutiveOperators {
                first: pair[0].text.clone(),
                second: pair[1].text.clone(),
            });
        }
    }
    for pair in tokens.windows(2) {
        if pair[0].is_operand() && pair[1].is_operand() {
            return Err(ValidationError::MissingOperator {
                left: pair[0].text.clone(),
                right: pair[1].text.clone(),
            });
        }
    }
    for (idx, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Operator {
            continue;
        }
        let before = idx.checked_sub(1).and_then(|prev| tokens.get(prev));
        let after = tokens.get(idx + 1);
        if !before.is_some_and(Token::is_operand) || !after.is_some_and(Token::is_operand) {
            return Err(ValidationError::DanglingOperator {
                operator: token.text.clone(),
            });
        }
    }
    Ok(())
}
