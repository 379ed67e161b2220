//! Puzzle configurations and their declarative variable tables.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HatsError};

/// How a named variable resolves against a hat assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum VarRule {
    /// The asking person's own ordinal.
    OwnIndex,
    /// Sum of every hat except the asking person's.
    SumOfOthers,
    /// Hat of the person `offset` places away, wrapping around the circle.
    Neighbor {
        /// Signed rotation offset relative to the asking person.
        offset: i64,
    },
}

impl VarRule {
    /// Resolves the rule for `person` against `hats`.
    ///
    /// Returns `None` when the person index or the resolved neighbour falls
    /// outside the assignment.
    pub fn resolve(&self, person: usize, hats: &[u8]) -> Option<i64> {
        let n = hats.len();
        if person >= n {
            return None;
        }
        match self {
            VarRule::OwnIndex => i64::try_from(person).ok(),
            VarRule::SumOfOthers => Some(
                hats.iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != person)
                    .map(|(_, hat)| i64::from(*hat))
                    .sum(),
            ),
            VarRule::Neighbor { offset } => {
                let n = i64::try_from(n).ok()?;
                let origin = i64::try_from(person).ok()?;
                let target = usize::try_from((origin + offset).rem_euclid(n)).ok()?;
                hats.get(target).map(|hat| i64::from(*hat))
            }
        }
    }
}

/// A bare-word variable such as `i`, `all` or `other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamedVariable {
    /// Literal spelling in formulas.
    pub name: &'static str,
    /// Resolution rule.
    pub rule: VarRule,
}

/// A bracketed neighbour family such as `l[k]` or `r[k]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketFamily {
    /// Leading letter of the construct.
    pub prefix: char,
    /// Direction multiplier applied to the bracket digit.
    pub direction: i64,
}

impl BracketFamily {
    /// Resolution rule for a bracket construct holding `distance`.
    pub fn rule(&self, distance: u8) -> VarRule {
        VarRule::Neighbor {
            offset: self.direction * i64::from(distance),
        }
    }
}

/// Strategy the search engine uses for a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// Enumerate every assignment; a clean verdict is a proof.
    Exhaustive,
    /// Time-boxed random sampling; a clean verdict is evidence only.
    Randomized,
}

/// Identifier for one of the supported puzzle variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PuzzleKind {
    /// Ten people, ten colours.
    Ten,
    /// Two people, two colours.
    Two,
}

impl PuzzleKind {
    /// Returns the static configuration for this variant.
    pub fn config(self) -> PuzzleConfig {
        match self {
            PuzzleKind::Ten => PuzzleConfig::TEN,
            PuzzleKind::Two => PuzzleConfig::TWO,
        }
    }
}

impl Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleKind::Ten => write!(f, "ten"),
            PuzzleKind::Two => write!(f, "two"),
        }
    }
}

impl FromStr for PuzzleKind {
    type Err = HatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ten" | "10" => Ok(PuzzleKind::Ten),
            "two" | "2" => Ok(PuzzleKind::Two),
            other => Err(HatsError::Config(
                ErrorInfo::new("unknown-puzzle", "unknown puzzle variant")
                    .with_context("value", other)
                    .with_hint("expected `ten` or `two`"),
            )),
        }
    }
}

const TEN_VARIABLES: &[NamedVariable] = &[
    NamedVariable {
        name: "all",
        rule: VarRule::SumOfOthers,
    },
    NamedVariable {
        name: "i",
        rule: VarRule::OwnIndex,
    },
];

const TEN_BRACKETS: &[BracketFamily] = &[
    BracketFamily {
        prefix: 'l',
        direction: 1,
    },
    BracketFamily {
        prefix: 'r',
        direction: -1,
    },
];

const TWO_VARIABLES: &[NamedVariable] = &[
    NamedVariable {
        name: "other",
        rule: VarRule::Neighbor { offset: 1 },
    },
    NamedVariable {
        name: "i",
        rule: VarRule::OwnIndex,
    },
];

/// Fixed description of a puzzle variant.
///
/// Named variables are listed longest first so scanners can apply them in
/// longest-match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PuzzleConfig {
    /// Variant identifier.
    pub kind: PuzzleKind,
    /// Number of people in the circle.
    pub person_count: usize,
    /// Number of hat colours; guesses are reduced modulo this value.
    pub base: u8,
    /// Bare-word variables.
    pub variables: &'static [NamedVariable],
    /// Bracketed neighbour families (empty when the variant has none).
    pub brackets: &'static [BracketFamily],
    /// Search strategy applied by the search engine.
    pub strategy: SearchStrategy,
}

impl PuzzleConfig {
    /// Ten people, base ten: `i`, `all`, `l[1..9]`, `r[1..9]`.
    pub const TEN: PuzzleConfig = PuzzleConfig {
        kind: PuzzleKind::Ten,
        person_count: 10,
        base: 10,
        variables: TEN_VARIABLES,
        brackets: TEN_BRACKETS,
        strategy: SearchStrategy::Randomized,
    };

    /// Two people, base two: `i`, `other`.
    pub const TWO: PuzzleConfig = PuzzleConfig {
        kind: PuzzleKind::Two,
        person_count: 2,
        base: 2,
        variables: TWO_VARIABLES,
        brackets: &[],
        strategy: SearchStrategy::Exhaustive,
    };

    /// Looks up a bare-word variable by name.
    pub fn variable(&self, name: &str) -> Option<VarRule> {
        self.variables
            .iter()
            .find(|var| var.name == name)
            .map(|var| var.rule)
    }

    /// Looks up a bracket family by its leading letter.
    pub fn bracket(&self, prefix: char) -> Option<&BracketFamily> {
        self.brackets.iter().find(|family| family.prefix == prefix)
    }

    /// Whether `c` is a digit legal in formulas for this variant.
    pub fn allows_digit(&self, c: char) -> bool {
        c.to_digit(10)
            .map(|digit| digit < u32::from(self.base))
            .unwrap_or(false)
    }

    /// Total number of hat assignments, or `None` if it overflows `u64`.
    pub fn assignment_space(&self) -> Option<u64> {
        let exponent = u32::try_from(self.person_count).ok()?;
        u64::from(self.base).checked_pow(exponent)
    }
}
