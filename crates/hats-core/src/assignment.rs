//! Hat assignments: one colour per person, immutable once built.

use std::fmt::{self, Display};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HatsError};
use crate::puzzle::PuzzleConfig;

/// Ordered hat colours, one per person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HatAssignment(Vec<u8>);

impl HatAssignment {
    /// Builds an assignment after checking its length and colour range.
    pub fn new(hats: Vec<u8>, config: &PuzzleConfig) -> Result<Self, HatsError> {
        if hats.len() != config.person_count {
            return Err(HatsError::Config(
                ErrorInfo::new("assignment-length", "assignment length does not match puzzle")
                    .with_context("expected", config.person_count.to_string())
                    .with_context("found", hats.len().to_string()),
            ));
        }
        if let Some((person, hat)) = hats
            .iter()
            .enumerate()
            .find(|(_, hat)| **hat >= config.base)
        {
            return Err(HatsError::Config(
                ErrorInfo::new("assignment-range", "hat colour outside puzzle base")
                    .with_context("person", person.to_string())
                    .with_context("hat", hat.to_string())
                    .with_context("base", config.base.to_string()),
            ));
        }
        Ok(Self(hats))
    }

    /// Parses a comma separated list such as `0,1`.
    pub fn parse(text: &str, config: &PuzzleConfig) -> Result<Self, HatsError> {
        let hats = text
            .split(',')
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u8>().map_err(|err| {
                    HatsError::Config(
                        ErrorInfo::new("assignment-parse", err.to_string())
                            .with_context("value", part),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(hats, config)
    }

    /// Returns the `index`-th assignment in lexicographic order, person 0
    /// being the most significant digit.
    pub fn from_index(mut index: u64, config: &PuzzleConfig) -> Self {
        let base = u64::from(config.base);
        let mut hats = vec![0u8; config.person_count];
        for slot in hats.iter_mut().rev() {
            *slot = (index % base) as u8;
            index /= base;
        }
        Self(hats)
    }

    /// Draws an independent uniform colour for every person.
    pub fn random<R: Rng + ?Sized>(config: &PuzzleConfig, rng: &mut R) -> Self {
        let hats = (0..config.person_count)
            .map(|_| rng.gen_range(0..config.base))
            .collect();
        Self(hats)
    }

    /// Returns the hat colours as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of people covered by the assignment.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the assignment is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hat colour worn by `person`.
    pub fn hat(&self, person: usize) -> Option<u8> {
        self.0.get(person).copied()
    }

    /// Consumes the assignment and returns the raw colours.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Display for HatAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, hat) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{hat}")?;
        }
        write!(f, "]")
    }
}
