use hats_core::HatAssignment;
use hats_formula::Formula;
use serde::{Deserialize, Serialize};

/// Every person's guess for one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentScore {
    /// Assignment that was scored.
    pub assignment: HatAssignment,
    /// Guess per person; the error sentinel marks failed evaluations.
    pub guesses: Vec<i64>,
    /// People whose guess matched their own hat.
    pub correct: Vec<usize>,
}

impl AssignmentScore {
    /// True when nobody guessed correctly.
    pub fn is_counterexample(&self) -> bool {
        self.correct.is_empty()
    }
}

/// Evaluates every person's guess for `assignment`.
pub fn score_assignment(formula: &Formula, assignment: &HatAssignment) -> AssignmentScore {
    let hats = assignment.as_slice();
    let guesses: Vec<i64> = (0..hats.len())
        .map(|person| formula.guess(hats, person))
        .collect();
    let correct = guesses
        .iter()
        .zip(hats)
        .enumerate()
        .filter(|(_, (guess, hat))| **guess == i64::from(**hat))
        .map(|(person, _)| person)
        .collect();
    AssignmentScore {
        assignment: assignment.clone(),
        guesses,
        correct,
    }
}

/// Whether at least one person guesses their own hat. Stops at the first hit.
pub fn has_correct_guesser(formula: &Formula, hats: &[u8]) -> bool {
    hats.iter()
        .enumerate()
        .any(|(person, hat)| formula.guess(hats, person) == i64::from(*hat))
}
