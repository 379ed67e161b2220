#![deny(missing_docs)]

//! Counterexample search for hat-puzzle guessing formulas.
//!
//! Small puzzles are enumerated exhaustively and a clean result is a proof.
//! Large puzzles are sampled at random under a wall-clock budget and a clean
//! result is only evidence.

/// Search options and YAML loading.
pub mod config;
/// Per-assignment scoring.
pub mod score;
/// Strategies, verdicts and the wire encoding.
pub mod search;

pub use config::SearchOptions;
pub use score::{has_correct_guesser, score_assignment, AssignmentScore};
pub use search::{
    exhaustive, randomized, run, search, search_batch, search_with, BatchSummary, SearchOutcome,
    SearchReport,
};
