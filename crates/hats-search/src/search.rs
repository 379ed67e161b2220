use std::time::Instant;

use hats_core::{
    derive_substream_seed, ErrorInfo, HatAssignment, HatsError, PuzzleConfig, RngHandle,
    SearchStrategy,
};
use hats_formula::{Formula, ERROR};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SearchOptions;
use crate::score::has_correct_guesser;

/// Verdict of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "assignment", rename_all = "kebab-case")]
pub enum SearchOutcome {
    /// An assignment under which nobody guesses correctly.
    Counterexample(HatAssignment),
    /// Budget exhausted without a counterexample; carries a witness assignment.
    NoCounterexampleFound(HatAssignment),
}

impl SearchOutcome {
    /// Assignment carried by the verdict.
    pub fn assignment(&self) -> &HatAssignment {
        match self {
            SearchOutcome::Counterexample(assignment)
            | SearchOutcome::NoCounterexampleFound(assignment) => assignment,
        }
    }

    /// Whether a counterexample was found.
    pub fn is_counterexample(&self) -> bool {
        matches!(self, SearchOutcome::Counterexample(_))
    }

    /// Array encoding shared with the presentation layer.
    ///
    /// A counterexample is the bare assignment (length `n`); a clean verdict
    /// appends the error sentinel (length `n + 1`).
    pub fn to_wire(&self) -> Vec<i64> {
        let mut wire: Vec<i64> = self
            .assignment()
            .as_slice()
            .iter()
            .map(|hat| i64::from(*hat))
            .collect();
        if !self.is_counterexample() {
            wire.push(ERROR);
        }
        wire
    }

    /// Decodes the array encoding produced by [`SearchOutcome::to_wire`].
    pub fn from_wire(wire: &[i64], config: &PuzzleConfig) -> Result<Self, HatsError> {
        let n = config.person_count;
        let (hats, clean) = match wire.len() {
            len if len == n => (wire, false),
            len if len == n + 1 && wire[n] == ERROR => (&wire[..n], true),
            len => {
                return Err(HatsError::Wire(
                    ErrorInfo::new("wire-shape", "search outcome has an unexpected shape")
                        .with_context("length", len.to_string())
                        .with_context("person_count", n.to_string()),
                ))
            }
        };
        let hats = hats
            .iter()
            .map(|value| {
                u8::try_from(*value).map_err(|_| {
                    HatsError::Wire(
                        ErrorInfo::new("wire-value", "hat colour out of range")
                            .with_context("value", value.to_string()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let assignment = HatAssignment::new(hats, config)
            .map_err(|err| HatsError::Wire(err.info().clone()))?;
        Ok(if clean {
            SearchOutcome::NoCounterexampleFound(assignment)
        } else {
            SearchOutcome::Counterexample(assignment)
        })
    }
}

/// Outcome plus bookkeeping about how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Verdict.
    pub outcome: SearchOutcome,
    /// Strategy that produced the verdict.
    pub strategy: SearchStrategy,
    /// Assignments evaluated.
    pub trials: u64,
    /// Wall-clock time spent.
    pub elapsed_ms: u64,
    /// True only for a clean verdict over the full assignment space.
    pub proven: bool,
}

/// Searches `formula` with default options and an entropy-seeded RNG.
pub fn search(formula: &str, config: &PuzzleConfig) -> Result<SearchOutcome, HatsError> {
    let compiled = Formula::compile(formula, config)?;
    Ok(run(&compiled, &SearchOptions::default()).outcome)
}

/// Searches with an RNG built from `options.seed`.
pub fn run(formula: &Formula, options: &SearchOptions) -> SearchReport {
    let mut rng = RngHandle::from_optional_seed(options.seed);
    search_with(formula, options, &mut rng)
}

/// Searches with the strategy declared by the formula's puzzle.
pub fn search_with<R: Rng + ?Sized>(
    formula: &Formula,
    options: &SearchOptions,
    rng: &mut R,
) -> SearchReport {
    let report = match formula.config().strategy {
        SearchStrategy::Exhaustive => exhaustive(formula),
        SearchStrategy::Randomized => randomized(formula, options, rng),
    };
    info!(
        formula = %formula,
        strategy = ?report.strategy,
        trials = report.trials,
        elapsed_ms = report.elapsed_ms,
        counterexample = report.outcome.is_counterexample(),
        "search finished"
    );
    report
}

/// Enumerates every assignment in lexicographic order.
///
/// Stops at the first assignment without a correct guesser. A clean pass
/// reports the last enumerated assignment as witness.
pub fn exhaustive(formula: &Formula) -> SearchReport {
    let config = formula.config();
    let start = Instant::now();
    let space = config.assignment_space().unwrap_or(u64::MAX);
    let mut witness = HatAssignment::from_index(0, config);
    let mut trials = 0;
    for index in 0..space {
        let assignment = HatAssignment::from_index(index, config);
        trials += 1;
        if !has_correct_guesser(formula, assignment.as_slice()) {
            debug!(%assignment, "counterexample found");
            return SearchReport {
                outcome: SearchOutcome::Counterexample(assignment),
                strategy: SearchStrategy::Exhaustive,
                trials,
                elapsed_ms: elapsed_ms(start),
                proven: false,
            };
        }
        witness = assignment;
    }
    SearchReport {
        outcome: SearchOutcome::NoCounterexampleFound(witness),
        strategy: SearchStrategy::Exhaustive,
        trials,
        elapsed_ms: elapsed_ms(start),
        proven: true,
    }
}

/// Samples uniform assignments until a counterexample appears or the budget
/// (time, and trials when capped) runs out. At least one trial always runs.
pub fn randomized<R: Rng + ?Sized>(
    formula: &Formula,
    options: &SearchOptions,
    rng: &mut R,
) -> SearchReport {
    let config = formula.config();
    let budget = options.budget();
    if options.budget_ms == 0 && options.max_trials.is_none() {
        warn!("zero search budget; a single trial will run");
    }
    let start = Instant::now();
    let mut trials = 0u64;
    loop {
        let assignment = HatAssignment::random(config, rng);
        trials += 1;
        if !has_correct_guesser(formula, assignment.as_slice()) {
            debug!(%assignment, trials, "counterexample found");
            return SearchReport {
                outcome: SearchOutcome::Counterexample(assignment),
                strategy: SearchStrategy::Randomized,
                trials,
                elapsed_ms: elapsed_ms(start),
                proven: false,
            };
        }
        let capped = options.max_trials.is_some_and(|max| trials >= max);
        if capped || start.elapsed() >= budget {
            return SearchReport {
                outcome: SearchOutcome::NoCounterexampleFound(assignment),
                strategy: SearchStrategy::Randomized,
                trials,
                elapsed_ms: elapsed_ms(start),
                proven: false,
            };
        }
    }
}

/// Tally of repeated independent searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Master seed the per-run seeds were derived from.
    pub master_seed: u64,
    /// Searches executed.
    pub runs: u64,
    /// Searches that found a counterexample.
    pub counterexamples: u64,
    /// Searches that ended cleanly.
    pub clean: u64,
    /// First counterexample encountered, if any.
    pub first_counterexample: Option<HatAssignment>,
}

/// Runs `runs` independent searches, each seeded from a substream of the
/// master seed.
pub fn search_batch(formula: &Formula, options: &SearchOptions, runs: u64) -> BatchSummary {
    let master_seed = options
        .seed
        .unwrap_or_else(|| RngHandle::from_entropy().next_u64());
    let mut summary = BatchSummary {
        master_seed,
        runs,
        counterexamples: 0,
        clean: 0,
        first_counterexample: None,
    };
    for run_index in 0..runs {
        let mut rng = RngHandle::from_seed(derive_substream_seed(master_seed, run_index));
        match search_with(formula, options, &mut rng).outcome {
            SearchOutcome::Counterexample(assignment) => {
                summary.counterexamples += 1;
                summary.first_counterexample.get_or_insert(assignment);
            }
            SearchOutcome::NoCounterexampleFound(_) => summary.clean += 1,
        }
    }
    summary
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
