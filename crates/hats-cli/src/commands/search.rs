use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hats_core::PuzzleKind;
use hats_formula::Formula;
use hats_search::{run as run_search, search_batch, SearchOptions};
use tracing::debug;

use super::emit;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Formula text.
    pub formula: String,
    /// Puzzle variant.
    #[arg(long, default_value = "ten")]
    pub puzzle: PuzzleKind,
    /// YAML file with search options; flags below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Wall-clock budget for randomized search.
    #[arg(long)]
    pub budget_ms: Option<u64>,
    /// Master seed for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Cap on randomized trials.
    #[arg(long)]
    pub max_trials: Option<u64>,
    /// Repeat the search this many times and print a tally.
    #[arg(long)]
    pub runs: Option<u64>,
    /// Print only the array encoding of the verdict.
    #[arg(long)]
    pub wire: bool,
}

fn resolve_options(args: &SearchArgs) -> Result<SearchOptions, Box<dyn Error>> {
    let mut options = match &args.config {
        Some(path) => SearchOptions::from_yaml_path(path)?,
        None => SearchOptions::default(),
    };
    if let Some(budget_ms) = args.budget_ms {
        options.budget_ms = budget_ms;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if args.max_trials.is_some() {
        options.max_trials = args.max_trials;
    }
    options.validate()?;
    Ok(options)
}

pub fn run(args: &SearchArgs) -> Result<(), Box<dyn Error>> {
    let options = resolve_options(args)?;
    debug!(?options, "resolved search options");
    let formula = Formula::compile(&args.formula, &args.puzzle.config())?;
    if let Some(runs) = args.runs {
        return emit(&search_batch(&formula, &options, runs));
    }
    let report = run_search(&formula, &options);
    if args.wire {
        emit(&report.outcome.to_wire())
    } else {
        emit(&report)
    }
}
