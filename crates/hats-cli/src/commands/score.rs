use std::error::Error;

use clap::Args;
use hats_core::{HatAssignment, PuzzleKind};
use hats_formula::Formula;
use hats_search::score_assignment;

use super::emit;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Formula text.
    pub formula: String,
    /// Comma separated hat colours, one per person.
    #[arg(long)]
    pub hats: String,
    /// Puzzle variant.
    #[arg(long, default_value = "ten")]
    pub puzzle: PuzzleKind,
}

pub fn run(args: &ScoreArgs) -> Result<(), Box<dyn Error>> {
    let config = args.puzzle.config();
    let formula = Formula::compile(&args.formula, &config)?;
    let assignment = HatAssignment::parse(&args.hats, &config)?;
    emit(&score_assignment(&formula, &assignment))
}
