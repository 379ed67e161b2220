use std::error::Error;

use clap::Args;
use hats_core::{HatAssignment, PuzzleKind};
use hats_formula::Formula;
use serde_json::json;

use super::emit;

#[derive(Args, Debug)]
pub struct GuessArgs {
    /// Formula text.
    pub formula: String,
    /// Comma separated hat colours, one per person.
    #[arg(long)]
    pub hats: String,
    /// Person whose guess to compute.
    #[arg(long)]
    pub person: usize,
    /// Puzzle variant.
    #[arg(long, default_value = "ten")]
    pub puzzle: PuzzleKind,
}

pub fn run(args: &GuessArgs) -> Result<(), Box<dyn Error>> {
    let config = args.puzzle.config();
    let formula = Formula::compile(&args.formula, &config)?;
    let assignment = HatAssignment::parse(&args.hats, &config)?;
    let guess = formula.guess(assignment.as_slice(), args.person);
    emit(&json!({
        "person": args.person,
        "guess": guess,
        "hat": assignment.hat(args.person),
    }))
}
