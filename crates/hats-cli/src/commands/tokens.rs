use std::error::Error;

use clap::Args;
use hats_core::PuzzleKind;
use hats_formula::Formula;
use serde::Serialize;

use super::emit;

#[derive(Args, Debug)]
pub struct TokensArgs {
    /// Formula text.
    pub formula: String,
    /// Puzzle variant.
    #[arg(long, default_value = "ten")]
    pub puzzle: PuzzleKind,
}

#[derive(Debug, Serialize)]
struct TokensReport<'a> {
    canonical: String,
    tokens: &'a [hats_formula::Token],
}

pub fn run(args: &TokensArgs) -> Result<(), Box<dyn Error>> {
    let formula = Formula::compile(&args.formula, &args.puzzle.config())?;
    emit(&TokensReport {
        canonical: formula.to_string(),
        tokens: formula.tokens(),
    })
}
