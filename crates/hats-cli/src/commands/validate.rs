use std::error::Error;

use clap::Args;
use hats_core::PuzzleKind;
use hats_formula::validate;

use super::emit;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Formula text, e.g. "i - all".
    pub formula: String,
    /// Puzzle variant.
    #[arg(long, default_value = "ten")]
    pub puzzle: PuzzleKind,
}

pub fn run(args: &ValidateArgs) -> Result<(), Box<dyn Error>> {
    let result = validate(&args.formula, &args.puzzle.config());
    emit(&result)?;
    if !result.is_valid {
        return Err(result.error.into());
    }
    Ok(())
}
