use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    guess::{self, GuessArgs},
    score::{self, ScoreArgs},
    search::{self, SearchArgs},
    tokens::{self, TokensArgs},
    validate::{self, ValidateArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "hats", about = "Hat-puzzle guessing rule checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a formula against the puzzle grammar.
    Validate(ValidateArgs),
    /// Print the token sequence of a valid formula.
    Tokens(TokensArgs),
    /// Compute one person's guess for a hat assignment.
    Guess(GuessArgs),
    /// Show every person's guess for a hat assignment.
    Score(ScoreArgs),
    /// Search for an assignment where nobody guesses correctly.
    Search(SearchArgs),
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => validate::run(&args),
        Command::Tokens(args) => tokens::run(&args),
        Command::Guess(args) => guess::run(&args),
        Command::Score(args) => score::run(&args),
        Command::Search(args) => search::run(&args),
    }
}
