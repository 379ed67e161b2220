pub mod guess;
pub mod score;
pub mod search;
pub mod tokens;
pub mod validate;

use std::error::Error;

use serde::Serialize;

/// Prints `value` as pretty JSON on stdout.
pub fn emit<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
