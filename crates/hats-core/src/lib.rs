#![deny(missing_docs)]
#![doc = "Core types for the hat-puzzle rule checker: puzzle tables, hat assignments, seedable randomness and the shared error surface."]

pub mod assignment;
pub mod errors;
pub mod puzzle;
pub mod rng;

pub use assignment::HatAssignment;
pub use errors::{ErrorInfo, HatsError};
pub use puzzle::{BracketFamily, NamedVariable, PuzzleConfig, PuzzleKind, SearchStrategy, VarRule};
pub use rng::{derive_substream_seed, RngHandle};
