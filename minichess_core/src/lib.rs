//! Rules engine and alpha-beta opponent for 6x5 mini chess.
//!
//! `logic` holds the board, move generation, check detection and the game
//! session state machine. `engine` holds the evaluator and the search.

pub mod engine;
pub mod error;
pub mod logic;

pub use error::{FenError, GameError};
