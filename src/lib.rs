//! A minimax agent for playing the board game 'Connect 4' against a human
//!
//! The agent searches a fixed number of plies ahead with alpha-beta pruning
//! and scores the positions it cannot see past with a hand-authored table of
//! cell weights, chosen by difficulty.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{Board, Difficulty, Engine, EngineConfig, Side};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::new();
//! let mut engine = Engine::new(EngineConfig::default()).with_difficulty(Difficulty::Hard);
//!
//! let column = engine.best_move(&mut board, 5)?;
//! board.apply_move(column, Side::Machine)?;
//!
//! assert_eq!(column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod weights;

pub mod search;

pub mod game;


pub use board::{Board, Cell, MoveGuard, Side};
pub use error::{BoardError, MoveError, SearchError, WeightError};
pub use game::{Game, GameState};
pub use search::{evaluate, Engine, EngineConfig};
pub use weights::{Difficulty, WeightTable};

/// The width of the standard game board in tiles
pub const WIDTH: usize = 7;

/// The height of the standard game board in tiles
pub const HEIGHT: usize = 6;

/// Plies searched past each of the machine's candidate moves
pub const DEFAULT_DEPTH: usize = 5;

/// The value of a position the machine has won
pub const WIN_SCORE: i32 = 1_000_000;

// a line of 4 must fit on the standard board
const_assert!(WIDTH >= board::LINE_LENGTH || HEIGHT >= board::LINE_LENGTH);
// no heuristic score may be mistaken for a decided game
const_assert!(weights::MAX_TABLE_SUM < WIN_SCORE);
