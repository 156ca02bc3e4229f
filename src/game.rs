//! Turn-taking between a human and the engine

use anyhow::{anyhow, Result};

use crate::board::{Board, Side};
use crate::error::MoveError;
use crate::search::Engine;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    HumanWin,
    MachineWin,
    Draw,
}

impl GameState {
    pub fn is_over(self) -> bool {
        match self {
            GameState::Playing => false,
            _ => true,
        }
    }
}

/// A game in progress
///
/// The outcome is re-derived from the board after every half-move: a line of
/// 4 for the side that just moved wins, otherwise a full board is a draw.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    engine: Engine,
    first: Side,
    to_move: Side,
    state: GameState,
}

impl Game {
    /// Starts a standard 6x7 game. The engine's weights stay fixed until the game is dropped
    pub fn new(engine: Engine, first: Side) -> Self {
        Self::with_board(Board::new(), engine, first)
    }

    /// Starts a game on an existing (usually empty) board
    pub fn with_board(board: Board, engine: Engine, first: Side) -> Self {
        let mut game = Self {
            board,
            engine,
            first,
            to_move: first,
            state: GameState::Playing,
        };
        game.state = game.outcome();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Plays the human's move in a 1-indexed column
    ///
    /// An out-of-range or full column is returned as a [`MoveError`] (with the
    /// 1-indexed column) and the game carries on unchanged.
    pub fn play_human(&mut self, column_one_indexed: usize) -> Result<GameState> {
        self.check_turn(Side::Human)?;

        let width = self.board.cols();
        if column_one_indexed < 1 || column_one_indexed > width {
            return Err(MoveError::ColumnOutOfRange {
                column: column_one_indexed,
                width,
            }
            .into());
        }
        if self
            .board
            .apply_move(column_one_indexed - 1, Side::Human)
            .is_err()
        {
            return Err(MoveError::ColumnFull {
                column: column_one_indexed,
            }
            .into());
        }

        Ok(self.finish_half_move())
    }

    /// Lets the engine choose and play its move, returning the 0-indexed column
    pub fn play_machine(&mut self) -> Result<(usize, GameState)> {
        self.check_turn(Side::Machine)?;

        let depth = self.engine.config().depth;
        let column = self.engine.best_move(&mut self.board, depth)?;
        self.board.apply_move(column, Side::Machine)?;

        Ok((column, self.finish_half_move()))
    }

    /// Clears the board for a new game with the same engine and turn order
    pub fn reset(&mut self) {
        self.board.clear();
        self.to_move = self.first;
        self.state = GameState::Playing;
    }

    fn check_turn(&self, side: Side) -> Result<()> {
        if self.state.is_over() {
            return Err(anyhow!("The game is over ({:?})", self.state));
        }
        if self.to_move != side {
            return Err(anyhow!("It is not the {:?} side's turn", side));
        }
        Ok(())
    }

    fn finish_half_move(&mut self) -> GameState {
        self.to_move = self.to_move.other();
        self.state = self.outcome();
        self.state
    }

    fn outcome(&self) -> GameState {
        if self.board.is_win(Side::Human) {
            GameState::HumanWin
        } else if self.board.is_win(Side::Machine) {
            GameState::MachineWin
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        }
    }
}
