//! An agent to choose the machine's moves
//!
//! The engine runs a depth-limited minimax search over the position graph.
//! Leaves that are not decided by a win or a full board are scored by a
//! positional weight table: the sum of the machine's cell weights minus the
//! sum of the human's.

use log::{debug, info};
use rayon::prelude::*;

use crate::board::{Board, Cell, Side};
use crate::error::SearchError;
use crate::weights::{Difficulty, WeightTable};
use crate::{DEFAULT_DEPTH, WIN_SCORE};

/// The value of a position the machine has lost
pub const LOSS_SCORE: i32 = -WIN_SCORE;
/// The value of a full board with no winner
pub const DRAW_SCORE: i32 = 0;

/// Search settings fixed for the lifetime of an [`Engine`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct EngineConfig {
    /// Plies searched after the machine's candidate move
    pub depth: usize,
    /// Alpha-beta cutoffs. Disabling them gives the plain minimax result, only slower
    pub pruning: bool,
    /// Split the top-level columns across the rayon thread pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            pruning: true,
            parallel: false,
        }
    }
}

impl EngineConfig {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Scores a position from the machine's point of view using `weights`
///
/// Empty cells count for nothing, so the empty board scores 0 under any table.
pub fn evaluate(board: &Board, weights: &WeightTable) -> Result<i32, SearchError> {
    check_dimensions(board, weights)?;
    Ok(score_cells(board, weights))
}

fn check_dimensions(board: &Board, weights: &WeightTable) -> Result<(), SearchError> {
    if board.rows() != weights.rows() || board.cols() != weights.cols() {
        return Err(SearchError::DimensionMismatch {
            table_rows: weights.rows(),
            table_cols: weights.cols(),
            board_rows: board.rows(),
            board_cols: board.cols(),
        });
    }
    Ok(())
}

// assumes matching dimensions
fn score_cells(board: &Board, weights: &WeightTable) -> i32 {
    board
        .snapshot()
        .flatten()
        .zip(weights.as_slice())
        .map(|(cell, &weight)| match cell {
            Cell::Machine => weight,
            Cell::Human => -weight,
            Cell::Empty => 0,
        })
        .sum()
}

/// One search over one board, with the weight table threaded through explicitly
pub(crate) struct Search<'w> {
    weights: &'w WeightTable,
    pruning: bool,
    pub(crate) nodes: usize,
}

impl<'w> Search<'w> {
    pub(crate) fn new(weights: &'w WeightTable, pruning: bool) -> Self {
        Self {
            weights,
            pruning,
            nodes: 0,
        }
    }

    /// Minimax with alpha-beta pruning
    ///
    /// Decided positions take precedence over the depth limit: a human line
    /// of 4 scores [`LOSS_SCORE`], then a machine line scores [`WIN_SCORE`],
    /// then a full board scores [`DRAW_SCORE`]. Only then does an exhausted
    /// depth fall back to the weight table.
    pub(crate) fn minimax(
        &mut self,
        board: &mut Board,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if board.is_win(Side::Human) {
            return LOSS_SCORE;
        }
        if board.is_win(Side::Machine) {
            return WIN_SCORE;
        }
        if board.is_full() {
            return DRAW_SCORE;
        }
        if depth == 0 {
            return score_cells(board, self.weights);
        }

        let side = if maximizing { Side::Machine } else { Side::Human };
        // unreachable by any real score
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for column in 0..board.cols() {
            let score = match board.play(column, side) {
                Ok(mut next) => self.minimax(&mut next, depth - 1, !maximizing, alpha, beta),
                Err(_) => continue,
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            // the opponent already has a better option elsewhere
            if self.pruning && beta <= alpha {
                break;
            }
        }
        best
    }

    /// The maximizing level unrolled to remember which column won.
    /// Ties go to the leftmost column.
    fn root(&mut self, board: &mut Board, depth: usize) -> Option<(usize, i32)> {
        let mut best: Option<(usize, i32)> = None;
        let mut alpha = i32::MIN;

        for column in 0..board.cols() {
            let score = match board.play(column, Side::Machine) {
                Ok(mut next) => self.minimax(&mut next, depth, false, alpha, i32::MAX),
                Err(_) => continue,
            };
            // a score at or below alpha is only an upper bound
            if self.pruning && score <= alpha {
                debug!("column {}: at most {}", column, score);
            } else {
                debug!("column {}: {}", column, score);
            }

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
            }
            if self.pruning {
                alpha = alpha.max(score);
            }
        }
        best
    }

    /// Exact minimax value of a single machine move, searched with a full window
    fn score_move(&mut self, board: &mut Board, column: usize, depth: usize) -> Option<i32> {
        let mut next = board.play(column, Side::Machine).ok()?;
        Some(self.minimax(&mut next, depth, false, i32::MIN, i32::MAX))
    }
}

/// An agent to play Connect 4 as [`Side::Machine`]
///
/// # Notes
/// The board is searched in place: every candidate move is applied, searched
/// and taken back before the next one is tried, so the board passed to
/// [`best_move`](Engine::best_move) comes back cell-for-cell unchanged.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    weights: WeightTable,

    /// The number of nodes searched by this `Engine` so far (for diagnostics only)
    pub node_count: usize,
}

impl Engine {
    /// Creates an engine using the [`Difficulty::default`] weights
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            weights: Difficulty::default().weights(),
            node_count: 0,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.set_difficulty(difficulty);
        self
    }

    /// Selects the weight table of a difficulty tier
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.weights = difficulty.weights();
    }

    /// Uses a custom weight table, e.g. for a non-standard board size
    pub fn set_weights(&mut self, weights: WeightTable) {
        self.weights = weights;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Scores `board` with this engine's weight table
    pub fn evaluate(&self, board: &Board) -> Result<i32, SearchError> {
        evaluate(board, &self.weights)
    }

    /// Finds the machine's best column, searching `depth` plies past each candidate
    ///
    /// Returns [`SearchError::NoLegalMove`] on a full board.
    pub fn best_move(&mut self, board: &mut Board, depth: usize) -> Result<usize, SearchError> {
        if self.config.parallel {
            return self.best_move_parallel(board, depth);
        }
        check_dimensions(board, &self.weights)?;

        let mut search = Search::new(&self.weights, self.config.pruning);
        let best = search.root(board, depth);
        self.node_count += search.nodes;

        let (column, score) = best.ok_or(SearchError::NoLegalMove)?;
        info!("best move {} (score {}, {} nodes)", column, score, search.nodes);
        Ok(column)
    }

    /// [`best_move`](Engine::best_move) with one rayon task per legal column
    ///
    /// Each task searches its own copy of the board, so `board` is only read.
    /// The chosen column is the same as the sequential search's.
    pub fn best_move_parallel(
        &mut self,
        board: &Board,
        depth: usize,
    ) -> Result<usize, SearchError> {
        let scored = self.score_moves(board, depth)?;

        let mut best: Option<(usize, i32)> = None;
        for &(column, score) in scored.iter() {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
            }
        }

        let (column, score) = best.ok_or(SearchError::NoLegalMove)?;
        info!("best move {} (score {}, parallel)", column, score);
        Ok(column)
    }

    /// The exact minimax value of every legal column, left to right
    pub fn score_moves(
        &mut self,
        board: &Board,
        depth: usize,
    ) -> Result<Vec<(usize, i32)>, SearchError> {
        check_dimensions(board, &self.weights)?;

        let weights = &self.weights;
        let pruning = self.config.pruning;
        let columns: Vec<usize> = board.legal_moves().collect();

        let scored: Vec<(usize, i32, usize)> = columns
            .par_iter()
            .filter_map(|&column| {
                let mut board = board.clone();
                let mut search = Search::new(weights, pruning);
                let score = search.score_move(&mut board, column, depth)?;
                Some((column, score, search.nodes))
            })
            .collect();

        self.node_count += scored.iter().map(|&(_, _, nodes)| nodes).sum::<usize>();
        for &(column, score, _) in scored.iter() {
            debug!("column {}: {}", column, score);
        }

        Ok(scored
            .into_iter()
            .map(|(column, score, _)| (column, score))
            .collect())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
