//! Error kinds reported by the board and the search engine
//!
//! None of these are fatal: every one of them is an expected, local result
//! that the caller inspects and recovers from.

/// A rejected column drop
///
/// `column` is reported in the numbering the caller used: 0-based from
/// [`Board`](crate::board::Board), 1-based from [`Game`](crate::game::Game).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Invalid move, column {column} out of range for a board {width} columns wide")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },
}

/// The search was asked for a move on a board with no empty column
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal move remains, the board is full")]
    NoLegalMove,

    #[error("weight table is {table_rows}x{table_cols} but the board is {board_rows}x{board_cols}")]
    DimensionMismatch {
        table_rows: usize,
        table_cols: usize,
        board_rows: usize,
        board_cols: usize,
    },
}

/// A board that could not be constructed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("a {rows}x{cols} board cannot hold a line of 4")]
    TooSmall { rows: usize, cols: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown cell '{glyph}' at row {row}, column {column}")]
    UnknownGlyph { glyph: char, row: usize, column: usize },

    #[error("piece at row {row}, column {column} has an empty cell beneath it")]
    FloatingPiece { row: usize, column: usize },
}

/// A custom weight table that could not be constructed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeightError {
    #[error("weight table has no cells")]
    Empty,

    #[error("row {row} has {found} weights, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("weight {value} at row {row}, column {column} is negative")]
    Negative { value: i32, row: usize, column: usize },

    #[error("weights sum to {sum}, which must stay below the win score")]
    TooLarge { sum: i64 },
}
