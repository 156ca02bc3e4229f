use anyhow::{anyhow, Result};

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::{BoardError, MoveError};
use crate::{HEIGHT, WIDTH};

/// The number of consecutive cells needed to win
pub const LINE_LENGTH: usize = 4;

// (row step, column step): horizontal, vertical, diagonal down-right, diagonal down-left
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// One of the two participants
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Human,
    Machine,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Human => Side::Machine,
            Side::Machine => Side::Human,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Human,
    Machine,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    /// The side occupying this cell, if any
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Side::Human),
            Cell::Machine => Some(Side::Machine),
        }
    }

    /// Text glyph used for rendering and for [`Board::from_rows`]
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'X',
            Cell::Machine => 'O',
        }
    }

    fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Human),
            'O' | 'o' => Some(Cell::Machine),
            _ => None,
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Cell::Human,
            Side::Machine => Cell::Machine,
        }
    }
}

/// A Connect 4 grid under gravity
///
/// # Notes
/// Cells are stored row by row, with row 0 at the top of the board, so a
/// piece dropped into an empty column lands in row `rows - 1`. Within every
/// column the occupied cells form one contiguous block resting on the bottom
/// row; the only mutators ([`apply_move`] and [`undo_last_in_column`]) keep
/// that invariant as long as undos are paired with the drops they reverse.
///
/// [`apply_move`]: Board::apply_move
/// [`undo_last_in_column`]: Board::undo_last_in_column
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    num_moves: usize,
}

impl Board {
    /// Creates an empty board of the standard 6x7 size
    pub fn new() -> Self {
        Self {
            rows: HEIGHT,
            cols: WIDTH,
            cells: vec![Cell::Empty; WIDTH * HEIGHT],
            num_moves: 0,
        }
    }

    /// Creates an empty board of the given size
    ///
    /// At least one dimension must be long enough to hold a line of 4.
    pub fn with_dimensions(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 || rows.max(cols) < LINE_LENGTH {
            return Err(BoardError::TooSmall { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            num_moves: 0,
        })
    }

    /// Creates a standard board by playing a string of 1-indexed columns,
    /// alternating sides starting with `first`
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Side) -> Result<Self> {
        let mut board = Self::new();
        let mut side = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    // abort if the position was already won
                    if board.is_win(Side::Human) || board.is_win(Side::Machine) {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    board.apply_move(column - 1, side)?;
                    side = side.other();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Parses a board drawn with `.` (empty), `X` (human) and `O` (machine),
    /// top row first. Whitespace inside a row is ignored.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|row| row.as_ref().chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        let cols = parsed.first().map_or(0, |row| row.len());
        let mut board = Self::with_dimensions(parsed.len(), cols)?;

        for (row, glyphs) in parsed.iter().enumerate() {
            if glyphs.len() != cols {
                return Err(BoardError::RaggedRow {
                    row,
                    found: glyphs.len(),
                    expected: cols,
                });
            }
            for (column, &glyph) in glyphs.iter().enumerate() {
                let cell = Cell::from_glyph(glyph).ok_or(BoardError::UnknownGlyph {
                    glyph,
                    row,
                    column,
                })?;
                board.cells[row * cols + column] = cell;
            }
        }

        // every occupied cell must rest on an occupied cell or the floor
        for column in 0..board.cols {
            for row in 0..board.rows - 1 {
                if !board.get(row, column).is_empty() && board.get(row + 1, column).is_empty() {
                    return Err(BoardError::FloatingPiece { row, column });
                }
            }
        }
        board.num_moves = board.cells.iter().filter(|c| !c.is_empty()).count();

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The number of pieces on the board
    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// The cell at `row` (0 is the top) and `column`
    ///
    /// # Panics
    /// Panics if the coordinates lie outside the board.
    pub fn get(&self, row: usize, column: usize) -> Cell {
        assert!(row < self.rows && column < self.cols);
        self.cells[row * self.cols + column]
    }

    /// Read-only view of the grid, one slice per row from the top down
    pub fn snapshot(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols)
    }

    pub fn is_legal_move(&self, column: usize) -> bool {
        column < self.cols && self.cells[column].is_empty()
    }

    /// Legal columns from left to right
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cols).filter(move |&column| self.is_legal_move(column))
    }

    /// Drops a piece for `side` into `column`, returning the row it landed in
    ///
    /// A full or out-of-range column leaves the board untouched.
    pub fn apply_move(&mut self, column: usize, side: Side) -> Result<usize, MoveError> {
        if column >= self.cols {
            return Err(MoveError::ColumnOutOfRange {
                column,
                width: self.cols,
            });
        }
        for row in (0..self.rows).rev() {
            let idx = row * self.cols + column;
            if self.cells[idx].is_empty() {
                self.cells[idx] = side.into();
                self.num_moves += 1;
                return Ok(row);
            }
        }
        Err(MoveError::ColumnFull { column })
    }

    /// Removes the topmost piece of `column`
    ///
    /// Only sound directly after a successful [`apply_move`](Board::apply_move)
    /// on the same column. Prefer [`play`](Board::play), which pairs the two.
    pub fn undo_last_in_column(&mut self, column: usize) {
        if column >= self.cols {
            return;
        }
        for row in 0..self.rows {
            let idx = row * self.cols + column;
            if !self.cells[idx].is_empty() {
                self.cells[idx] = Cell::Empty;
                self.num_moves -= 1;
                return;
            }
        }
    }

    /// Drops a piece and returns a guard that takes it back when dropped
    ///
    /// The guard derefs to the board, so the position with the move applied
    /// can be searched through it. The undo runs on every exit path, early
    /// returns and `break`s included.
    pub fn play(&mut self, column: usize, side: Side) -> Result<MoveGuard<'_>, MoveError> {
        let row = self.apply_move(column, side)?;
        Ok(MoveGuard {
            board: self,
            column,
            row,
        })
    }

    /// Checks every line of 4 on the board for one owned entirely by `side`
    pub fn is_win(&self, side: Side) -> bool {
        let cell = Cell::from(side);
        for row in 0..self.rows {
            for column in 0..self.cols {
                if self.cells[row * self.cols + column] != cell {
                    continue;
                }
                if DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| self.line_from(row, column, dr, dc, cell))
                {
                    return true;
                }
            }
        }
        false
    }

    // true if the LINE_LENGTH cells from (row, column) along (dr, dc) all lie
    // on the board and hold `cell`
    fn line_from(&self, row: usize, column: usize, dr: isize, dc: isize, cell: Cell) -> bool {
        (0..LINE_LENGTH as isize).all(|i| {
            let r = row as isize + dr * i;
            let c = column as isize + dc * i;
            r >= 0
                && r < self.rows as isize
                && c >= 0
                && c < self.cols as isize
                && self.cells[r as usize * self.cols + c as usize] == cell
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells[..self.cols].iter().all(|c| !c.is_empty())
    }

    /// Empties every cell, keeping the dimensions
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::Empty;
        }
        self.num_moves = 0;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.snapshot() {
            let line: Vec<String> = row.iter().map(|c| c.glyph().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (1..=self.cols).map(|c| c.to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}

/// A move held on the board until the guard goes out of scope
pub struct MoveGuard<'a> {
    board: &'a mut Board,
    column: usize,
    row: usize,
}

impl MoveGuard<'_> {
    pub fn column(&self) -> usize {
        self.column
    }

    /// The row the piece landed in
    pub fn row(&self) -> usize {
        self.row
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &*self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.board.undo_last_in_column(self.column);
    }
}
