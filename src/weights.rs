//! Difficulty tiers and the positional weight tables they select

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

use crate::error::WeightError;
use crate::{HEIGHT, WIDTH, WIN_SCORE};

type Table = [[i32; WIDTH]; HEIGHT];

/// Column-biased weights, identical on every row
pub const EASY_WEIGHTS: Table = [
    [3, 4, 5, 6, 5, 4, 3],
    [3, 4, 5, 6, 5, 4, 3],
    [3, 4, 5, 6, 5, 4, 3],
    [3, 4, 5, 6, 5, 4, 3],
    [3, 4, 5, 6, 5, 4, 3],
    [3, 4, 5, 6, 5, 4, 3],
];

/// Flat outer ring with a raised centre
pub const MEDIUM_WEIGHTS: Table = [
    [3, 3, 3, 3, 3, 3, 3],
    [3, 4, 4, 4, 4, 4, 3],
    [3, 4, 5, 6, 5, 4, 3],
    [3, 4, 5, 6, 5, 4, 3],
    [3, 4, 4, 4, 4, 4, 3],
    [3, 3, 3, 3, 3, 3, 3],
];

/// Steep bias towards the centre of the board
pub const HARD_WEIGHTS: Table = [
    [3, 4, 5, 7, 5, 4, 3],
    [4, 6, 8, 10, 8, 6, 4],
    [5, 8, 11, 13, 11, 8, 5],
    [5, 8, 11, 13, 11, 8, 5],
    [4, 6, 8, 10, 8, 6, 4],
    [3, 4, 5, 7, 5, 4, 3],
];

const fn table_sum(table: &Table) -> i32 {
    let mut sum = 0;
    let mut row = 0;
    while row < HEIGHT {
        let mut column = 0;
        while column < WIDTH {
            sum += table[row][column];
            column += 1;
        }
        row += 1;
    }
    sum
}

/// The largest magnitude any built-in table can give a position
pub const MAX_TABLE_SUM: i32 = {
    let easy = table_sum(&EASY_WEIGHTS);
    let medium = table_sum(&MEDIUM_WEIGHTS);
    let hard = table_sum(&HARD_WEIGHTS);
    let max = if easy > medium { easy } else { medium };
    if max > hard {
        max
    } else {
        hard
    }
};

/// How strongly the engine favours central cells
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The 1-based tier number shown to players
    pub fn tier(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn weights(self) -> WeightTable {
        WeightTable::from_table(match self {
            Difficulty::Easy => &EASY_WEIGHTS,
            Difficulty::Medium => &MEDIUM_WEIGHTS,
            Difficulty::Hard => &HARD_WEIGHTS,
        })
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "easy" | "e" => Ok(Difficulty::Easy),
            "2" | "medium" | "m" => Ok(Difficulty::Medium),
            "3" | "hard" | "h" => Ok(Difficulty::Hard),
            other => Err(anyhow!("unknown difficulty '{}', expected 1-3", other)),
        }
    }
}

/// A read-only grid of non-negative cell values, laid out like a [`Board`]
/// (row 0 at the top)
///
/// [`Board`]: crate::board::Board
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct WeightTable {
    rows: usize,
    cols: usize,
    weights: Vec<i32>,
}

/// A board filled by one side scores the whole table, which must not reach a decided game's score
///
/// `None` stands for a sum that overflowed.
fn check_sum(sum: Option<i64>) -> Result<(), WeightError> {
    let sum = sum.unwrap_or(i64::MAX);
    if sum >= WIN_SCORE as i64 {
        return Err(WeightError::TooLarge { sum });
    }
    Ok(())
}

impl WeightTable {
    fn from_table(table: &Table) -> Self {
        Self {
            rows: HEIGHT,
            cols: WIDTH,
            weights: table.iter().flat_map(|row| row.iter().copied()).collect(),
        }
    }

    /// Builds a table for a custom board size
    pub fn from_rows(rows: &[Vec<i32>]) -> Result<Self, WeightError> {
        let cols = rows.first().map_or(0, |row| row.len());
        if cols == 0 {
            return Err(WeightError::Empty);
        }

        let mut weights = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(WeightError::RaggedRow {
                    row,
                    found: values.len(),
                    expected: cols,
                });
            }
            for (column, &value) in values.iter().enumerate() {
                if value < 0 {
                    return Err(WeightError::Negative { value, row, column });
                }
                weights.push(value);
            }
        }

        check_sum(
            weights
                .iter()
                .try_fold(0i64, |sum, &weight| sum.checked_add(weight as i64)),
        )?;
        Ok(Self {
            rows: rows.len(),
            cols,
            weights,
        })
    }

    /// A table giving every cell the same weight
    pub fn uniform(rows: usize, cols: usize, weight: u16) -> Result<Self, WeightError> {
        let cells = rows.checked_mul(cols);
        if cells == Some(0) {
            return Err(WeightError::Empty);
        }
        let sum = cells
            .and_then(|cells| i64::try_from(cells).ok())
            .and_then(|cells| cells.checked_mul(weight as i64));
        check_sum(sum)?;

        Ok(Self {
            rows,
            cols,
            weights: vec![weight as i32; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, column: usize) -> i32 {
        self.weights[row * self.cols + column]
    }

    pub(crate) fn as_slice(&self) -> &[i32] {
        &self.weights
    }
}

impl From<Difficulty> for WeightTable {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.weights()
    }
}
