//! Connect Four board.
//!
//! Row 0 is the top of the board; pieces fall towards row 5. Win detection
//! rescans the whole board after every move.

use serde::{Deserialize, Serialize};

use crate::board::{Cell, Seat};
use crate::error::{GameError, Result};

/// Scan directions as `(row step, column step)`: horizontal, vertical,
/// diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// 6x7 gravity board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectFourBoard {
    rows: [[Cell; ConnectFourBoard::COLS]; ConnectFourBoard::ROWS],
}

impl ConnectFourBoard {
    /// Number of rows.
    pub const ROWS: usize = 6;
    /// Number of columns.
    pub const COLS: usize = 7;
    /// Pieces in a row needed to win.
    pub const CONNECT: usize = 4;

    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// All rows, top first.
    pub fn rows(&self) -> &[[Cell; Self::COLS]; Self::ROWS] {
        &self.rows
    }

    /// Cell at a 0-indexed `(row, column)`.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns true if the top cell of a 0-indexed column is taken.
    pub fn is_column_full(&self, col: usize) -> bool {
        !self.rows[0][col].is_empty()
    }

    /// Lowest empty row of a 0-indexed column, scanning from the bottom up.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        (0..Self::ROWS).rev().find(|&row| self.rows[row][col].is_empty())
    }

    /// Drops a piece into a 1-indexed column (1-7). Returns where it landed.
    pub fn drop_piece(&mut self, column: usize, seat: Seat) -> Result<(usize, usize)> {
        let col = column
            .checked_sub(1)
            .filter(|&c| c < Self::COLS)
            .ok_or_else(|| GameError::InvalidMove(format!("choose a column 1-{}", Self::COLS)))?;

        if self.is_column_full(col) {
            return Err(GameError::InvalidMove(format!("column {} is full", column)));
        }

        let row = self
            .lowest_empty_row(col)
            .ok_or_else(|| GameError::InvalidMove(format!("column {} is full", column)))?;

        self.rows[row][col] = Cell::Marked(seat);
        Ok((row, col))
    }

    /// First run of four found, with its owner.
    ///
    /// Directions are scanned in the order of `DIRECTIONS`; within a
    /// direction, start cells go row by row, left to right.
    pub fn winner(&self) -> Option<(Seat, [(usize, usize); Self::CONNECT])> {
        DIRECTIONS
            .iter()
            .find_map(|&(dr, dc)| self.scan_direction(dr, dc))
    }

    fn scan_direction(&self, dr: isize, dc: isize) -> Option<(Seat, [(usize, usize); Self::CONNECT])> {
        let span = Self::CONNECT as isize - 1;
        // Bound the start cells so the whole run stays on the board.
        let rows = 0..(Self::ROWS as isize - dr * span);
        let cols = if dc < 0 {
            span..Self::COLS as isize
        } else {
            0..(Self::COLS as isize - dc * span)
        };

        for row in rows {
            for col in cols.clone() {
                let run: [(usize, usize); Self::CONNECT] = std::array::from_fn(|k| {
                    let k = k as isize;
                    ((row + dr * k) as usize, (col + dc * k) as usize)
                });

                let (r0, c0) = run[0];
                if let Cell::Marked(seat) = self.rows[r0][c0] {
                    if run[1..].iter().all(|&(r, c)| self.rows[r][c] == Cell::Marked(seat)) {
                        return Some((seat, run));
                    }
                }
            }
        }
        None
    }

    /// Returns true if the top row has no empty cell.
    pub fn is_full(&self) -> bool {
        self.rows[0].iter().all(|c| !c.is_empty())
    }
}
