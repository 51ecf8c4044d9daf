//! Tic-Tac-Toe board.

use serde::{Deserialize, Serialize};

use crate::board::{Cell, Seat};
use crate::error::{GameError, Result};

/// Every line that wins: rows, then columns, then diagonals.
///
/// Scan order decides which line is reported when a move completes two.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 board stored row-major, cells 0-8.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicTacToeBoard {
    cells: [Cell; TicTacToeBoard::CELLS],
}

impl TicTacToeBoard {
    /// Cells per row and column.
    pub const SIDE: usize = 3;
    /// Total number of cells.
    pub const CELLS: usize = 9;

    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell; Self::CELLS] {
        &self.cells
    }

    /// Cell at a 0-indexed position.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Places a mark on a 1-indexed cell (1-9). Returns the 0-indexed position.
    pub fn place(&mut self, cell_number: usize, seat: Seat) -> Result<usize> {
        let index = cell_number
            .checked_sub(1)
            .filter(|&i| i < Self::CELLS)
            .ok_or_else(|| {
                GameError::InvalidMove(format!("choose a number 1-{}", Self::CELLS))
            })?;

        if !self.cells[index].is_empty() {
            return Err(GameError::InvalidMove(format!(
                "cell {} is already taken",
                cell_number
            )));
        }

        self.cells[index] = Cell::Marked(seat);
        Ok(index)
    }

    /// First completed line in scan order, with its owner.
    pub fn winner(&self) -> Option<(Seat, [usize; 3])> {
        LINES.iter().find_map(|&line| {
            let [a, b, c] = line;
            match self.cells[a] {
                Cell::Marked(seat) if self.cells[b] == self.cells[a] && self.cells[c] == self.cells[a] => {
                    Some((seat, line))
                }
                _ => None,
            }
        })
    }

    /// Returns true if every cell is marked.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &[(usize, Seat)]) -> TicTacToeBoard {
        let mut board = TicTacToeBoard::new();
        for &(cell, seat) in marks {
            board.place(cell, seat).unwrap();
        }
        board
    }

    #[test]
    fn test_place_converts_to_zero_index() {
        let mut board = TicTacToeBoard::new();
        assert_eq!(board.place(1, Seat::A).unwrap(), 0);
        assert_eq!(board.place(9, Seat::B).unwrap(), 8);
        assert_eq!(board.get(0), Some(Cell::Marked(Seat::A)));
        assert_eq!(board.get(8), Some(Cell::Marked(Seat::B)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut board = TicTacToeBoard::new();
        assert!(matches!(board.place(0, Seat::A), Err(GameError::InvalidMove(_))));
        assert!(matches!(board.place(10, Seat::A), Err(GameError::InvalidMove(_))));
        assert_eq!(board, TicTacToeBoard::new());
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut board = board_from(&[(5, Seat::A)]);
        assert!(matches!(board.place(5, Seat::B), Err(GameError::InvalidMove(_))));
        assert_eq!(board.get(4), Some(Cell::Marked(Seat::A)));
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            let mut board = TicTacToeBoard::new();
            for &i in &line {
                board.place(i + 1, Seat::B).unwrap();
            }
            assert_eq!(board.winner(), Some((Seat::B, line)), "line {:?}", line);
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_from(&[(1, Seat::A), (2, Seat::A), (3, Seat::B)]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_first_line_in_scan_order_reported() {
        // Top row and left column both complete.
        let board = board_from(&[
            (1, Seat::A),
            (2, Seat::A),
            (3, Seat::A),
            (4, Seat::A),
            (7, Seat::A),
        ]);
        assert_eq!(board.winner(), Some((Seat::A, [0, 1, 2])));
    }

    #[test]
    fn test_full_board_without_line() {
        // A B A
        // A B B
        // B A A
        let board = board_from(&[
            (1, Seat::A),
            (2, Seat::B),
            (3, Seat::A),
            (4, Seat::A),
            (5, Seat::B),
            (6, Seat::B),
            (7, Seat::B),
            (8, Seat::A),
            (9, Seat::A),
        ]);
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
    }
}
