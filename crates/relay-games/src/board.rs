//! Board primitives shared by both games.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::connect_four::ConnectFourBoard;
use crate::error::Result;
use crate::tictactoe::TicTacToeBoard;

/// Which game a session is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    /// 3x3 Tic-Tac-Toe.
    TicTacToe,
    /// 6x7 Connect Four.
    ConnectFour,
}

impl GameKind {
    /// The 1-indexed move numbers a player may submit (cells or columns).
    pub fn move_range(self) -> RangeInclusive<usize> {
        match self {
            GameKind::TicTacToe => 1..=TicTacToeBoard::CELLS,
            GameKind::ConnectFour => 1..=ConnectFourBoard::COLS,
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic Tac Toe",
            GameKind::ConnectFour => "Connect Four",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Side of the board. `A` is always the initiator and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    /// The other seat.
    pub fn opponent(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }
}

/// Content of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Marked(Seat),
}

impl Cell {
    /// Returns true if no mark has been placed.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The seat owning this cell, if any.
    pub fn seat(self) -> Option<Seat> {
        match self {
            Cell::Empty => None,
            Cell::Marked(seat) => Some(seat),
        }
    }
}

impl From<Seat> for Cell {
    fn from(seat: Seat) -> Self {
        Cell::Marked(seat)
    }
}

/// Board of a running session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameBoard {
    TicTacToe(TicTacToeBoard),
    ConnectFour(ConnectFourBoard),
}

impl GameBoard {
    /// Creates an empty board for the given game.
    pub fn new(kind: GameKind) -> Self {
        match kind {
            GameKind::TicTacToe => GameBoard::TicTacToe(TicTacToeBoard::new()),
            GameKind::ConnectFour => GameBoard::ConnectFour(ConnectFourBoard::new()),
        }
    }

    /// Which game this board belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            GameBoard::TicTacToe(_) => GameKind::TicTacToe,
            GameBoard::ConnectFour(_) => GameKind::ConnectFour,
        }
    }

    /// Places `seat`'s mark for a 1-indexed cell (Tic-Tac-Toe) or column
    /// (Connect Four). Returns the `(row, column)` that was filled.
    pub fn place(&mut self, position: usize, seat: Seat) -> Result<(usize, usize)> {
        match self {
            GameBoard::TicTacToe(board) => {
                let index = board.place(position, seat)?;
                Ok((index / TicTacToeBoard::SIDE, index % TicTacToeBoard::SIDE))
            }
            GameBoard::ConnectFour(board) => board.drop_piece(position, seat),
        }
    }

    /// The winning seat and its line as `(row, column)` pairs.
    pub fn winner(&self) -> Option<(Seat, Vec<(usize, usize)>)> {
        match self {
            GameBoard::TicTacToe(board) => board.winner().map(|(seat, line)| {
                let cells = line
                    .iter()
                    .map(|&i| (i / TicTacToeBoard::SIDE, i % TicTacToeBoard::SIDE))
                    .collect();
                (seat, cells)
            }),
            GameBoard::ConnectFour(board) => {
                board.winner().map(|(seat, line)| (seat, line.to_vec()))
            }
        }
    }

    /// Returns true when no further mark can be placed.
    pub fn is_full(&self) -> bool {
        match self {
            GameBoard::TicTacToe(board) => board.is_full(),
            GameBoard::ConnectFour(board) => board.is_full(),
        }
    }

    /// Returns true when no mark has been placed yet.
    pub fn is_fresh(&self) -> bool {
        self.rows().iter().flatten().all(|c| c.is_empty())
    }

    /// Board contents as rows, top row first.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        match self {
            GameBoard::TicTacToe(board) => board
                .cells()
                .chunks(TicTacToeBoard::SIDE)
                .map(<[Cell]>::to_vec)
                .collect(),
            GameBoard::ConnectFour(board) => board.rows().iter().map(|r| r.to_vec()).collect(),
        }
    }
}
