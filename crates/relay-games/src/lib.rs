//! Turn-based chat games for the relay.
//!
//! This crate owns the only stateful logic of the relay: two-player
//! Tic-Tac-Toe and Connect Four matches keyed by room. Everything here is
//! in-memory and process-local; a restart forgets every match.
//!
//! - `GameRegistry` - one active session per room, move validation, idle eviction
//! - `TicTacToeBoard` / `ConnectFourBoard` - board geometry and win detection
//! - `IdleSweeper` - background task evicting idle sessions on a fixed interval
//!
//! # Example
//!
//! ```
//! use relay_games::{GameKind, GameRegistry, MoveOutcome};
//!
//! let registry = GameRegistry::default();
//! registry.start_game("room-1", GameKind::TicTacToe, "alice", "bob").unwrap();
//!
//! for (actor, cell) in [("alice", 1), ("bob", 5), ("alice", 2), ("bob", 6)] {
//!     registry.apply_move("room-1", actor, cell).unwrap();
//! }
//!
//! let report = registry.apply_move("room-1", "alice", 3).unwrap();
//! assert_eq!(report.outcome, MoveOutcome::Win("alice".into()));
//! assert!(registry.is_empty());
//! ```

pub mod board;
pub mod config;
pub mod connect_four;
pub mod error;
pub mod ids;
pub mod registry;
pub mod session;
pub mod sweeper;
pub mod tictactoe;

pub use board::{Cell, GameBoard, GameKind, Seat};
pub use config::{GameConfig, StartPolicy};
pub use connect_four::ConnectFourBoard;
pub use error::{GameError, Result};
pub use ids::{PlayerId, RoomId};
pub use registry::GameRegistry;
pub use session::{parse_move_token, GameSession, MoveOutcome, MoveReport, Placement};
pub use sweeper::IdleSweeper;
pub use tictactoe::TicTacToeBoard;
