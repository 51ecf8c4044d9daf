//! Error types for the game engine.

use thiserror::Error;

use crate::ids::RoomId;

/// Errors returned by game operations.
///
/// Every variant except `LockPoisoned` is a normal user mistake; adapters
/// turn them into chat replies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The initiator named themselves as the opponent.
    #[error("you cannot play against yourself")]
    SelfPlay,

    /// No session exists for the room.
    #[error("no active game in room {0}")]
    NoActiveGame(RoomId),

    /// The actor is a player but it is the other player's move.
    #[error("not your turn")]
    NotYourTurn,

    /// The actor is not one of the two players of the session.
    #[error("you are not playing in this game")]
    NotAPlayer,

    /// Out of range, occupied cell, full column or unparseable token.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// A session is already running and the start policy rejects replacing it.
    #[error("a game is already in progress in room {0}")]
    GameInProgress(RoomId),

    /// The registry lock was poisoned by a panicking thread.
    #[error("registry lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result type for game operations.
pub type Result<T> = std::result::Result<T, GameError>;
