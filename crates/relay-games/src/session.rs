//! A single match and the results of moves against it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::board::{GameBoard, GameKind, Seat};
use crate::error::{GameError, Result};
use crate::ids::{PlayerId, RoomId};

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The match goes on.
    Continue,
    /// The given player completed a line. Terminal.
    Win(PlayerId),
    /// Board full with no line. Terminal.
    Draw,
}

impl MoveOutcome {
    /// Returns true for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MoveOutcome::Continue)
    }
}

/// Where a move put its mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Who moved.
    pub player: PlayerId,
    /// The mover's seat.
    pub seat: Seat,
    /// 0-indexed row.
    pub row: usize,
    /// 0-indexed column.
    pub col: usize,
}

/// Everything an adapter needs to render the result of a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// What the move did to the match.
    pub outcome: MoveOutcome,
    /// Session snapshot after the move. Terminal sessions are already gone
    /// from the registry when this is returned.
    pub session: GameSession,
    /// The accepted move.
    pub placed: Placement,
    /// Cells of the winning line as `(row, column)`, empty unless `Win`.
    pub winning_line: Vec<(usize, usize)>,
}

/// One match in one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Room hosting the match.
    pub room_id: RoomId,
    /// Initiator, plays seat A and moves first.
    pub player_a: PlayerId,
    /// Opponent, plays seat B.
    pub player_b: PlayerId,
    /// Player on the move.
    pub current_turn: PlayerId,
    /// Board contents.
    pub board: GameBoard,
    /// When the match was created.
    pub started_at: DateTime<Utc>,
    /// Refreshed by every accepted move.
    pub last_activity: DateTime<Utc>,
}

impl GameSession {
    /// Creates a session with the initiator on the move.
    pub fn new(
        room_id: RoomId,
        kind: GameKind,
        initiator: PlayerId,
        opponent: PlayerId,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if initiator == opponent {
            return Err(GameError::SelfPlay);
        }

        Ok(Self {
            room_id,
            current_turn: initiator.clone(),
            player_a: initiator,
            player_b: opponent,
            board: GameBoard::new(kind),
            started_at: now,
            last_activity: now,
        })
    }

    /// Which game is being played.
    pub fn kind(&self) -> GameKind {
        self.board.kind()
    }

    /// Seat of a player, or `None` for a spectator.
    pub fn seat_of(&self, player: &PlayerId) -> Option<Seat> {
        if *player == self.player_a {
            Some(Seat::A)
        } else if *player == self.player_b {
            Some(Seat::B)
        } else {
            None
        }
    }

    /// Player sitting on a seat.
    pub fn player(&self, seat: Seat) -> &PlayerId {
        match seat {
            Seat::A => &self.player_a,
            Seat::B => &self.player_b,
        }
    }

    /// Returns true if the player is one of the two participants.
    pub fn is_player(&self, player: &PlayerId) -> bool {
        self.seat_of(player).is_some()
    }

    /// Returns true if the session has been untouched for at least `timeout`.
    pub fn is_idle(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now - self.last_activity >= timeout
    }

    /// Validates and applies a move, flipping the turn and refreshing
    /// `last_activity`. A rejected move leaves the session untouched.
    pub fn apply_move(
        &mut self,
        actor: &PlayerId,
        position: usize,
        now: DateTime<Utc>,
    ) -> Result<MoveReport> {
        let seat = self.seat_of(actor).ok_or(GameError::NotAPlayer)?;
        if *actor != self.current_turn {
            return Err(GameError::NotYourTurn);
        }

        let (row, col) = self.board.place(position, seat)?;
        self.current_turn = self.player(seat.opponent()).clone();
        self.last_activity = now;

        let (outcome, winning_line) = match self.board.winner() {
            Some((winner, line)) => (MoveOutcome::Win(self.player(winner).clone()), line),
            None if self.board.is_full() => (MoveOutcome::Draw, Vec::new()),
            None => (MoveOutcome::Continue, Vec::new()),
        };

        Ok(MoveReport {
            outcome,
            session: self.clone(),
            placed: Placement {
                player: actor.clone(),
                seat,
                row,
                col,
            },
            winning_line,
        })
    }
}

/// Parses an adapter's move token into a 1-indexed cell or column number.
///
/// Anything that is not a positive integer is an invalid move; range
/// checks are left to the board.
pub fn parse_move_token(token: &str) -> Result<usize> {
    token
        .trim()
        .parse::<usize>()
        .map_err(|_| GameError::InvalidMove(format!("'{}' is not a number", token.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn session(kind: GameKind) -> GameSession {
        GameSession::new("room".into(), kind, "a".into(), "b".into(), t(0)).unwrap()
    }

    #[test]
    fn test_new_session_initiator_moves_first() {
        let s = session(GameKind::TicTacToe);
        assert_eq!(s.current_turn, PlayerId::from("a"));
        assert_eq!(s.kind(), GameKind::TicTacToe);
        assert_eq!(s.started_at, s.last_activity);
    }

    #[test]
    fn test_self_play_rejected() {
        let err = GameSession::new("room".into(), GameKind::ConnectFour, "a".into(), "a".into(), t(0))
            .unwrap_err();
        assert_eq!(err, GameError::SelfPlay);
    }

    #[test]
    fn test_turn_alternates_and_activity_refreshes() {
        let mut s = session(GameKind::TicTacToe);
        let report = s.apply_move(&"a".into(), 1, t(10)).unwrap();
        assert_eq!(report.outcome, MoveOutcome::Continue);
        assert_eq!(report.placed.seat, Seat::A);
        assert_eq!(s.current_turn, PlayerId::from("b"));
        assert_eq!(s.last_activity, t(10));

        s.apply_move(&"b".into(), 2, t(20)).unwrap();
        assert_eq!(s.current_turn, PlayerId::from("a"));
    }

    #[test]
    fn test_wrong_turn_and_spectator() {
        let mut s = session(GameKind::TicTacToe);
        assert_eq!(s.apply_move(&"b".into(), 1, t(1)).unwrap_err(), GameError::NotYourTurn);
        assert_eq!(s.apply_move(&"c".into(), 1, t(1)).unwrap_err(), GameError::NotAPlayer);
        assert!(s.board.is_fresh());
        assert_eq!(s.last_activity, t(0));
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut s = session(GameKind::TicTacToe);
        s.apply_move(&"a".into(), 5, t(1)).unwrap();
        assert!(matches!(
            s.apply_move(&"b".into(), 5, t(2)),
            Err(GameError::InvalidMove(_))
        ));
        assert_eq!(s.current_turn, PlayerId::from("b"));
        assert_eq!(s.last_activity, t(1));
    }

    #[test]
    fn test_idle_boundary_is_inclusive() {
        let s = session(GameKind::ConnectFour);
        let timeout = Duration::seconds(300);
        assert!(!s.is_idle(t(299), timeout));
        assert!(s.is_idle(t(300), timeout));
    }

    #[test]
    fn test_parse_move_token() {
        assert_eq!(parse_move_token("3").unwrap(), 3);
        assert_eq!(parse_move_token(" 7 ").unwrap(), 7);
        assert!(matches!(parse_move_token("x"), Err(GameError::InvalidMove(_))));
        assert!(matches!(parse_move_token("-1"), Err(GameError::InvalidMove(_))));
        assert!(matches!(parse_move_token(""), Err(GameError::InvalidMove(_))));
    }
}
