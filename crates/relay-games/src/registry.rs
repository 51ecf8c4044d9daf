//! GameRegistry - the room to session map.
//!
//! Chat adapters handle updates concurrently, so the map sits behind an
//! `RwLock` and every operation keeps the lock for its full
//! read-modify-write. Operations on one registry are therefore serialized;
//! none of them awaits or does I/O while holding the lock.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::board::GameKind;
use crate::config::{GameConfig, StartPolicy};
use crate::error::{GameError, Result};
use crate::ids::{PlayerId, RoomId};
use crate::session::{GameSession, MoveReport};

/// Owns every active session, at most one per room.
///
/// Construct one per bot (or per test) and share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct GameRegistry {
    config: GameConfig,
    sessions: RwLock<HashMap<RoomId, GameSession>>,
}

impl GameRegistry {
    /// Creates an empty registry.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// The registry configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<RoomId, GameSession>>> {
        self.sessions
            .read()
            .map_err(|e| GameError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<RoomId, GameSession>>> {
        self.sessions
            .write()
            .map_err(|e| GameError::LockPoisoned(e.to_string()))
    }

    /// Starts a match in `room` using the wall clock.
    pub fn start_game(
        &self,
        room: impl Into<RoomId>,
        kind: GameKind,
        initiator: impl Into<PlayerId>,
        opponent: impl Into<PlayerId>,
    ) -> Result<GameSession> {
        self.start_game_at(room, kind, initiator, opponent, Utc::now())
    }

    /// Starts a match in `room` with the initiator on the move.
    ///
    /// # Errors
    ///
    /// - `SelfPlay` if initiator and opponent are the same player
    /// - `GameInProgress` if the room has a match and the policy is `Reject`
    pub fn start_game_at(
        &self,
        room: impl Into<RoomId>,
        kind: GameKind,
        initiator: impl Into<PlayerId>,
        opponent: impl Into<PlayerId>,
        now: DateTime<Utc>,
    ) -> Result<GameSession> {
        let room = room.into();
        let session = GameSession::new(room.clone(), kind, initiator.into(), opponent.into(), now)?;

        let mut sessions = self.write()?;
        if let Some(existing) = sessions.get(&room) {
            match self.config.start_policy {
                StartPolicy::Reject => return Err(GameError::GameInProgress(room)),
                StartPolicy::Replace => {
                    info!(
                        room = %room,
                        previous = %existing.kind(),
                        "replacing active game"
                    );
                }
            }
        }

        sessions.insert(room.clone(), session.clone());
        info!(
            room = %room,
            kind = %kind,
            player_a = %session.player_a,
            player_b = %session.player_b,
            "game started"
        );
        Ok(session)
    }

    /// Returns a copy of the room's session, if any.
    pub fn get_active_game(&self, room: impl Into<RoomId>) -> Result<Option<GameSession>> {
        let room = room.into();
        Ok(self.read()?.get(&room).cloned())
    }

    /// Applies a move using the wall clock.
    pub fn apply_move(
        &self,
        room: impl Into<RoomId>,
        actor: impl Into<PlayerId>,
        position: usize,
    ) -> Result<MoveReport> {
        self.apply_move_at(room, actor, position, Utc::now())
    }

    /// Applies a 1-indexed move for `actor` in `room`.
    ///
    /// A terminal outcome removes the session; the returned report still
    /// carries the final board.
    ///
    /// # Errors
    ///
    /// - `NoActiveGame` if the room has no session
    /// - `NotAPlayer` if the actor is neither player
    /// - `NotYourTurn` if the actor is not on the move
    /// - `InvalidMove` for out-of-range, occupied or full targets
    pub fn apply_move_at(
        &self,
        room: impl Into<RoomId>,
        actor: impl Into<PlayerId>,
        position: usize,
        now: DateTime<Utc>,
    ) -> Result<MoveReport> {
        let room = room.into();
        let actor = actor.into();

        let mut sessions = self.write()?;
        let session = sessions
            .get_mut(&room)
            .ok_or_else(|| GameError::NoActiveGame(room.clone()))?;

        let report = session.apply_move(&actor, position, now)?;
        debug!(
            room = %room,
            player = %actor,
            row = report.placed.row,
            col = report.placed.col,
            "move accepted"
        );

        if report.outcome.is_terminal() {
            sessions.remove(&room);
            info!(room = %room, outcome = ?report.outcome, "game finished");
        }

        Ok(report)
    }

    /// Ends the room's match at the request of one of its players.
    pub fn end_game(
        &self,
        room: impl Into<RoomId>,
        actor: impl Into<PlayerId>,
    ) -> Result<GameSession> {
        let room = room.into();
        let actor = actor.into();

        let mut sessions = self.write()?;
        let session = sessions
            .get(&room)
            .ok_or_else(|| GameError::NoActiveGame(room.clone()))?;
        if !session.is_player(&actor) {
            return Err(GameError::NotAPlayer);
        }

        let ended = sessions
            .remove(&room)
            .ok_or_else(|| GameError::NoActiveGame(room.clone()))?;
        info!(room = %room, player = %actor, "game ended by player");
        Ok(ended)
    }

    /// Removes every session idle for at least `timeout` as of `now`.
    ///
    /// Returns the evicted sessions.
    pub fn sweep_idle_sessions(
        &self,
        now: DateTime<Utc>,
        timeout: Duration,
    ) -> Result<Vec<GameSession>> {
        let timeout = chrono::Duration::from_std(timeout).unwrap_or(chrono::Duration::MAX);

        let mut sessions = self.write()?;
        let idle: Vec<RoomId> = sessions
            .iter()
            .filter(|(_, s)| s.is_idle(now, timeout))
            .map(|(room, _)| room.clone())
            .collect();

        let evicted: Vec<GameSession> = idle
            .iter()
            .filter_map(|room| sessions.remove(room))
            .collect();

        for session in &evicted {
            info!(
                room = %session.room_id,
                kind = %session.kind(),
                last_activity = %session.last_activity,
                "evicted idle game"
            );
        }
        Ok(evicted)
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Returns true if no session is active.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
