//! The `!game` feature.

use std::sync::Arc;

use relay_games::{parse_move_token, GameError, GameKind, GameRegistry, MoveReport};
use tracing::{debug, error, info};

use crate::command::GameCommand;
use crate::message::InboundMessage;
use crate::render::Presenter;

/// Turns game commands into registry calls and reply texts.
pub struct GameFeature {
    registry: Arc<GameRegistry>,
    presenter: Presenter,
}

impl GameFeature {
    /// Creates the feature over a shared registry.
    pub fn new(registry: Arc<GameRegistry>, presenter: Presenter) -> Self {
        Self {
            registry,
            presenter,
        }
    }

    /// The underlying registry (for the idle sweeper).
    pub fn registry(&self) -> &Arc<GameRegistry> {
        &self.registry
    }

    /// The presenter used for replies.
    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// Handles one command, returning the replies to send in order.
    pub fn handle(&self, msg: &InboundMessage, command: GameCommand) -> Vec<String> {
        debug!(
            platform = %msg.platform,
            room = %msg.room,
            actor = %msg.actor,
            command = ?command,
            "game command"
        );

        match command {
            GameCommand::Start(kind) => self.start(msg, kind),
            GameCommand::Play(token) => self.play(msg, &token),
            GameCommand::Status => self.status(msg),
            GameCommand::End => self.end(msg),
            GameCommand::Help => vec![self.presenter.help()],
        }
    }

    fn start(&self, msg: &InboundMessage, kind: GameKind) -> Vec<String> {
        let Some(opponent) = msg.opponent() else {
            return vec![self.presenter.missing_opponent(kind)];
        };

        match self
            .registry
            .start_game(msg.room.clone(), kind, msg.actor.clone(), opponent.clone())
        {
            Ok(session) => vec![self.presenter.started(&session)],
            Err(e) => vec![self.reply_error(msg, &e, Some(kind))],
        }
    }

    fn play(&self, msg: &InboundMessage, token: &str) -> Vec<String> {
        // The active game decides whether the number is a cell or a column.
        let kind = match self.registry.get_active_game(msg.room.clone()) {
            Ok(Some(session)) => session.kind(),
            Ok(None) => {
                return vec![self.reply_error(msg, &GameError::NoActiveGame(msg.room.clone()), None)]
            }
            Err(e) => return vec![self.reply_error(msg, &e, None)],
        };

        let result = parse_move_token(token).and_then(|position| {
            self.registry
                .apply_move(msg.room.clone(), msg.actor.clone(), position)
        });

        match result {
            Ok(report) => {
                self.log_outcome(msg, &report);
                self.presenter.after_move(&report)
            }
            Err(e) => vec![self.reply_error(msg, &e, Some(kind))],
        }
    }

    fn status(&self, msg: &InboundMessage) -> Vec<String> {
        match self.registry.get_active_game(msg.room.clone()) {
            Ok(Some(session)) => vec![self.presenter.status(&session)],
            Ok(None) => vec![self.reply_error(msg, &GameError::NoActiveGame(msg.room.clone()), None)],
            Err(e) => vec![self.reply_error(msg, &e, None)],
        }
    }

    fn end(&self, msg: &InboundMessage) -> Vec<String> {
        match self.registry.end_game(msg.room.clone(), msg.actor.clone()) {
            Ok(session) => vec![self.presenter.ended(&session, &msg.actor)],
            Err(e) => vec![self.reply_error(msg, &e, None)],
        }
    }

    fn log_outcome(&self, msg: &InboundMessage, report: &MoveReport) {
        if report.outcome.is_terminal() {
            info!(
                platform = %msg.platform,
                room = %msg.room,
                kind = %report.session.kind(),
                outcome = ?report.outcome,
                "game over"
            );
        }
    }

    fn reply_error(&self, msg: &InboundMessage, e: &GameError, kind: Option<GameKind>) -> String {
        if let GameError::LockPoisoned(_) = e {
            error!(room = %msg.room, error = %e, "game registry unavailable");
        } else {
            debug!(room = %msg.room, actor = %msg.actor, error = %e, "game command rejected");
        }
        self.presenter.error(e, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Platform;
    use crate::render::PlainNames;

    fn feature() -> GameFeature {
        GameFeature::new(
            Arc::new(GameRegistry::default()),
            Presenter::new("!game", PlainNames),
        )
    }

    fn msg(actor: &str, text: &str) -> InboundMessage {
        InboundMessage::new(Platform::Discord, "chan", actor, text)
    }

    #[test]
    fn test_start_requires_opponent() {
        let f = feature();
        let replies = f.handle(&msg("1", "!game ttt"), GameCommand::Start(GameKind::TicTacToe));
        assert_eq!(replies, vec!["❌ Please mention a player to play with: !game ttt @player"]);
        assert!(f.registry().is_empty());
    }

    #[test]
    fn test_self_play_reply() {
        let f = feature();
        let m = msg("1", "!game c4").with_mention("1");
        let replies = f.handle(&m, GameCommand::Start(GameKind::ConnectFour));
        assert_eq!(replies, vec!["❌ You cannot play against yourself!"]);
        assert!(f.registry().is_empty());
    }

    #[test]
    fn test_play_routes_to_active_game() {
        let f = feature();
        let start = msg("1", "!game c4").with_mention("2");
        f.handle(&start, GameCommand::Start(GameKind::ConnectFour));

        let replies = f.handle(&msg("1", "!game play 4"), GameCommand::Play("4".into()));
        assert_eq!(replies.len(), 1);
        assert!(replies[0].contains("🔴"));

        let replies = f.handle(&msg("1", "!game play 4"), GameCommand::Play("4".into()));
        assert_eq!(replies, vec!["❌ Not your turn!"]);

        let replies = f.handle(&msg("2", "!game play x"), GameCommand::Play("x".into()));
        assert!(replies[0].contains("Choose a column 1-7"));
    }

    #[test]
    fn test_play_without_game() {
        let f = feature();
        let replies = f.handle(&msg("1", "!game play 1"), GameCommand::Play("1".into()));
        assert!(replies[0].starts_with("❌ No active game"));
    }

    #[test]
    fn test_full_game_then_room_is_free() {
        let f = feature();
        f.handle(
            &msg("1", "!game ttt").with_mention("2"),
            GameCommand::Start(GameKind::TicTacToe),
        );
        for (actor, cell) in [("1", "1"), ("2", "4"), ("1", "2"), ("2", "5")] {
            f.handle(&msg(actor, ""), GameCommand::Play(cell.into()));
        }
        let replies = f.handle(&msg("1", ""), GameCommand::Play("3".into()));
        assert_eq!(replies.last().unwrap(), "🎉 1 wins!");
        assert!(f.registry().is_empty());
    }

    #[test]
    fn test_end_game() {
        let f = feature();
        f.handle(
            &msg("1", "!game ttt").with_mention("2"),
            GameCommand::Start(GameKind::TicTacToe),
        );

        let replies = f.handle(&msg("3", "!game end"), GameCommand::End);
        assert_eq!(replies, vec!["❌ You are not playing in this game."]);

        let replies = f.handle(&msg("2", "!game end"), GameCommand::End);
        assert_eq!(replies, vec!["🏳️ 2 ended the Tic Tac Toe game."]);
        assert!(f.registry().is_empty());
    }

    #[test]
    fn test_second_start_rejected_by_default() {
        let f = feature();
        let start = msg("1", "!game ttt").with_mention("2");
        f.handle(&start, GameCommand::Start(GameKind::TicTacToe));
        let replies = f.handle(&start, GameCommand::Start(GameKind::TicTacToe));
        assert!(replies[0].contains("already running"));
    }

    #[test]
    fn test_status_shows_board_and_turn() {
        let f = feature();
        let replies = f.handle(&msg("1", "!game status"), GameCommand::Status);
        assert!(replies[0].starts_with("❌ No active game"));

        f.handle(
            &msg("1", "!game c4").with_mention("2"),
            GameCommand::Start(GameKind::ConnectFour),
        );
        let replies = f.handle(&msg("3", "!game status"), GameCommand::Status);
        assert!(replies[0].contains("**How to Play:**"));

        f.handle(&msg("1", ""), GameCommand::Play("2".into()));
        let replies = f.handle(&msg("3", "!game status"), GameCommand::Status);
        assert_eq!(replies.len(), 1);
        assert!(replies[0].contains("⚪🔴⚪⚪⚪⚪⚪"));
        assert!(replies[0].contains("Current turn: 2"));
        assert!(!replies[0].contains("**How to Play:**"));
    }
}
