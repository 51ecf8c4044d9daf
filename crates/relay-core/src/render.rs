//! Text presentation of game state.
//!
//! The engine only returns structured state; this module turns it into
//! chat text. Platform differences are limited to how a player is
//! mentioned, which adapters supply through `PlayerNames`.

use std::sync::Arc;

use relay_games::{
    Cell, GameError, GameKind, GameSession, MoveOutcome, MoveReport, PlayerId, Seat,
};

/// Formats a player reference for one platform.
pub trait PlayerNames: Send + Sync {
    /// Text that mentions or names `player`.
    fn mention(&self, player: &PlayerId) -> String;
}

impl<T: PlayerNames + ?Sized> PlayerNames for Arc<T> {
    fn mention(&self, player: &PlayerId) -> String {
        (**self).mention(player)
    }
}

/// Shows ids verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNames;

impl PlayerNames for PlainNames {
    fn mention(&self, player: &PlayerId) -> String {
        player.to_string()
    }
}

const C4_FOOTER: &str = "1️⃣2️⃣3️⃣4️⃣5️⃣6️⃣7️⃣";
const TTT_KEY: &str = "1️⃣2️⃣3️⃣\n4️⃣5️⃣6️⃣\n7️⃣8️⃣9️⃣";

fn cell_symbol(kind: GameKind, cell: Cell) -> &'static str {
    match (kind, cell) {
        (GameKind::TicTacToe, Cell::Empty) => "⬜",
        (GameKind::TicTacToe, Cell::Marked(Seat::A)) => "❌",
        (GameKind::TicTacToe, Cell::Marked(Seat::B)) => "⭕",
        (GameKind::ConnectFour, Cell::Empty) => "⚪",
        (GameKind::ConnectFour, Cell::Marked(Seat::A)) => "🔴",
        (GameKind::ConnectFour, Cell::Marked(Seat::B)) => "🔵",
    }
}

/// Renders game state and errors as chat replies.
pub struct Presenter {
    game_prefix: String,
    names: Box<dyn PlayerNames>,
}

impl Presenter {
    /// Creates a presenter for a game prefix and naming scheme.
    pub fn new(game_prefix: impl Into<String>, names: impl PlayerNames + 'static) -> Self {
        Self {
            game_prefix: game_prefix.into(),
            names: Box::new(names),
        }
    }

    fn mention(&self, player: &PlayerId) -> String {
        self.names.mention(player)
    }

    fn play_hint(&self, kind: GameKind) -> String {
        let range = kind.move_range();
        format!(
            "Use `{} play {}-{}` to make a move!",
            self.game_prefix,
            range.start(),
            range.end()
        )
    }

    /// The board as emoji rows.
    pub fn board(&self, session: &GameSession) -> String {
        let kind = session.kind();
        let rows: Vec<String> = session
            .board
            .rows()
            .into_iter()
            .map(|row| row.into_iter().map(|c| cell_symbol(kind, c)).collect())
            .collect();

        match kind {
            GameKind::TicTacToe => rows.join("\n"),
            GameKind::ConnectFour => format!("{}\n{}", rows.join("\n"), C4_FOOTER),
        }
    }

    fn turn_line(&self, session: &GameSession) -> String {
        format!(
            "Current turn: {}\n{}",
            self.mention(&session.current_turn),
            self.play_hint(session.kind())
        )
    }

    fn intro(&self, session: &GameSession) -> String {
        let kind = session.kind();
        let a = cell_symbol(kind, Cell::Marked(Seat::A));
        let b = cell_symbol(kind, Cell::Marked(Seat::B));
        let mut text = format!(
            "🎮 **{}**\nPlayer 1 ({}): {}\nPlayer 2 ({}): {}\n\n**How to Play:**\n",
            kind.label(),
            a,
            self.mention(&session.player_a),
            b,
            self.mention(&session.player_b),
        );

        match kind {
            GameKind::TicTacToe => {
                text.push_str(&format!(
                    "• Use `{} play 1-9` to place your mark\n• Numbers correspond to positions:\n{}\n",
                    self.game_prefix, TTT_KEY
                ));
            }
            GameKind::ConnectFour => {
                text.push_str(&format!(
                    "• Use `{} play 1-7` to drop your piece\n• Columns are numbered left to right\n\
                     • Get 4 in a row to win (horizontal, vertical, or diagonal)\n",
                    self.game_prefix
                ));
            }
        }
        text
    }

    /// Reply for a freshly started game.
    pub fn started(&self, session: &GameSession) -> String {
        format!(
            "{}\n\n{}\n{}",
            self.board(session),
            self.intro(session),
            self.turn_line(session)
        )
    }

    /// Board or current state of a running game.
    pub fn status(&self, session: &GameSession) -> String {
        if session.board.is_fresh() {
            return self.started(session);
        }
        format!("{}\n\n{}", self.board(session), self.turn_line(session))
    }

    /// Replies for an accepted move: the board, then the turn line or result.
    pub fn after_move(&self, report: &MoveReport) -> Vec<String> {
        let board = self.board(&report.session);
        match &report.outcome {
            MoveOutcome::Continue => {
                vec![format!("{}\n\n{}", board, self.turn_line(&report.session))]
            }
            MoveOutcome::Win(winner) => {
                vec![board, format!("🎉 {} wins!", self.mention(winner))]
            }
            MoveOutcome::Draw => vec![board, "🤝 It's a draw!".to_string()],
        }
    }

    /// Reply for a game ended by one of its players.
    pub fn ended(&self, session: &GameSession, by: &PlayerId) -> String {
        format!(
            "🏳️ {} ended the {} game.",
            self.mention(by),
            session.kind().label()
        )
    }

    /// Usage for `!game`.
    pub fn help(&self) -> String {
        let p = &self.game_prefix;
        format!(
            "🎮 **Games**\n\
             • `{p} ttt @player` - start Tic Tac Toe\n\
             • `{p} c4 @player` - start Connect Four\n\
             • `{p} play <n>` - make a move\n\
             • `{p} status` - show the board\n\
             • `{p} end` - end the current game"
        )
    }

    /// Reply for a start command without an opponent.
    pub fn missing_opponent(&self, kind: GameKind) -> String {
        let word = match kind {
            GameKind::TicTacToe => "ttt",
            GameKind::ConnectFour => "c4",
        };
        format!(
            "❌ Please mention a player to play with: {} {} @player",
            self.game_prefix, word
        )
    }

    /// User-facing text for an engine error.
    ///
    /// `kind` is the game the user was addressing, when known.
    pub fn error(&self, error: &GameError, kind: Option<GameKind>) -> String {
        match error {
            GameError::SelfPlay => "❌ You cannot play against yourself!".to_string(),
            GameError::NoActiveGame(_) => format!(
                "❌ No active game in this chat. Start one with {} ttt @player or {} c4 @player",
                self.game_prefix, self.game_prefix
            ),
            GameError::NotYourTurn => "❌ Not your turn!".to_string(),
            GameError::NotAPlayer => "❌ You are not playing in this game.".to_string(),
            GameError::InvalidMove(reason) => match kind {
                Some(GameKind::TicTacToe) => format!(
                    "❌ Invalid move ({})! Choose a number 1-9 in an empty space.",
                    reason
                ),
                Some(GameKind::ConnectFour) => format!(
                    "❌ Invalid move ({})! Choose a column 1-7 that isn't full.",
                    reason
                ),
                None => format!("❌ Invalid move ({}), choose again.", reason),
            },
            GameError::GameInProgress(_) => format!(
                "❌ A game is already running here. Finish it or use {} end first.",
                self.game_prefix
            ),
            GameError::LockPoisoned(_) => {
                "❌ An error occurred while processing your request.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_games::GameRegistry;

    struct AtNames;

    impl PlayerNames for AtNames {
        fn mention(&self, player: &PlayerId) -> String {
            format!("<@{}>", player)
        }
    }

    fn presenter() -> Presenter {
        Presenter::new("!game", AtNames)
    }

    #[test]
    fn test_started_tictactoe() {
        let registry = GameRegistry::default();
        let session = registry.start_game("c", GameKind::TicTacToe, "1", "2").unwrap();
        let text = presenter().started(&session);

        assert!(text.starts_with("⬜⬜⬜\n⬜⬜⬜\n⬜⬜⬜\n\n🎮 **Tic Tac Toe**"));
        assert!(text.contains("Player 1 (❌): <@1>"));
        assert!(text.contains("Player 2 (⭕): <@2>"));
        assert!(text.contains("Current turn: <@1>"));
        assert!(text.ends_with("Use `!game play 1-9` to make a move!"));
    }

    #[test]
    fn test_connect_four_board_has_footer() {
        let registry = GameRegistry::default();
        registry.start_game("c", GameKind::ConnectFour, "1", "2").unwrap();
        let report = registry.apply_move("c", "1", 3).unwrap();
        let board = presenter().board(&report.session);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[5], "⚪⚪🔴⚪⚪⚪⚪");
        assert_eq!(lines[6], C4_FOOTER);
    }

    #[test]
    fn test_after_move_win_and_continue() {
        let registry = GameRegistry::default();
        registry.start_game("c", GameKind::TicTacToe, "1", "2").unwrap();
        let first = registry.apply_move("c", "1", 1).unwrap();

        let replies = presenter().after_move(&first);
        assert_eq!(replies.len(), 1);
        assert!(replies[0].contains("Current turn: <@2>"));

        for (actor, cell) in [("2", 4), ("1", 2), ("2", 5)] {
            registry.apply_move("c", actor, cell).unwrap();
        }
        let win = registry.apply_move("c", "1", 3).unwrap();
        let replies = presenter().after_move(&win);
        assert_eq!(replies, vec!["❌❌❌\n⭕⭕⬜\n⬜⬜⬜".to_string(), "🎉 <@1> wins!".to_string()]);
    }

    #[test]
    fn test_error_texts() {
        let p = presenter();
        assert_eq!(p.error(&GameError::NotYourTurn, None), "❌ Not your turn!");
        assert!(p
            .error(&GameError::InvalidMove("column 1 is full".into()), Some(GameKind::ConnectFour))
            .contains("column 1-7"));
        assert!(p.error(&GameError::NoActiveGame("c".into()), None).contains("!game ttt @player"));
        assert_eq!(
            p.missing_opponent(GameKind::ConnectFour),
            "❌ Please mention a player to play with: !game c4 @player"
        );
    }
}
