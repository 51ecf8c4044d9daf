//! Shared state for the Discord bot.

use std::sync::Arc;

use relay_core::{GameFeature, InboundMessage, Platform, PlayerNames, Presenter, Settings};
use relay_games::{GameRegistry, PlayerId};

/// Discord user mentions, `<@id>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscordNames;

impl PlayerNames for DiscordNames {
    fn mention(&self, player: &PlayerId) -> String {
        format!("<@{}>", player)
    }
}

/// Shared state for the Discord bot.
pub struct DiscordState {
    settings: Settings,
    games: GameFeature,
}

impl DiscordState {
    /// Creates state with a fresh game registry.
    pub fn new(settings: Settings) -> Self {
        let registry = Arc::new(GameRegistry::new(settings.game_config()));
        let presenter = Presenter::new(settings.game_prefix.clone(), DiscordNames);
        Self {
            games: GameFeature::new(registry, presenter),
            settings,
        }
    }

    /// Runtime settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The game feature.
    pub fn games(&self) -> &GameFeature {
        &self.games
    }

    /// The game registry shared with the idle sweeper.
    pub fn registry(&self) -> Arc<GameRegistry> {
        Arc::clone(self.games.registry())
    }
}

/// Builds the platform-neutral message from Discord ids.
///
/// `mentions` are the ids of mentioned non-bot users.
pub fn inbound(channel_id: u64, author_id: u64, content: &str, mentions: &[u64]) -> InboundMessage {
    let mut msg = InboundMessage::new(
        Platform::Discord,
        channel_id.to_string(),
        author_id.to_string(),
        content,
    );
    msg.mentions = mentions.iter().map(|id| PlayerId::new(id.to_string())).collect();
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::command::{self, GameCommand, RelayCommand};
    use relay_games::GameKind;

    #[test]
    fn test_inbound_ids() {
        let msg = inbound(10, 20, "!game c4 <@30>", &[30]);
        assert_eq!(msg.room.as_str(), "10");
        assert_eq!(msg.actor.as_str(), "20");
        assert_eq!(msg.opponent(), Some(&PlayerId::from("30")));
    }

    #[test]
    fn test_game_round_trip_through_state() {
        let state = DiscordState::new(Settings::default());
        let start = inbound(10, 20, "!game c4 <@30>", &[30]);

        let Some(RelayCommand::Game(cmd)) = command::parse(&start.text, state.settings()) else {
            panic!("expected game command");
        };
        assert_eq!(cmd, GameCommand::Start(GameKind::ConnectFour));

        let replies = state.games().handle(&start, cmd);
        assert!(replies[0].contains("Player 1 (🔴): <@20>"));
        assert!(replies[0].contains("Player 2 (🔵): <@30>"));

        let wrong = inbound(10, 30, "!game play 1", &[]);
        let replies = state.games().handle(&wrong, GameCommand::Play("1".into()));
        assert_eq!(replies, vec!["❌ Not your turn!"]);
    }
}
