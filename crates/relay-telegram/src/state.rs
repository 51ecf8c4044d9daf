//! Shared state for the Telegram bot.

use std::sync::Arc;

use relay_core::{GameFeature, InboundMessage, Platform, Presenter, Settings};
use relay_games::GameRegistry;
use teloxide::types::Message;

use crate::identity::{mentioned_players, user_player_id, NameBook};

/// Shared state for the Telegram bot, accessible across all handlers.
pub struct TelegramState {
    /// Runtime settings.
    settings: Settings,
    /// Game feature over this bot's registry.
    games: GameFeature,
    /// Display names of players without a username.
    names: Arc<NameBook>,
}

impl TelegramState {
    /// Creates state with a fresh game registry.
    pub fn new(settings: Settings) -> Self {
        let registry = Arc::new(GameRegistry::new(settings.game_config()));
        let names = Arc::new(NameBook::new());
        let presenter = Presenter::new(settings.game_prefix.clone(), Arc::clone(&names));

        Self {
            games: GameFeature::new(registry, presenter),
            names,
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

    /// Translates a Telegram message into the platform-neutral shape.
    ///
    /// Returns `None` for messages without text or sender.
    pub fn inbound(&self, msg: &Message) -> Option<InboundMessage> {
        let text = msg.text()?;
        let from = msg.from.as_ref()?;
        self.names.remember(from);

        if let Some(entities) = msg.parse_entities() {
            for entity in entities {
                if let teloxide::types::MessageEntityKind::TextMention { user } = entity.kind() {
                    self.names.remember(user);
                }
            }
        }

        let mut inbound = InboundMessage::new(
            Platform::Telegram,
            msg.chat.id.0.to_string(),
            user_player_id(from),
            text,
        );
        inbound.mentions = mentioned_players(msg);
        Some(inbound)
    }
}

/// Create a new shared state instance.
pub fn create_shared_state(settings: Settings) -> Arc<TelegramState> {
    Arc::new(TelegramState::new(settings))
}
