//! Discord client setup.

use std::sync::Arc;

use relay_core::Settings;
use relay_games::IdleSweeper;
use serenity::all::GatewayIntents;
use serenity::Client;
use tracing::{info, warn};

use crate::error::{DiscordError, Result};
use crate::handler::Handler;
use crate::state::DiscordState;

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";

/// The Discord side of the relay.
pub struct DiscordBot {
    token: String,
    state: Arc<DiscordState>,
}

impl DiscordBot {
    /// Create a bot from the `RELAY_*` settings in the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(Settings::from_env()?)
    }

    /// Requires `DISCORD_BOT_TOKEN` to be set.
    pub fn new(settings: Settings) -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(DiscordError::NoToken)?;
        Ok(Self::with_token(token, settings))
    }

    pub fn with_token(token: impl Into<String>, settings: Settings) -> Self {
        Self {
            token: token.into(),
            state: Arc::new(DiscordState::new(settings)),
        }
    }

    /// Shared handler state.
    pub fn state(&self) -> &Arc<DiscordState> {
        &self.state
    }

    /// Connects to the gateway and handles events until the client stops or Ctrl+C.
    pub async fn run(&self) -> Result<()> {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let mut client = Client::builder(&self.token, intents)
            .event_handler(Handler::new(Arc::clone(&self.state)))
            .await?;

        let (shutdown_tx, sweeper) = IdleSweeper::spawn(self.state.registry());

        let shard_manager = Arc::clone(&client.shard_manager);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl+C received, shutting down Discord client");
                shard_manager.shutdown_all().await;
            }
        });

        info!("Starting Discord gateway client...");
        let result = client.start().await;

        let _ = shutdown_tx.send(true);
        if let Err(e) = sweeper.await {
            warn!(error = %e, "idle sweeper task failed");
        }

        result?;
        info!("Discord bot stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token_builds_state() {
        let bot = DiscordBot::with_token("token", Settings::default());
        assert_eq!(bot.state().settings().game_prefix, "!game");
        assert!(bot.state().registry().is_empty());
    }
}
