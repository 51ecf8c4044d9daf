//! Main Telegram bot implementation.

use std::sync::Arc;

use relay_core::Settings;
use relay_games::IdleSweeper;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{Result, TelegramError};
use crate::handlers::{handle_command, handle_message, Command};
use crate::state::{create_shared_state, TelegramState};

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// The Telegram side of the relay.
pub struct TelegramBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Shared state across handlers.
    state: Arc<TelegramState>,
    /// Stops the idle sweeper once polling ends.
    sweeper_shutdown: Option<watch::Sender<bool>>,
}

impl TelegramBot {
    /// Create a bot from the `RELAY_*` settings in the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(Settings::from_env()?)
    }

    /// Create a new TelegramBot instance.
    ///
    /// Requires `TELEGRAM_BOT_TOKEN` environment variable to be set.
    pub fn new(settings: Settings) -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(TelegramError::NoToken)?;

        Ok(Self {
            bot: Bot::new(token),
            state: create_shared_state(settings),
            sweeper_shutdown: None,
        })
    }

    /// Shared handler state.
    pub fn state(&self) -> &Arc<TelegramState> {
        &self.state
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| TelegramError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Start the bot in long-polling mode. Returns on Ctrl+C.
    pub async fn start_polling(&mut self) -> Result<()> {
        info!("Starting Telegram bot in polling mode...");

        let (shutdown_tx, _handle) = IdleSweeper::spawn(self.state.registry());
        self.sweeper_shutdown = Some(shutdown_tx);

        let bot = self.bot.clone();
        let state_for_commands = Arc::clone(&self.state);
        let state_for_messages = Arc::clone(&self.state);

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let state = Arc::clone(&state_for_commands);
                        info!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                        async move { handle_command(bot, msg, cmd, state).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| msg.text().is_some())
                    .endpoint(move |bot: Bot, msg: Message| {
                        let state = Arc::clone(&state_for_messages);
                        async move { handle_message(bot, msg, state).await }
                    }),
            );

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(bot, handler)
            .default_handler(|upd| async move {
                tracing::trace!("Unhandled update: {:?}", upd.id);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error from the update listener or a handler",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        self.stop();
        Ok(())
    }

    /// Stop background tasks.
    pub fn stop(&mut self) {
        if let Some(tx) = self.sweeper_shutdown.take() {
            if tx.send(true).is_err() {
                warn!("idle sweeper already stopped");
            }
        }
        info!("Bot stopped");
    }
}
