//! Error types for the Telegram adapter.

use thiserror::Error;

/// Errors that can occur in the Telegram bot.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Bot token not provided.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN environment variable.")]
    NoToken,

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// Invalid relay configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] relay_core::ConfigError),

    /// Telegram API request failed.
    #[error("Telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),
}

/// Result type for Telegram operations.
pub type Result<T> = std::result::Result<T, TelegramError>;
