//! Error types for the Discord adapter.

use thiserror::Error;

/// Errors that can occur in the Discord bot.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// Bot token not provided.
    #[error("Discord bot token not set. Set DISCORD_BOT_TOKEN environment variable.")]
    NoToken,

    /// Gateway or HTTP failure.
    #[error("Discord client error: {0}")]
    Client(#[from] serenity::Error),

    /// Invalid relay configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] relay_core::ConfigError),
}

/// Result type for Discord operations.
pub type Result<T> = std::result::Result<T, DiscordError>;
