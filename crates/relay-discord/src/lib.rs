//! Discord adapter for the chat relay.
//!
//! Connects to the Discord gateway with a bot token, translates guild and
//! DM messages into `InboundMessage`s and replies in the same channel.
//! Players are identified by their Discord user id and rendered as `<@id>`.
//!
//! Required: `DISCORD_BOT_TOKEN`. The bot needs the Message Content intent
//! enabled in the developer portal.

pub mod bot;
pub mod error;
pub mod handler;
pub mod state;

pub use bot::DiscordBot;
pub use error::{DiscordError, Result};
pub use state::{inbound, DiscordNames, DiscordState};
