//! Telegram adapter for the chat relay.
//!
//! Receives messages through the Telegram Bot API, translates them into
//! platform-neutral `InboundMessage`s and answers through the same bot.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather
//!
//! Optional: the `RELAY_*` settings documented in `relay_core::config`.
//!
//! # Example
//!
//! ```no_run
//! use relay_telegram::TelegramBot;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut bot = TelegramBot::from_env()?;
//!     bot.start_polling().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Commands
//!
//! - `/start`, `/help` - Usage
//! - `!game ttt @user`, `!game c4 @user` - Start a game
//! - `!game play <n>` - Make a move
//! - `!game status` - Show the board
//! - `!game end` - End the current game
//! - `!sd <seconds> <message>` - Self-destructing message

pub mod bot;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod state;

pub use bot::TelegramBot;
pub use error::{Result, TelegramError};
pub use identity::{mention_player_id, player_id, NameBook};
pub use state::{create_shared_state, TelegramState};
