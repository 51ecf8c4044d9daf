//! Relay Core - shared feature logic for all chat adapters.
//!
//! The Telegram and Discord adapters translate their SDK messages into an
//! `InboundMessage` and hand it to the features here; nothing in this
//! crate depends on a chat SDK.
//!
//! - **command**: Parse `!game` / `!sd` / `!help` message text
//! - **config**: Directory layout, env files and runtime settings
//! - **games**: Game feature on top of `relay_games::GameRegistry`
//! - **message**: Platform-neutral inbound message model
//! - **render**: Text presentation of boards, turns and results
//! - **self_destruct**: Countdown text for self-deleting messages

pub mod command;
pub mod config;
pub mod games;
pub mod message;
pub mod render;
pub mod self_destruct;

pub use command::{parse, GameCommand, RelayCommand};
pub use config::{env_file, load_env, state_dir, ConfigError, Settings};
pub use games::GameFeature;
pub use message::{InboundMessage, Platform};
pub use render::{PlainNames, PlayerNames, Presenter};
pub use self_destruct::SelfDestructRequest;
