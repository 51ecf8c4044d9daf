//! Shared configuration for the relay.
//!
//! Locates the relay's directories and env files, and reads the runtime
//! settings every adapter shares.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.chat-relay/
//! └── config/       # .env.local with tokens
//! ```
//!
//! Logs go to stdout through `tracing`.
//!
//! # Environment Variables
//!
//! - `RELAY_STATE_DIR`: Override the base directory
//! - `RELAY_CONFIG_DIR`: Override the config directory
//! - `RELAY_GAME_PREFIX`: Game command prefix (default `!game`)
//! - `RELAY_SELF_DESTRUCT_PREFIX`: Self-destruct prefix (default `!sd`)
//! - `RELAY_GAME_SWEEP_SECS`: Idle sweep interval (default 60)
//! - `RELAY_GAME_IDLE_SECS`: Idle timeout (default 300)
//! - `RELAY_GAME_REPLACE_ACTIVE`: Let `start` replace a running game (default false)

use std::path::{Path, PathBuf};
use std::time::Duration;

use relay_games::{GameConfig, StartPolicy};
use thiserror::Error;
use tracing::debug;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "RELAY_STATE_DIR";

/// Environment variable for custom config directory.
pub const CONFIG_DIR_ENV: &str = "RELAY_CONFIG_DIR";

pub const GAME_PREFIX_ENV: &str = "RELAY_GAME_PREFIX";
pub const SELF_DESTRUCT_PREFIX_ENV: &str = "RELAY_SELF_DESTRUCT_PREFIX";
pub const SWEEP_SECS_ENV: &str = "RELAY_GAME_SWEEP_SECS";
pub const IDLE_SECS_ENV: &str = "RELAY_GAME_IDLE_SECS";
pub const REPLACE_ACTIVE_ENV: &str = "RELAY_GAME_REPLACE_ACTIVE";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".chat-relay";

const CONFIG_SUBDIR: &str = "config";

/// Errors reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but does not parse.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Get the relay state directory.
///
/// 1. `RELAY_STATE_DIR` if set
/// 2. `~/.chat-relay` if a home directory is available
/// 3. `.chat-relay` in the current directory
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}

/// Get the config directory.
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(CONFIG_SUBDIR))
}

/// Get the .env.local file path holding bot tokens.
pub fn env_file() -> PathBuf {
    config_dir().join(".env.local")
}

/// Ensure the config directory exists.
pub fn ensure_dirs() -> Result<()> {
    create_dir(&config_dir())
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    debug!(path = %dir.display(), "directory ready");
    Ok(())
}

/// Load environment files, earlier files winning.
///
/// Reads the config-dir `.env.local`, then `.env.local` or `.env` in the
/// working directory. Missing files are skipped. Returns the files loaded.
pub fn load_env() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    let env_path = env_file();
    if load_env_file(&env_path) {
        loaded.push(env_path);
    }

    for local in [".env.local", ".env"] {
        if let Ok(path) = dotenvy::from_filename(local) {
            debug!(path = %path.display(), "loaded env file");
            loaded.push(path);
            break;
        }
    }

    loaded
}

fn load_env_file(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "loaded env file");
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load env file");
            false
        }
    }
}

/// Runtime settings shared by every adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Prefix of game commands.
    pub game_prefix: String,
    /// Prefix of self-destruct commands.
    pub self_destruct_prefix: String,
    /// Prefix of the help command.
    pub help_prefix: String,
    /// Game engine configuration.
    pub games: GameConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_prefix: "!game".to_string(),
            self_destruct_prefix: "!sd".to_string(),
            help_prefix: "!help".to_string(),
            games: GameConfig::default(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through a variable lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(prefix) = lookup(GAME_PREFIX_ENV).filter(|p| !p.trim().is_empty()) {
            settings.game_prefix = prefix.trim().to_string();
        }
        if let Some(prefix) = lookup(SELF_DESTRUCT_PREFIX_ENV).filter(|p| !p.trim().is_empty()) {
            settings.self_destruct_prefix = prefix.trim().to_string();
        }
        if let Some(secs) = lookup(SWEEP_SECS_ENV) {
            settings.games.sweep_interval = parse_secs(SWEEP_SECS_ENV, &secs)?;
        }
        if let Some(secs) = lookup(IDLE_SECS_ENV) {
            settings.games.idle_timeout = parse_secs(IDLE_SECS_ENV, &secs)?;
        }
        if let Some(flag) = lookup(REPLACE_ACTIVE_ENV) {
            settings.games.start_policy = if parse_bool(REPLACE_ACTIVE_ENV, &flag)? {
                StartPolicy::Replace
            } else {
                StartPolicy::Reject
            };
        }

        Ok(settings)
    }

    /// The game engine configuration.
    pub fn game_config(&self) -> GameConfig {
        self.games.clone()
    }
}

fn parse_secs(name: &'static str, value: &str) -> Result<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
            reason: "must be at least 1 second".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
