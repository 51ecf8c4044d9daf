//! Game engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What `start_game` does when the room already has a running match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPolicy {
    /// Refuse with `GameError::GameInProgress`; the players must end it first.
    #[default]
    Reject,
    /// Abandon the running match and start the new one.
    Replace,
}

/// Configuration for the game registry and its idle sweeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// How often the idle sweeper runs.
    pub sweep_interval: Duration,
    /// Inactivity after which a session is evicted.
    pub idle_timeout: Duration,
    /// Behaviour when starting over an active session.
    pub start_policy: StartPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(60),
            idle_timeout: Duration::from_secs(300),
            start_policy: StartPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sweep interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Sets the idle timeout.
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Sets the start policy.
    pub fn with_start_policy(mut self, policy: StartPolicy) -> Self {
        self.start_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();

        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.idle_timeout, Duration::from_secs(300));
        assert_eq!(config.start_policy, StartPolicy::Reject);
    }

    #[test]
    fn test_config_builder() {
        let config = GameConfig::new()
            .with_sweep_interval(Duration::from_secs(5))
            .with_idle_timeout(Duration::from_secs(30))
            .with_start_policy(StartPolicy::Replace);

        assert_eq!(config.sweep_interval, Duration::from_secs(5));
        assert_eq!(config.idle_timeout, Duration::from_secs(30));
        assert_eq!(config.start_policy, StartPolicy::Replace);
    }
}
