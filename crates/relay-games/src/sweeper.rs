//! Background eviction of idle sessions.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::registry::GameRegistry;

/// Period used when the configured interval is zero, which `interval` rejects.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Periodically evicts idle sessions from a registry.
///
/// Interval and timeout come from the registry's `GameConfig`. The sweeper
/// runs independently of message handling and only ever removes entries.
pub struct IdleSweeper {
    /// Registry to sweep.
    registry: Arc<GameRegistry>,
    /// Shutdown signal receiver.
    shutdown: watch::Receiver<bool>,
}

impl IdleSweeper {
    /// Creates a new sweeper.
    pub fn new(registry: Arc<GameRegistry>, shutdown: watch::Receiver<bool>) -> Self {
        Self { registry, shutdown }
    }

    /// Spawns a sweeper on the current runtime.
    ///
    /// Dropping or signalling the returned sender stops it.
    pub fn spawn(registry: Arc<GameRegistry>) -> (watch::Sender<bool>, tokio::task::JoinHandle<()>) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut sweeper = Self::new(registry, shutdown_rx);
        let handle = tokio::spawn(async move {
            sweeper.run().await;
        });
        (shutdown_tx, handle)
    }

    /// Run the sweep loop until shutdown signal.
    pub async fn run(&mut self) {
        let config = self.registry.config().clone();
        let period = if config.sweep_interval.is_zero() {
            warn!(
                fallback_secs = MIN_SWEEP_INTERVAL.as_secs(),
                "zero sweep interval configured, using fallback"
            );
            MIN_SWEEP_INTERVAL
        } else {
            config.sweep_interval
        };
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; nothing can be idle yet.
        ticker.tick().await;

        debug!(
            sweep_interval_ms = period.as_millis() as u64,
            idle_timeout_secs = config.idle_timeout.as_secs(),
            "starting idle sweeper"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once();
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        debug!("sweeper received shutdown signal");
                        break;
                    }
                }
            }
        }

        debug!("idle sweeper stopped");
    }

    fn sweep_once(&self) {
        let timeout = self.registry.config().idle_timeout;
        match self.registry.sweep_idle_sessions(Utc::now(), timeout) {
            Ok(evicted) if evicted.is_empty() => trace!("no idle games"),
            Ok(evicted) => debug!(count = evicted.len(), "idle games evicted"),
            Err(e) => warn!(error = %e, "idle sweep failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameKind;
    use crate::config::GameConfig;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_and_stops() {
        let config = GameConfig::new()
            .with_sweep_interval(Duration::from_millis(10))
            .with_idle_timeout(Duration::ZERO);
        let registry = Arc::new(GameRegistry::new(config));
        registry.start_game("r1", GameKind::TicTacToe, "a", "b").unwrap();

        let (shutdown_tx, handle) = IdleSweeper::spawn(Arc::clone(&registry));

        tokio::time::sleep(Duration::from_millis(15)).await;
        assert!(registry.is_empty());

        shutdown_tx.send(true).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(result.is_ok(), "sweeper should stop after shutdown");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_keeps_active_games() {
        let config = GameConfig::new()
            .with_sweep_interval(Duration::from_millis(10))
            .with_idle_timeout(Duration::from_secs(3600));
        let registry = Arc::new(GameRegistry::new(config));
        registry.start_game("r1", GameKind::ConnectFour, "a", "b").unwrap();

        let (shutdown_tx, handle) = IdleSweeper::spawn(Arc::clone(&registry));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(registry.len(), 1);

        drop(shutdown_tx);
        let result = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(result.is_ok(), "sweeper should stop when the sender is dropped");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_falls_back_instead_of_panicking() {
        let config = GameConfig::new()
            .with_sweep_interval(Duration::ZERO)
            .with_idle_timeout(Duration::ZERO);
        let registry = Arc::new(GameRegistry::new(config));
        registry.start_game("r1", GameKind::TicTacToe, "a", "b").unwrap();

        let (shutdown_tx, handle) = IdleSweeper::spawn(Arc::clone(&registry));
        tokio::time::sleep(MIN_SWEEP_INTERVAL + Duration::from_millis(1)).await;
        assert!(registry.is_empty());

        shutdown_tx.send(true).unwrap();
        let joined = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(matches!(joined, Ok(Ok(()))), "sweeper task should not panic");
    }
}
