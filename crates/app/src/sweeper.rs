//! Liveness sweeper — periodically evicts motes that went silent.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use tokio::task::JoinHandle;

use motehub_domain::address::MoteAddress;
use motehub_domain::time::{self, Timestamp};

use crate::registry::MoteRegistry;

/// Evicts registry entries whose last datagram is older than a timeout.
///
/// Only the registry is touched: automations pointing at an evicted mote
/// stay in place and are simply suppressed by the engine.
#[derive(Debug, Clone)]
pub struct LivenessSweeper {
    registry: Arc<MoteRegistry>,
    timeout: TimeDelta,
    interval: Duration,
}

impl LivenessSweeper {
    /// Create a sweeper that runs every `interval` and evicts motes silent
    /// for longer than `timeout`.
    #[must_use]
    pub fn new(registry: Arc<MoteRegistry>, timeout: TimeDelta, interval: Duration) -> Self {
        Self {
            registry,
            timeout,
            interval,
        }
    }

    /// Run a single sweep at `now`, returning the evicted addresses.
    pub fn sweep(&self, now: Timestamp) -> Vec<MoteAddress> {
        let evicted = self.registry.evict_older_than(now, self.timeout);
        for address in &evicted {
            tracing::info!(%address, "mote timed out, removed from registry");
        }
        evicted
    }

    /// Sweep forever on a fixed interval.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.sweep(time::now());
        }
    }

    /// Spawn [`run`](Self::run) on the current runtime.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tracing::info!(
            timeout_secs = self.timeout.num_seconds(),
            interval_secs = self.interval.as_secs(),
            "liveness sweeper started"
        );
        tokio::spawn(self.run())
    }
}
