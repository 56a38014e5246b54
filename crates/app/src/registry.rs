//! In-process mote registry backed by a mutex-guarded map.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::TimeDelta;

use motehub_domain::address::MoteAddress;
use motehub_domain::mote::Mote;
use motehub_domain::telemetry::Telemetry;
use motehub_domain::time::{Timestamp, is_stale};

/// Last known telemetry for every mote currently heard from.
///
/// Holds at most one [`Mote`] per address. Every read-modify-write happens
/// under a single lock, so the ingest path, the operator path and the
/// sweeper can share one registry.
#[derive(Debug, Default)]
pub struct MoteRegistry {
    motes: Mutex<HashMap<MoteAddress, Mote>>,
}

impl MoteRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<MoteAddress, Mote>> {
        self.motes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a datagram from `address`.
    ///
    /// Unknown addresses are inserted. Known addresses always get their
    /// `last_seen` refreshed; the reading (and the kind) is only replaced by a
    /// data packet, never by a keep-alive.
    pub fn upsert(&self, address: MoteAddress, telemetry: &Telemetry, now: Timestamp) {
        let mut motes = self.lock();
        let mote = motes
            .entry(address)
            .or_insert_with(|| Mote::new(address, telemetry.kind(), now));
        mote.touch(now);
        if let Some(value) = telemetry.value() {
            mote.kind = telemetry.kind();
            mote.record(value);
        }
    }

    #[must_use]
    pub fn get(&self, address: MoteAddress) -> Option<Mote> {
        self.lock().get(&address).cloned()
    }

    /// Whether `address` is currently registered.
    #[must_use]
    pub fn contains(&self, address: MoteAddress) -> bool {
        self.lock().contains_key(&address)
    }

    /// Snapshot of every registered mote, in no particular order.
    #[must_use]
    pub fn all(&self) -> Vec<Mote> {
        self.lock().values().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove every mote whose `last_seen + timeout < now`.
    ///
    /// Returns the evicted addresses. Nothing is remembered about them.
    pub fn evict_older_than(&self, now: Timestamp, timeout: TimeDelta) -> Vec<MoteAddress> {
        let mut motes = self.lock();
        let stale: Vec<MoteAddress> = motes
            .values()
            .filter(|mote| is_stale(mote.last_seen, now, timeout))
            .map(|mote| mote.address)
            .collect();
        for address in &stale {
            motes.remove(address);
        }
        stale
    }
}
