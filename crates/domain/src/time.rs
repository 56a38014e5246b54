//! Time and timestamp helpers.

use chrono::{DateTime, TimeDelta, Utc};

/// UTC timestamp used for `last_seen`, automation creation times, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Whether something last seen at `last_seen` has gone stale at `now`.
///
/// The boundary is exclusive: a mote seen exactly `timeout` ago is still live.
#[must_use]
pub fn is_stale(last_seen: Timestamp, now: Timestamp, timeout: TimeDelta) -> bool {
    now.signed_duration_since(last_seen) > timeout
}
