//! Mote — a simulated sensor or actuator endpoint seen on the wire.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::MoteAddress;
use crate::time::Timestamp;

/// How many recent sensor readings a mote remembers.
pub const HISTORY_LEN: usize = 10;

/// What a mote is, inferred from the type code leading each payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoteKind {
    TemperatureSensor,
    ActivitySensor,
    LedActuator,
    ValveActuator,
}

impl MoteKind {
    /// Resolve a wire type code (`1`..=`4`).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::TemperatureSensor),
            "2" => Some(Self::ActivitySensor),
            "3" => Some(Self::LedActuator),
            "4" => Some(Self::ValveActuator),
            _ => None,
        }
    }

    /// Sensors report numeric values; actuators only send keep-alives.
    #[must_use]
    pub fn is_sensor(self) -> bool {
        matches!(self, Self::TemperatureSensor | Self::ActivitySensor)
    }
}

impl fmt::Display for MoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemperatureSensor => f.write_str("temperature sensor"),
            Self::ActivitySensor => f.write_str("activity sensor"),
            Self::LedActuator => f.write_str("led"),
            Self::ValveActuator => f.write_str("valve"),
        }
    }
}

/// Last known state of one mote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mote {
    pub address: MoteAddress,
    pub kind: MoteKind,
    /// Latest reading. Always `None` for actuators.
    pub last_value: Option<u64>,
    /// Most recent readings, oldest first, at most [`HISTORY_LEN`].
    pub history: VecDeque<u64>,
    pub last_seen: Timestamp,
}

impl Mote {
    /// A mote first heard from at `seen`.
    #[must_use]
    pub fn new(address: MoteAddress, kind: MoteKind, seen: Timestamp) -> Self {
        Self {
            address,
            kind,
            last_value: None,
            history: VecDeque::with_capacity(HISTORY_LEN),
            last_seen: seen,
        }
    }

    /// Refresh presence. `last_seen` never moves backwards.
    pub fn touch(&mut self, now: Timestamp) {
        if now > self.last_seen {
            self.last_seen = now;
        }
    }

    /// Store a fresh sensor reading.
    pub fn record(&mut self, value: u64) {
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(value);
        self.last_value = Some(value);
    }
}
