//! Rule — the reading → actuator effect carried by an automation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::actuator::{ActuatorCommand, LedColor, SwitchState};
use crate::address::MoteAddress;
use crate::error::ValidationError;
use crate::validation::{MAX_THRESHOLD, is_all_digits};

/// Temperature threshold in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Threshold(u8);

impl Threshold {
    #[must_use]
    pub fn get(self) -> u64 {
        u64::from(self.0)
    }
}

impl TryFrom<u64> for Threshold {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > MAX_THRESHOLD {
            return Err(ValidationError::ThresholdOutOfRange(value));
        }
        u8::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::ThresholdOutOfRange(value))
    }
}

impl From<Threshold> for u64 {
    fn from(threshold: Threshold) -> Self {
        threshold.get()
    }
}

impl FromStr for Threshold {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_all_digits(s) {
            return Err(ValidationError::ThresholdNotNumeric(s.to_string()));
        }
        // All digits but too long for u64 is still out of range.
        let value = s.parse::<u64>().unwrap_or(u64::MAX);
        Self::try_from(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What an automation does with its source's readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Activity `1` turns the LED color on, `0` turns it off.
    ActivityToLed { color: LedColor },
    /// Opens the valve while the temperature is at or below the threshold.
    TemperatureToValve { threshold: Threshold },
}

impl Rule {
    /// Compute the actuator effect of `value` on `destination`, if any.
    #[must_use]
    pub fn effect(&self, destination: MoteAddress, value: u64) -> Option<ActuatorCommand> {
        match self {
            Self::ActivityToLed { color } => {
                let state = match value {
                    1 => SwitchState::On,
                    0 => SwitchState::Off,
                    _ => return None,
                };
                Some(ActuatorCommand::Led {
                    address: destination,
                    color: *color,
                    state,
                })
            }
            Self::TemperatureToValve { threshold } => Some(ActuatorCommand::Valve {
                address: destination,
                state: SwitchState::from(value <= threshold.get()),
            }),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActivityToLed { color } => write!(f, "activity -> led {color}"),
            Self::TemperatureToValve { threshold } => {
                write!(f, "temperature <= {threshold} -> valve on")
            }
        }
    }
}
