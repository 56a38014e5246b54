//! Actuator commands — what the server asks LED and valve motes to do.
//!
//! Outbound wire encoding (server → mote control port):
//!
//! | Command | Payload |
//! |---------|---------|
//! | LED | `colorCode/stateCode`, colors `1`=red `2`=green `3`=blue |
//! | Valve | bare `stateCode` |
//!
//! `stateCode` is `1` for on and `0` for off.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::MoteAddress;
use crate::error::ValidationError;

/// One of the three LEDs on a lamp mote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedColor {
    Red,
    Green,
    Blue,
}

impl LedColor {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Red => 1,
            Self::Green => 2,
            Self::Blue => 3,
        }
    }
}

impl FromStr for LedColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            other => Err(ValidationError::UnknownColor(other.to_string())),
        }
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("red"),
            Self::Green => f.write_str("green"),
            Self::Blue => f.write_str("blue"),
        }
    }
}

/// Target state of an LED or valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::On => 1,
            Self::Off => 0,
        }
    }
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl FromStr for SwitchState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(ValidationError::UnknownState(other.to_string())),
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// A single fire-and-forget instruction for an actuator mote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActuatorCommand {
    Led {
        address: MoteAddress,
        color: LedColor,
        state: SwitchState,
    },
    Valve {
        address: MoteAddress,
        state: SwitchState,
    },
}

impl ActuatorCommand {
    /// The mote this command is sent to.
    #[must_use]
    pub fn address(&self) -> MoteAddress {
        match self {
            Self::Led { address, .. } | Self::Valve { address, .. } => *address,
        }
    }

    /// Encode the control payload understood by the mote firmware.
    #[must_use]
    pub fn payload(&self) -> String {
        match self {
            Self::Led { color, state, .. } => format!("{}/{}", color.code(), state.code()),
            Self::Valve { state, .. } => state.code().to_string(),
        }
    }
}

impl fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Led {
                address,
                color,
                state,
            } => write!(f, "led {address} {color} {state}"),
            Self::Valve { address, state } => write!(f, "valve {address} {state}"),
        }
    }
}
