//! Telemetry — the payload a mote pushes to the server.
//!
//! Pure functions over raw datagram bytes. The wire format is ASCII text,
//! `typeCode,value`:
//!
//! | Type code | Kind | Value |
//! |-----------|------|-------|
//! | `1` | Temperature sensor | decimal integer |
//! | `2` | Activity sensor | decimal integer (`0` / `1`) |
//! | `3` | LED actuator | `KEEP_ALIVE` |
//! | `4` | Valve actuator | `KEEP_ALIVE` |

use crate::error::PayloadParseError;
use crate::mote::MoteKind;
use crate::validation::is_all_digits;

/// Literal sent by actuators to signal they are still alive.
pub const KEEP_ALIVE: &str = "KEEP_ALIVE";

const FIELD_DELIMITER: char = ',';

/// One decoded mote datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Telemetry {
    /// A sensor reading carrying a fresh value.
    Reading { kind: MoteKind, value: u64 },
    /// An actuator keep-alive; carries no data.
    KeepAlive { kind: MoteKind },
}

impl Telemetry {
    /// Decode a raw datagram.
    ///
    /// Trailing NULs and surrounding whitespace are ignored, since some mote
    /// firmware pads its buffers.
    ///
    /// # Errors
    ///
    /// Returns a [`PayloadParseError`] when the payload is not UTF-8, does not
    /// have exactly two fields, carries an unknown type code, or has a value
    /// that does not fit the kind (digits for sensors, [`KEEP_ALIVE`] for
    /// actuators).
    pub fn parse(payload: &[u8]) -> Result<Self, PayloadParseError> {
        let text = std::str::from_utf8(payload).map_err(|_| PayloadParseError::NotUtf8)?;
        let text = text.trim_end_matches('\0').trim();

        let fields: Vec<&str> = text.split(FIELD_DELIMITER).collect();
        let [code, value] = fields.as_slice() else {
            return Err(PayloadParseError::WrongArity(fields.len()));
        };

        let kind = MoteKind::from_code(code)
            .ok_or_else(|| PayloadParseError::UnknownTypeCode((*code).to_string()))?;

        if kind.is_sensor() {
            if !is_all_digits(value) {
                return Err(PayloadParseError::NonNumericValue((*value).to_string()));
            }
            let value = value
                .parse()
                .map_err(|_| PayloadParseError::NonNumericValue((*value).to_string()))?;
            Ok(Self::Reading { kind, value })
        } else if *value == KEEP_ALIVE {
            Ok(Self::KeepAlive { kind })
        } else {
            Err(PayloadParseError::ExpectedKeepAlive((*value).to_string()))
        }
    }

    #[must_use]
    pub fn kind(&self) -> MoteKind {
        match self {
            Self::Reading { kind, .. } | Self::KeepAlive { kind } => *kind,
        }
    }

    /// The reading, if this datagram carries one.
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        match self {
            Self::Reading { value, .. } => Some(*value),
            Self::KeepAlive { .. } => None,
        }
    }

    #[must_use]
    pub fn is_keep_alive(&self) -> bool {
        matches!(self, Self::KeepAlive { .. })
    }
}
