//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.

/// Top-level error shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum MoteHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// An adapter failed to move a datagram on or off the wire.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A value supplied by an operator failed its domain check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0:?} is not a valid IPv6 address")]
    InvalidAddress(String),

    #[error("unknown LED color {0:?}, expected red, green or blue")]
    UnknownColor(String),

    #[error("unknown state {0:?}, expected on or off")]
    UnknownState(String),

    #[error("threshold {0:?} is not a decimal number")]
    ThresholdNotNumeric(String),

    #[error("threshold {0} is outside 0..=100")]
    ThresholdOutOfRange(u64),

    #[error("automation id must not be empty")]
    EmptyAutomationId,
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Why a mote datagram could not be decoded into telemetry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadParseError {
    #[error("payload is not valid UTF-8")]
    NotUtf8,

    #[error("expected 2 comma-separated fields, got {0}")]
    WrongArity(usize),

    #[error("unknown mote type code {0:?}")]
    UnknownTypeCode(String),

    #[error("sensor value {0:?} is not a decimal number")]
    NonNumericValue(String),

    #[error("actuator payload {0:?} is not a keep-alive")]
    ExpectedKeepAlive(String),
}
