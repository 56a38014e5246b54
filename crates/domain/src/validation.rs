//! Value validators shared by the command grammar and the telemetry decoder.
//!
//! Token-level checks (addresses, colors, states, thresholds) live in the
//! `FromStr` impls of [`MoteAddress`](crate::address::MoteAddress),
//! [`LedColor`](crate::actuator::LedColor),
//! [`SwitchState`](crate::actuator::SwitchState) and
//! [`Threshold`](crate::automation::Threshold).

/// Maximum threshold accepted by a temperature automation.
pub const MAX_THRESHOLD: u64 = 100;

/// Whether `value` is a non-empty run of ASCII digits.
///
/// Signs, whitespace and decimal points are all rejected.
#[must_use]
pub fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_plain_digits() {
        assert!(is_all_digits("0"));
        assert!(is_all_digits("042"));
    }

    #[test]
    fn should_reject_signed_or_empty_digits() {
        assert!(!is_all_digits(""));
        assert!(!is_all_digits("-5"));
        assert!(!is_all_digits("+5"));
        assert!(!is_all_digits("4.2"));
        assert!(!is_all_digits(" 4"));
    }
}
