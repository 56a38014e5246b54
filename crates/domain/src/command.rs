//! Operator command grammar.
//!
//! One free-text line maps to exactly one [`Command`]. Matchers are tried in
//! a fixed order; each either declines the line (its literal prefix does not
//! match) or claims it. A claimed line that fails field validation becomes
//! [`Command::Invalid`] and is never offered to a later matcher.

use crate::actuator::{LedColor, SwitchState};
use crate::address::MoteAddress;
use crate::automation::Rule;

/// Usage text printed by `help`.
pub const HELP: &str = "\
Commands:
  help                                                         show this help
  verbose/on | verbose/off                                     echo incoming telemetry
  stop                                                         stop listening to motes
  show motes                                                   list live motes
  show automations                                             list automations
  led/<addr>/<red|green|blue>/<on|off>                         drive an LED
  valve/<addr>/<on|off>                                        drive a valve
  automate sensor_activity/<src>/led/<dst>/<red|green|blue>    mirror activity on an LED
  automate sensor_temperature/<src>/valve/<dst>/<0-100>        open valve at or below threshold
  remove automation/<id>                                       delete an automation
  exit                                                         quit";

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Verbose {
        enabled: bool,
    },
    Stop,
    ShowMotes,
    ShowAutomations,
    Led {
        address: MoteAddress,
        color: LedColor,
        state: SwitchState,
    },
    Valve {
        address: MoteAddress,
        state: SwitchState,
    },
    /// Create an automation; the rule's parameter is already validated.
    Automate {
        source: MoteAddress,
        destination: MoteAddress,
        rule: Rule,
    },
    RemoveAutomation {
        id: String,
    },
    Exit,
    Invalid,
}

type Matcher = fn(&str) -> Option<Command>;

const MATCHERS: &[Matcher] = &[
    match_help,
    match_verbose,
    match_stop,
    match_show,
    match_led,
    match_valve,
    match_activity_automation,
    match_temperature_automation,
    match_remove_automation,
    match_exit,
];

impl Command {
    /// Classify one operator line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        MATCHERS
            .iter()
            .find_map(|matcher| matcher(line))
            .unwrap_or(Self::Invalid)
    }
}

fn match_help(line: &str) -> Option<Command> {
    (line == "help").then_some(Command::Help)
}

fn match_verbose(line: &str) -> Option<Command> {
    let rest = line.strip_prefix("verbose/")?;
    Some(match rest {
        "on" => Command::Verbose { enabled: true },
        "off" => Command::Verbose { enabled: false },
        _ => Command::Invalid,
    })
}

fn match_stop(line: &str) -> Option<Command> {
    (line == "stop").then_some(Command::Stop)
}

fn match_show(line: &str) -> Option<Command> {
    match line {
        "show motes" => Some(Command::ShowMotes),
        "show automations" => Some(Command::ShowAutomations),
        _ => None,
    }
}

fn match_led(line: &str) -> Option<Command> {
    let rest = line.strip_prefix("led/")?;
    Some(or_invalid(|| {
        let [address, color, state] = split_fields::<3>(rest)?;
        Some(Command::Led {
            address: address.parse().ok()?,
            color: color.parse().ok()?,
            state: state.parse().ok()?,
        })
    }))
}

fn match_valve(line: &str) -> Option<Command> {
    let rest = line.strip_prefix("valve/")?;
    Some(or_invalid(|| {
        let [address, state] = split_fields::<2>(rest)?;
        Some(Command::Valve {
            address: address.parse().ok()?,
            state: state.parse().ok()?,
        })
    }))
}

fn match_activity_automation(line: &str) -> Option<Command> {
    let rest = line.strip_prefix("automate sensor_activity/")?;
    Some(or_invalid(|| {
        let [source, "led", destination, color] = split_fields::<4>(rest)? else {
            return None;
        };
        Some(Command::Automate {
            source: source.parse().ok()?,
            destination: destination.parse().ok()?,
            rule: Rule::ActivityToLed {
                color: color.parse().ok()?,
            },
        })
    }))
}

fn match_temperature_automation(line: &str) -> Option<Command> {
    let rest = line.strip_prefix("automate sensor_temperature/")?;
    Some(or_invalid(|| {
        let [source, "valve", destination, threshold] = split_fields::<4>(rest)? else {
            return None;
        };
        Some(Command::Automate {
            source: source.parse().ok()?,
            destination: destination.parse().ok()?,
            rule: Rule::TemperatureToValve {
                threshold: threshold.parse().ok()?,
            },
        })
    }))
}

fn match_remove_automation(line: &str) -> Option<Command> {
    let id = line.strip_prefix("remove automation/")?;
    let is_token = !id.is_empty() && !id.contains('/') && !id.contains(char::is_whitespace);
    Some(if is_token {
        Command::RemoveAutomation { id: id.to_string() }
    } else {
        Command::Invalid
    })
}

fn match_exit(line: &str) -> Option<Command> {
    (line == "exit").then_some(Command::Exit)
}

/// Split `/`-delimited segments, requiring exactly `N` of them.
fn split_fields<const N: usize>(rest: &str) -> Option<[&str; N]> {
    let fields: Vec<&str> = rest.split('/').collect();
    <[&str; N]>::try_from(fields).ok()
}

fn or_invalid(build: impl FnOnce() -> Option<Command>) -> Command {
    build().unwrap_or(Command::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::Threshold;

    fn addr(s: &str) -> MoteAddress {
        s.parse().unwrap()
    }

    #[test]
    fn should_parse_keyword_commands() {
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("stop"), Command::Stop);
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("show motes"), Command::ShowMotes);
        assert_eq!(Command::parse("show automations"), Command::ShowAutomations);
        assert_eq!(
            Command::parse("verbose/on"),
            Command::Verbose { enabled: true }
        );
        assert_eq!(
            Command::parse("verbose/off"),
            Command::Verbose { enabled: false }
        );
    }

    #[test]
    fn should_ignore_surrounding_whitespace() {
        assert_eq!(Command::parse("  show motes\r\n"), Command::ShowMotes);
    }

    #[test]
    fn should_be_case_sensitive() {
        assert_eq!(Command::parse("HELP"), Command::Invalid);
        assert_eq!(Command::parse("led/::1/Red/on"), Command::Invalid);
    }

    #[test]
    fn should_parse_led_command() {
        assert_eq!(
            Command::parse("led/bbbb::c30c:0:0:2/red/on"),
            Command::Led {
                address: addr("bbbb::c30c:0:0:2"),
                color: LedColor::Red,
                state: SwitchState::On,
            }
        );
    }

    #[test]
    fn should_reject_led_command_with_bad_fields() {
        assert_eq!(Command::parse("led/not-an-ip/red/on"), Command::Invalid);
        assert_eq!(Command::parse("led/::1/pink/on"), Command::Invalid);
        assert_eq!(Command::parse("led/::1/red/maybe"), Command::Invalid);
        assert_eq!(Command::parse("led/::1/red"), Command::Invalid);
        assert_eq!(Command::parse("led/::1/red/on/extra"), Command::Invalid);
    }

    #[test]
    fn should_parse_valve_command() {
        assert_eq!(
            Command::parse("valve/bbbb::c30c:0:0:3/off"),
            Command::Valve {
                address: addr("bbbb::c30c:0:0:3"),
                state: SwitchState::Off,
            }
        );
        assert_eq!(Command::parse("valve/bbbb::zz/off"), Command::Invalid);
    }

    #[test]
    fn should_parse_activity_automation() {
        assert_eq!(
            Command::parse("automate sensor_activity/bbbb::c30c:0:0:1/led/bbbb::c30c:0:0:2/green"),
            Command::Automate {
                source: addr("bbbb::c30c:0:0:1"),
                destination: addr("bbbb::c30c:0:0:2"),
                rule: Rule::ActivityToLed {
                    color: LedColor::Green
                },
            }
        );
    }

    #[test]
    fn should_parse_temperature_automation() {
        assert_eq!(
            Command::parse(
                "automate sensor_temperature/bbbb::c30c:0:0:1/valve/bbbb::c30c:0:0:2/40"
            ),
            Command::Automate {
                source: addr("bbbb::c30c:0:0:1"),
                destination: addr("bbbb::c30c:0:0:2"),
                rule: Rule::TemperatureToValve {
                    threshold: Threshold::try_from(40).unwrap()
                },
            }
        );
    }

    #[test]
    fn should_reject_threshold_out_of_range() {
        assert_eq!(
            Command::parse(
                "automate sensor_temperature/bbbb::c30c:0:0:1/valve/bbbb::c30c:0:0:2/150"
            ),
            Command::Invalid
        );
        assert_eq!(
            Command::parse(
                "automate sensor_temperature/bbbb::c30c:0:0:1/valve/bbbb::c30c:0:0:2/-1"
            ),
            Command::Invalid
        );
        assert_eq!(
            Command::parse(
                "automate sensor_temperature/bbbb::c30c:0:0:1/valve/bbbb::c30c:0:0:2/abc"
            ),
            Command::Invalid
        );
    }

    #[test]
    fn should_reject_automation_with_wrong_actuator_keyword() {
        assert_eq!(
            Command::parse("automate sensor_activity/::1/valve/::2/red"),
            Command::Invalid
        );
        assert_eq!(
            Command::parse("automate sensor_temperature/::1/led/::2/40"),
            Command::Invalid
        );
    }

    #[test]
    fn should_reject_automation_with_invalid_address() {
        assert_eq!(
            Command::parse("automate sensor_activity/::1/led/nowhere/red"),
            Command::Invalid
        );
    }

    #[test]
    fn should_parse_remove_automation() {
        assert_eq!(
            Command::parse("remove automation/abc-123"),
            Command::RemoveAutomation {
                id: "abc-123".to_string()
            }
        );
        assert_eq!(Command::parse("remove automation/"), Command::Invalid);
        assert_eq!(Command::parse("remove automation/a/b"), Command::Invalid);
    }

    #[test]
    fn should_not_fall_through_after_prefix_match() {
        assert_eq!(Command::parse("verbose/loud"), Command::Invalid);
        assert_eq!(Command::parse("valve/::1/on/led"), Command::Invalid);
    }

    #[test]
    fn should_classify_unknown_lines_as_invalid() {
        assert_eq!(Command::parse(""), Command::Invalid);
        assert_eq!(Command::parse("show"), Command::Invalid);
        assert_eq!(Command::parse("please help"), Command::Invalid);
    }
}
