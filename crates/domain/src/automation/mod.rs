//! Automation — standing sensor → actuator rules.
//!
//! An automation watches one source mote. Whenever that mote reports a new
//! reading, the automation's [`Rule`] turns it into at most one
//! [`ActuatorCommand`] aimed at the destination mote. Automations are
//! immutable: they are only ever created or removed.

mod rule;

pub use rule::{Rule, Threshold};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actuator::ActuatorCommand;
use crate::address::MoteAddress;
use crate::id::AutomationId;
use crate::time::Timestamp;

/// A rule binding a sensor mote to an actuator mote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automation {
    pub id: AutomationId,
    pub source: MoteAddress,
    pub destination: MoteAddress,
    pub rule: Rule,
    pub created_at: Timestamp,
}

impl Automation {
    /// Create an automation with a fresh id.
    #[must_use]
    pub fn new(
        source: MoteAddress,
        destination: MoteAddress,
        rule: Rule,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: AutomationId::new(),
            source,
            destination,
            rule,
            created_at,
        }
    }

    /// The command this automation issues for a reading from its source.
    #[must_use]
    pub fn effect(&self, value: u64) -> Option<ActuatorCommand> {
        self.rule.effect(self.destination, value)
    }
}

impl fmt::Display for Automation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} @ {}",
            self.id, self.source, self.rule, self.destination
        )
    }
}
