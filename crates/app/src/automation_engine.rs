//! Automation engine — turns a fresh sensor reading into actuator commands.
//!
//! For each reading, the engine takes a snapshot of the source's rules and,
//! rule by rule in creation order, computes the actuator effect. A rule only
//! fires while its destination mote is present in the registry; rules aimed
//! at a silent mote are kept but produce nothing until it comes back.

use std::sync::Arc;

use motehub_domain::actuator::ActuatorCommand;
use motehub_domain::address::MoteAddress;

use crate::automation_table::AutomationTable;
use crate::context::ServerContext;
use crate::registry::MoteRegistry;

/// Read-only evaluator over the automation table and the mote registry.
#[derive(Debug, Clone)]
pub struct AutomationEngine {
    automations: Arc<AutomationTable>,
    registry: Arc<MoteRegistry>,
}

impl AutomationEngine {
    /// Create an engine over the context's tables.
    #[must_use]
    pub fn new(ctx: &ServerContext) -> Self {
        Self {
            automations: Arc::clone(ctx.automations()),
            registry: Arc::clone(ctx.registry()),
        }
    }

    /// Evaluate every rule owned by `source` against `value`.
    ///
    /// Each rule yields at most one command. Neither table is modified.
    #[must_use]
    pub fn evaluate(&self, source: MoteAddress, value: u64) -> Vec<ActuatorCommand> {
        let rules = self.automations.rules_for(source);
        let mut commands = Vec::with_capacity(rules.len());

        for automation in &rules {
            if !self.registry.contains(automation.destination) {
                tracing::debug!(
                    automation_id = %automation.id,
                    destination = %automation.destination,
                    "destination absent, automation suppressed"
                );
                continue;
            }
            if let Some(command) = automation.effect(value) {
                commands.push(command);
            }
        }

        commands
    }
}
