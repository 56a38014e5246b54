//! Shared server state handed to every component.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::automation_table::AutomationTable;
use crate::registry::MoteRegistry;

/// Cheaply cloneable handle over the server's in-memory state.
///
/// The mote registry and the automation table are each guarded by their own
/// lock; the verbose flag is toggled by the `verbose/on|off` command.
#[derive(Debug, Clone, Default)]
pub struct ServerContext {
    registry: Arc<MoteRegistry>,
    automations: Arc<AutomationTable>,
    verbose: Arc<AtomicBool>,
}

impl ServerContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<MoteRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn automations(&self) -> &Arc<AutomationTable> {
        &self.automations
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    pub fn set_verbose(&self, enabled: bool) {
        self.verbose.store(enabled, Ordering::Relaxed);
    }
}
