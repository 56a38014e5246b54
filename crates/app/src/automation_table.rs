//! In-process automation table — rules grouped by source mote.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use motehub_domain::address::MoteAddress;
use motehub_domain::automation::Automation;
use motehub_domain::id::AutomationId;

/// Automation rules keyed by the mote whose readings drive them.
///
/// Each source's rules are kept in creation order. One lock guards the
/// whole table.
#[derive(Debug, Default)]
pub struct AutomationTable {
    by_source: Mutex<HashMap<MoteAddress, Vec<Automation>>>,
}

impl AutomationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<MoteAddress, Vec<Automation>>> {
        self.by_source.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an automation to its source's rule list.
    pub fn insert(&self, automation: Automation) -> AutomationId {
        let id = automation.id;
        self.lock()
            .entry(automation.source)
            .or_default()
            .push(automation);
        id
    }

    /// Remove the automation with `id`. Returns whether it existed.
    pub fn remove(&self, id: AutomationId) -> bool {
        let mut table = self.lock();
        let Some((source, index)) = table.iter().find_map(|(source, rules)| {
            rules
                .iter()
                .position(|rule| rule.id == id)
                .map(|index| (*source, index))
        }) else {
            return false;
        };

        if let Some(rules) = table.get_mut(&source) {
            rules.remove(index);
            if rules.is_empty() {
                table.remove(&source);
            }
        }
        true
    }

    /// Stable snapshot of the rules owned by `source`, in creation order.
    #[must_use]
    pub fn rules_for(&self, source: MoteAddress) -> Vec<Automation> {
        self.lock().get(&source).cloned().unwrap_or_default()
    }

    /// Snapshot of every automation, oldest first.
    #[must_use]
    pub fn all(&self) -> Vec<Automation> {
        let mut all: Vec<Automation> = self.lock().values().flatten().cloned().collect();
        all.sort_by_key(|automation| automation.created_at);
        all
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
