//! Automation service — use-cases for managing automations.

use std::sync::Arc;

use motehub_domain::address::MoteAddress;
use motehub_domain::automation::{Automation, Rule};
use motehub_domain::error::{MoteHubError, NotFoundError, ValidationError};
use motehub_domain::id::AutomationId;
use motehub_domain::time::now;

use crate::automation_table::AutomationTable;
use crate::context::ServerContext;

/// Application service for creating, removing and listing automations.
#[derive(Debug, Clone)]
pub struct AutomationService {
    table: Arc<AutomationTable>,
}

impl AutomationService {
    /// Create a new service over the context's automation table.
    #[must_use]
    pub fn new(ctx: &ServerContext) -> Self {
        Self {
            table: Arc::clone(ctx.automations()),
        }
    }

    /// Register a new automation and return it with its fresh id.
    ///
    /// The rule's parameter is already range-checked by its type, so this
    /// cannot fail.
    #[tracing::instrument(skip(self))]
    pub fn create_automation(
        &self,
        source: MoteAddress,
        destination: MoteAddress,
        rule: Rule,
    ) -> Automation {
        let automation = Automation::new(source, destination, rule, now());
        self.table.insert(automation.clone());
        tracing::info!(automation_id = %automation.id, "automation created");
        automation
    }

    /// Remove the automation whose id reads `id`.
    ///
    /// Removing twice is harmless: the second call reports not found and
    /// leaves every other automation untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `id` is empty, or
    /// [`NotFoundError`] if no automation has that id (including when `id`
    /// is not a well-formed identifier).
    #[tracing::instrument(skip(self))]
    pub fn remove_automation(&self, id: &str) -> Result<AutomationId, MoteHubError> {
        if id.is_empty() {
            return Err(ValidationError::EmptyAutomationId.into());
        }
        let not_found = || NotFoundError {
            entity: "automation",
            id: id.to_string(),
        };
        let parsed = id.parse::<AutomationId>().map_err(|_| not_found())?;
        if !self.table.remove(parsed) {
            return Err(not_found().into());
        }
        tracing::info!(automation_id = %parsed, "automation removed");
        Ok(parsed)
    }

    /// List all automations, oldest first.
    #[must_use]
    pub fn list_automations(&self) -> Vec<Automation> {
        self.table.all()
    }
}
