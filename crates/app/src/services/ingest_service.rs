//! Ingest service — handles one inbound mote datagram end to end.
//!
//! Parse, refresh the registry, then (for sensor readings only) evaluate the
//! source's automations and hand each resulting command to the gateway.
//! Malformed payloads are dropped without touching any state.

use motehub_domain::actuator::ActuatorCommand;
use motehub_domain::address::MoteAddress;
use motehub_domain::telemetry::Telemetry;
use motehub_domain::time::Timestamp;

use crate::automation_engine::AutomationEngine;
use crate::context::ServerContext;
use crate::ports::ActuatorGateway;

/// Application service for the receive path.
pub struct IngestService<G> {
    ctx: ServerContext,
    engine: AutomationEngine,
    gateway: G,
}

impl<G: ActuatorGateway> IngestService<G> {
    /// Create a new service over the shared context, delivering through `gateway`.
    pub fn new(ctx: ServerContext, gateway: G) -> Self {
        let engine = AutomationEngine::new(&ctx);
        Self {
            ctx,
            engine,
            gateway,
        }
    }

    /// Process one datagram received from `sender` at `now`.
    ///
    /// Returns the commands that were dispatched (whether or not each send
    /// succeeded). A malformed payload yields an empty list.
    pub async fn on_datagram(
        &self,
        sender: MoteAddress,
        payload: &[u8],
        now: Timestamp,
    ) -> Vec<ActuatorCommand> {
        let telemetry = match Telemetry::parse(payload) {
            Ok(telemetry) => telemetry,
            Err(err) => {
                tracing::trace!(%sender, error = %err, "dropping malformed datagram");
                return Vec::new();
            }
        };

        if self.ctx.is_verbose() {
            tracing::info!(%sender, kind = %telemetry.kind(), value = ?telemetry.value(), "telemetry");
        } else {
            tracing::debug!(%sender, kind = %telemetry.kind(), value = ?telemetry.value(), "telemetry");
        }

        self.ctx.registry().upsert(sender, &telemetry, now);

        let Some(value) = telemetry.value() else {
            return Vec::new();
        };

        let commands = self.engine.evaluate(sender, value);
        for command in &commands {
            if let Err(err) = self.gateway.send(*command).await {
                tracing::warn!(%command, error = %err, "failed to deliver automation command");
            }
        }
        commands
    }
}
