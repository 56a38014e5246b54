//! Gateway port — the outbound half of the mote datagram channel.

use std::future::Future;

use motehub_domain::actuator::ActuatorCommand;
use motehub_domain::error::MoteHubError;

/// Delivers actuator commands to motes.
///
/// Delivery is fire-and-forget: `Ok(())` means the command left the server,
/// not that the mote acted on it.
pub trait ActuatorGateway {
    /// Send one command to the mote named by [`ActuatorCommand::address`].
    fn send(
        &self,
        command: ActuatorCommand,
    ) -> impl Future<Output = Result<(), MoteHubError>> + Send;
}

impl<T: ActuatorGateway + Send + Sync> ActuatorGateway for std::sync::Arc<T> {
    fn send(
        &self,
        command: ActuatorCommand,
    ) -> impl Future<Output = Result<(), MoteHubError>> + Send {
        (**self).send(command)
    }
}
