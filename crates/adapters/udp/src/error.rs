//! UDP adapter error types.

use std::net::SocketAddr;

use motehub_domain::address::MoteAddress;
use motehub_domain::error::MoteHubError;

/// Errors specific to the UDP adapter.
#[derive(Debug, thiserror::Error)]
pub enum UdpError {
    /// The listening socket could not be bound.
    #[error("failed to bind UDP socket on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// A datagram could not be handed to the network stack.
    #[error("failed to send datagram to {destination}")]
    Send {
        destination: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The socket reported an error while receiving.
    #[error("failed to receive datagram")]
    Receive(#[source] std::io::Error),

    /// The destination is not reachable from the socket's address family.
    #[error("mote {0} is not reachable over IPv4")]
    AddressFamily(MoteAddress),
}

impl UdpError {
    /// Convert into a [`MoteHubError::Transport`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> MoteHubError {
        MoteHubError::Transport(Box::new(self))
    }
}

impl From<UdpError> for MoteHubError {
    fn from(err: UdpError) -> Self {
        err.into_domain()
    }
}
