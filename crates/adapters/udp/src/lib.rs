//! # motehub-adapter-udp
//!
//! UDP adapter — the datagram channel between the server and its motes.
//!
//! ## How it works
//!
//! One socket serves both directions. Motes send telemetry (`"<type>,<value>"`)
//! to the server's bind port; the receive loop hands each datagram, together
//! with the sender's address, to the [`IngestService`]. Actuator commands go
//! out from the same socket to `<mote address>:<mote_port>`.
//!
//! IPv4 senders are identified by their IPv4-mapped IPv6 address. When the
//! socket itself is IPv4, commands for such addresses are unmapped before
//! sending.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `motehub-app` and `motehub-domain`.

mod config;
mod error;

pub use config::UdpConfig;
pub use error::UdpError;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

use motehub_app::ports::ActuatorGateway;
use motehub_app::services::ingest_service::IngestService;
use motehub_domain::actuator::ActuatorCommand;
use motehub_domain::address::MoteAddress;
use motehub_domain::error::MoteHubError;
use motehub_domain::time;

/// Bound UDP socket shared by the receive loop and the command sender.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    socket: Arc<UdpSocket>,
    mote_port: u16,
    max_datagram_size: usize,
}

impl UdpTransport {
    /// Bind the listening socket described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`UdpError::Bind`] if the address is invalid or already in use.
    pub async fn bind(config: &UdpConfig) -> Result<Self, UdpError> {
        let addr = config.bind_addr();
        let socket = UdpSocket::bind(&addr)
            .await
            .map_err(|source| UdpError::Bind {
                addr: addr.clone(),
                source,
            })?;

        let transport = Self {
            socket: Arc::new(socket),
            mote_port: config.mote_port,
            max_datagram_size: config.max_datagram_size,
        };
        tracing::info!(addr = %addr, mote_port = config.mote_port, "UDP socket bound");
        Ok(transport)
    }

    /// The address the socket actually bound to.
    ///
    /// # Errors
    ///
    /// Returns [`UdpError::Receive`] if the OS cannot report the address.
    pub fn local_addr(&self) -> Result<SocketAddr, UdpError> {
        self.socket.local_addr().map_err(UdpError::Receive)
    }

    /// Where a command for `address` must be sent from this socket.
    fn destination(&self, address: MoteAddress) -> Result<SocketAddr, UdpError> {
        let ip = address.ip();
        let ipv4_socket = matches!(self.socket.local_addr(), Ok(SocketAddr::V4(_)));
        if ipv4_socket {
            let v4 = ip
                .to_ipv4_mapped()
                .ok_or(UdpError::AddressFamily(address))?;
            Ok(SocketAddr::new(IpAddr::V4(v4), self.mote_port))
        } else {
            Ok(SocketAddr::new(IpAddr::V6(ip), self.mote_port))
        }
    }

    async fn send_payload(&self, command: ActuatorCommand) -> Result<(), UdpError> {
        let destination = self.destination(command.address())?;
        let payload = command.payload();
        self.socket
            .send_to(payload.as_bytes(), destination)
            .await
            .map_err(|source| UdpError::Send {
                destination,
                source,
            })?;
        tracing::debug!(%destination, %payload, "command sent");
        Ok(())
    }

    /// Spawn the receive loop, feeding every datagram to `ingest`.
    ///
    /// The loop only ends when the returned handle is aborted. Socket errors
    /// are logged and the loop keeps receiving. Datagrams longer than the
    /// configured maximum are dropped.
    pub fn spawn_receiver<G>(&self, ingest: Arc<IngestService<G>>) -> JoinHandle<()>
    where
        G: ActuatorGateway + Send + Sync + 'static,
    {
        let socket = Arc::clone(&self.socket);
        let max_datagram_size = self.max_datagram_size;
        tokio::spawn(async move {
            // One spare byte tells an oversized datagram apart from a full one.
            let mut buf = vec![0u8; max_datagram_size + 1];
            loop {
                match socket.recv_from(&mut buf).await {
                    Ok((len, peer)) => {
                        let sender = MoteAddress::from(peer.ip());
                        if len > max_datagram_size {
                            tracing::trace!(%sender, len, "dropping oversized datagram");
                            continue;
                        }
                        tracing::trace!(%sender, len, "datagram received");
                        ingest.on_datagram(sender, &buf[..len], time::now()).await;
                    }
                    Err(err) => {
                        tracing::warn!(error = %UdpError::Receive(err), "receive failed");
                    }
                }
            }
        })
    }
}

impl ActuatorGateway for UdpTransport {
    async fn send(&self, command: ActuatorCommand) -> Result<(), MoteHubError> {
        self.send_payload(command).await.map_err(UdpError::into_domain)
    }
}
