//! UDP transport configuration.

use serde::Deserialize;

/// Configuration for the mote datagram channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UdpConfig {
    /// Local address to listen on. `::` accepts both IPv6 and IPv4-mapped traffic.
    pub bind_host: String,
    /// Local UDP port motes send telemetry to.
    pub bind_port: u16,
    /// UDP port motes listen on for actuator commands.
    pub mote_port: u16,
    /// Receive buffer size; longer datagrams are dropped.
    pub max_datagram_size: usize,
}

impl UdpConfig {
    /// The `host:port` pair to bind, with IPv6 literals bracketed.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        if self.bind_host.contains(':') && !self.bind_host.starts_with('[') {
            format!("[{}]:{}", self.bind_host, self.bind_port)
        } else {
            format!("{}:{}", self.bind_host, self.bind_port)
        }
    }
}

impl Default for UdpConfig {
    fn default() -> Self {
        Self {
            bind_host: "::".to_string(),
            bind_port: 5678,
            mote_port: 8765,
            max_datagram_size: 1024,
        }
    }
}
