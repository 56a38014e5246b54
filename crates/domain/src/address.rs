//! Mote addresses.
//!
//! Every mote is identified by the IPv6 address it sends from. The server
//! trusts that address as the mote's identity.

use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Network identity of a mote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoteAddress(Ipv6Addr);

impl MoteAddress {
    #[must_use]
    pub const fn new(ip: Ipv6Addr) -> Self {
        Self(ip)
    }

    #[must_use]
    pub const fn ip(self) -> Ipv6Addr {
        self.0
    }
}

impl From<Ipv6Addr> for MoteAddress {
    fn from(ip: Ipv6Addr) -> Self {
        Self(ip)
    }
}

/// IPv4 senders are identified by their IPv4-mapped IPv6 address.
impl From<IpAddr> for MoteAddress {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Self(v4.to_ipv6_mapped()),
            IpAddr::V6(v6) => Self(v6),
        }
    }
}

impl FromStr for MoteAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Ipv6Addr>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidAddress(s.to_string()))
    }
}

impl fmt::Display for MoteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
