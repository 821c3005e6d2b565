//! Endpoint addresses.

use std::{fmt, net::SocketAddr, path::Path};

/// Network address of a connection endpoint.
///
/// Opaque pair of a network name (`"tcp"`, `"udp"`, `"unix"`, ...) and an
/// address string. The default value is the empty address, which is what an
/// unconfigured endpoint reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Addr {
    network: String,
    address: String,
}

impl Addr {
    /// Create an address from its network name and address string.
    pub fn new(network: impl Into<String>, address: impl Into<String>) -> Self {
        Self { network: network.into(), address: address.into() }
    }

    /// TCP address.
    pub fn tcp(addr: SocketAddr) -> Self {
        Self::new("tcp", addr.to_string())
    }

    /// UDP address.
    pub fn udp(addr: SocketAddr) -> Self {
        Self::new("udp", addr.to_string())
    }

    /// Unix domain socket address.
    pub fn unix(path: impl AsRef<Path>) -> Self {
        Self::new("unix", path.as_ref().display().to_string())
    }

    /// Name of the network, e.g. `"tcp"`.
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Address string, e.g. `"127.0.0.1:8080"`.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// True for the empty default address.
    pub fn is_empty(&self) -> bool {
        self.network.is_empty() && self.address.is_empty()
    }

    /// Parse the address part as a socket address.
    ///
    /// Returns `None` for unix paths and other non-IP addresses.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.address.parse().ok()
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl From<SocketAddr> for Addr {
    fn from(addr: SocketAddr) -> Self {
        Self::tcp(addr)
    }
}
