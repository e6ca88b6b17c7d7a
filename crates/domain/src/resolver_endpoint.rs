use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Udp,
    Tcp,
}

/// A resolver entry parsed into something a transport can talk to.
///
/// Accepted forms: `8.8.8.8`, `8.8.8.8:5353`, `2001:4860:4860::8888`,
/// `[2001:4860:4860::8888]:53`, each optionally prefixed with `udp://` or
/// `tcp://`. The port defaults to 53 and the transport to UDP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolverEndpoint {
    pub addr: SocketAddr,
    pub transport: TransportKind,
}

impl ResolverEndpoint {
    pub fn udp(addr: SocketAddr) -> Self {
        Self {
            addr,
            transport: TransportKind::Udp,
        }
    }

    pub fn tcp(addr: SocketAddr) -> Self {
        Self {
            addr,
            transport: TransportKind::Tcp,
        }
    }

    /// Same server, reached over TCP. Used when a UDP answer comes back truncated.
    pub fn as_tcp(&self) -> Self {
        Self::tcp(self.addr)
    }
}

impl fmt::Display for ResolverEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transport {
            TransportKind::Udp => write!(f, "udp://{}", self.addr),
            TransportKind::Tcp => write!(f, "tcp://{}", self.addr),
        }
    }
}

fn parse_socket_addr(s: &str) -> Option<SocketAddr> {
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Some(addr);
    }
    if let Ok(ip) = s.parse::<IpAddr>() {
        return Some(SocketAddr::new(ip, DEFAULT_DNS_PORT));
    }
    // "[::1]" without a port
    let inner = s.strip_prefix('[')?.strip_suffix(']')?;
    let ip = inner.parse::<IpAddr>().ok()?;
    Some(SocketAddr::new(ip, DEFAULT_DNS_PORT))
}

impl FromStr for ResolverEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(addr_str) = s.strip_prefix("udp://") {
            let addr = parse_socket_addr(addr_str)
                .ok_or_else(|| format!("Invalid UDP resolver address '{}'", addr_str))?;
            return Ok(Self::udp(addr));
        }
        if let Some(addr_str) = s.strip_prefix("tcp://") {
            let addr = parse_socket_addr(addr_str)
                .ok_or_else(|| format!("Invalid TCP resolver address '{}'", addr_str))?;
            return Ok(Self::tcp(addr));
        }
        if s.contains("://") {
            return Err(format!(
                "Unsupported resolver scheme in '{}'. Expected 'udp://' or 'tcp://'",
                s
            ));
        }
        parse_socket_addr(s)
            .map(Self::udp)
            .ok_or_else(|| format!("Invalid resolver address '{}'", s))
    }
}
