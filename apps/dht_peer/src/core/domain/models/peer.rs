use std::{
    fmt,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    str::FromStr,
};

use crate::core::domain::models::AppError;

/// A peer as written in the config file: `<IPv4> <port>`.
///
/// Equality and hashing work on the host text exactly as configured. Only
/// canonical dotted-decimal hosts are accepted, so every identity that
/// exists can be connected to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId {
    host: String,
    port: u16,
}

impl PeerId {
    pub fn new(host: &str, port: u16) -> Result<Self, AppError> {
        if !is_valid_host(host) {
            return Err(AppError::Config(format!("invalid host: {host}")));
        }

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The config-file form, also used in the handshake.
    pub fn entry(&self) -> String {
        format!("{} {}", self.host, self.port)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        let ip = Ipv4Addr::from_str(&self.host)
            .map_err(|e| AppError::connect(self, format!("unresolvable address: {e}")))?;

        Ok(SocketAddr::V4(SocketAddrV4::new(ip, self.port)))
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for PeerId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();

        match (parts.next(), parts.next(), parts.next()) {
            (Some(host), Some(port), None) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| AppError::Config(format!("invalid port in entry: {s:?}")))?;

                PeerId::new(host, port)
                    .map_err(|_| AppError::Config(format!("invalid host in entry: {s:?}")))
            }
            _ => Err(AppError::Config(format!(
                "expected \"<host> <port>\", got {s:?}"
            ))),
        }
    }
}

/// Four dot-separated decimal octets, each in `[0, 255]`, without leading
/// zeros. Same rule `socket_addr` applies when connecting.
fn is_valid_host(host: &str) -> bool {
    Ipv4Addr::from_str(host).is_ok()
}
