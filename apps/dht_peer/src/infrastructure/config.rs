use std::{env, fs, net::SocketAddr, path::Path, str::FromStr, time::Duration};

use dht_core::utils::is_blank;

use crate::{
    core::domain::models::{AppError, PeerId},
    infrastructure::adapters::services::vnode_hash_ring_service::VNODE_REPLICAS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    Bench,
    Serve,
}

impl FromStr for RunMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interactive" => Ok(RunMode::Interactive),
            "bench" => Ok(RunMode::Bench),
            "serve" => Ok(RunMode::Serve),
            other => Err(AppError::Config(format!("unknown PEER_MODE: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    pub key_range: usize,
    pub iterations: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            key_range: 100,
            iterations: 100,
        }
    }
}

/// Process configuration for one peer.
#[derive(Debug, Clone)]
pub struct PeerConfig {
    pub peers_file: String,
    pub host: String,
    pub port: u16,
    pub bind: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub vnodes: usize,
    pub mode: RunMode,
    pub bench: BenchConfig,
}

impl PeerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`PeerConfig::from_env`] but reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let peers_file = lookup("PEERS_FILE")
            .filter(|v| !is_blank(v))
            .ok_or_else(|| AppError::Config("PEERS_FILE not set".into()))?;

        let port = lookup("PEER_PORT")
            .ok_or_else(|| AppError::Config("PEER_PORT not set".into()))
            .and_then(|v| parse_var("PEER_PORT", &v))?;

        let host = lookup("PEER_HOST")
            .filter(|v| !is_blank(v))
            .unwrap_or(defaults.host);

        let bind = lookup("PEER_BIND")
            .filter(|v| !is_blank(v))
            .unwrap_or(defaults.bind);

        let connect_timeout = match lookup("CONNECT_TIMEOUT_MS") {
            Some(v) => Duration::from_millis(parse_var("CONNECT_TIMEOUT_MS", &v)?),
            None => defaults.connect_timeout,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_MS") {
            Some(v) => Duration::from_millis(parse_var("REQUEST_TIMEOUT_MS", &v)?),
            None => defaults.request_timeout,
        };

        let vnodes = match lookup("RING_VNODES") {
            Some(v) => parse_var("RING_VNODES", &v)?,
            None => defaults.vnodes,
        };

        let mode = match lookup("PEER_MODE") {
            Some(v) => v.parse()?,
            None => defaults.mode,
        };

        let bench = BenchConfig {
            key_range: match lookup("BENCH_KEY_RANGE") {
                Some(v) => parse_var("BENCH_KEY_RANGE", &v)?,
                None => defaults.bench.key_range,
            },
            iterations: match lookup("BENCH_ITERATIONS") {
                Some(v) => parse_var("BENCH_ITERATIONS", &v)?,
                None => defaults.bench.iterations,
            },
        };

        if bench.key_range == 0 {
            return Err(AppError::Config("BENCH_KEY_RANGE must be > 0".into()));
        }
        if bench.iterations == 0 {
            return Err(AppError::Config("BENCH_ITERATIONS must be > 0".into()));
        }

        let cfg = Self {
            peers_file,
            host,
            port,
            bind,
            connect_timeout,
            request_timeout,
            vnodes,
            mode,
            bench,
        };

        // Falla temprano si el host anunciado no es válido
        cfg.self_id()?;

        Ok(cfg)
    }

    /// This peer's identity as it appears in the peer list.
    pub fn self_id(&self) -> Result<PeerId, AppError> {
        PeerId::new(&self.host, self.port)
            .map_err(|e| AppError::Config(format!("PEER_HOST/PEER_PORT: {e}")))
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("PEER_BIND {}: {e}", self.bind)))
    }
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            peers_file: String::new(),
            host: "127.0.0.1".to_string(),
            port: 0,
            bind: "0.0.0.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            vnodes: VNODE_REPLICAS,
            mode: RunMode::Interactive,
            bench: BenchConfig::default(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{name} has an invalid value: {value}")))
}

/// Reads the peer list file: one `"<host> <port>"` entry per line.
pub fn load_peer_list(path: impl AsRef<Path>) -> Result<Vec<PeerId>, AppError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    parse_peer_list(&content)
}

/// Blank lines are skipped; any other invalid line rejects the whole list.
pub fn parse_peer_list(content: &str) -> Result<Vec<PeerId>, AppError> {
    let peers = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_blank(line))
        .map(|(n, line)| {
            line.parse::<PeerId>()
                .map_err(|e| AppError::Config(format!("line {}: {e}", n + 1)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if peers.is_empty() {
        return Err(AppError::Config("peer list is empty".into()));
    }

    Ok(peers)
}
