use dht_net::SocketError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Connection error to {peer}: {reason}")]
    Connect { peer: String, reason: String },

    #[error("Timeout waiting for {peer} (request {correlation_id})")]
    Timeout {
        peer: String,
        correlation_id: String,
    },

    #[error("Connection to {0} closed with the request in flight")]
    ConnectionClosed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Socket error: {0}")]
    Socket(#[from] SocketError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn connect(peer: impl ToString, reason: impl ToString) -> Self {
        AppError::Connect {
            peer: peer.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Translates a transport failure on the connection to `peer`.
    pub fn from_socket(peer: impl ToString, err: SocketError) -> Self {
        match err {
            SocketError::Timeout { req_id, .. } => AppError::Timeout {
                peer: peer.to_string(),
                correlation_id: req_id,
            },
            SocketError::ResponseChannelClosed { .. }
            | SocketError::WriteChannelClosed(_)
            | SocketError::Closed(_) => AppError::ConnectionClosed(peer.to_string()),
            SocketError::BadMessage(msg) | SocketError::BadRequest(msg) => AppError::Protocol(msg),
            other => AppError::Socket(other),
        }
    }
}
