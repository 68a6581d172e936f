use std::fmt;

use dht_core::{clock::AppTime, utils::is_blank};
use dht_net::{ResponseData, ResponseStatus, types::ReqId};

use crate::core::domain::models::AppError;

pub const PUT: &str = "PUT";
pub const GET: &str = "GET";
pub const DELETE: &str = "DELETE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationKind {
    Put,
    Get,
    Delete,
    Unknown(String),
}

impl OperationKind {
    pub fn as_str(&self) -> &str {
        match self {
            OperationKind::Put => PUT,
            OperationKind::Get => GET,
            OperationKind::Delete => DELETE,
            OperationKind::Unknown(other) => other.as_str(),
        }
    }
}

impl From<&str> for OperationKind {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            PUT => OperationKind::Put,
            GET => OperationKind::Get,
            DELETE => OperationKind::Delete,
            _ => OperationKind::Unknown(value.to_string()),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated key-value operation.
///
/// Constructors refuse blank keys, and blank values for PUT, so an
/// `Operation` that exists is always safe to route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    kind: OperationKind,
    key: String,
    value: Option<String>,
    issued_at: AppTime,
}

impl Operation {
    pub fn new(
        kind: OperationKind,
        key: String,
        value: Option<String>,
        issued_at: AppTime,
    ) -> Result<Self, AppError> {
        if is_blank(&key) {
            return Err(AppError::BadRequest("Key is empty".to_string()));
        }

        let value = match kind {
            OperationKind::Put => match value {
                Some(v) if !is_blank(&v) => Some(v),
                _ => return Err(AppError::BadRequest("Value is empty".to_string())),
            },
            _ => None,
        };

        Ok(Self {
            kind,
            key,
            value,
            issued_at,
        })
    }

    pub fn put(key: String, value: String, issued_at: AppTime) -> Result<Self, AppError> {
        Self::new(OperationKind::Put, key, Some(value), issued_at)
    }

    pub fn get(key: String, issued_at: AppTime) -> Result<Self, AppError> {
        Self::new(OperationKind::Get, key, None, issued_at)
    }

    pub fn delete(key: String, issued_at: AppTime) -> Result<Self, AppError> {
        Self::new(OperationKind::Delete, key, None, issued_at)
    }

    pub fn kind(&self) -> &OperationKind {
        &self.kind
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn issued_at(&self) -> AppTime {
        self.issued_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpStatus {
    /// PUT / DELETE outcome.
    Flag(bool),
    /// GET outcome, `None` when the key is absent.
    Value(Option<String>),
    Unsupported,
}

impl OpStatus {
    pub fn to_wire(&self) -> Option<ResponseStatus> {
        match self {
            OpStatus::Flag(b) => Some(ResponseStatus::Flag(*b)),
            OpStatus::Value(Some(v)) => Some(ResponseStatus::Value(v.clone())),
            OpStatus::Value(None) | OpStatus::Unsupported => None,
        }
    }

    /// Reads a wire status back, using the operation kind to tell a missing
    /// GET value apart from an unsupported operation.
    pub fn from_wire(
        kind: &OperationKind,
        status: Option<ResponseStatus>,
    ) -> Result<Self, AppError> {
        match (kind, status) {
            (OperationKind::Put | OperationKind::Delete, Some(ResponseStatus::Flag(b))) => {
                Ok(OpStatus::Flag(b))
            }
            (OperationKind::Get, Some(ResponseStatus::Value(v))) => Ok(OpStatus::Value(Some(v))),
            (OperationKind::Get, None) => Ok(OpStatus::Value(None)),
            (OperationKind::Unknown(_), None) => Ok(OpStatus::Unsupported),
            (kind, status) => Err(AppError::Protocol(format!(
                "status {status:?} does not fit a {kind} result"
            ))),
        }
    }
}

impl fmt::Display for OpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpStatus::Flag(b) => write!(f, "{b}"),
            OpStatus::Value(Some(v)) => write!(f, "{v}"),
            OpStatus::Value(None) => f.write_str("null"),
            OpStatus::Unsupported => f.write_str("NOOP"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub status: OpStatus,
    /// Set when the result came back over a peer connection.
    pub correlation_id: Option<ReqId>,
    pub issued_at: AppTime,
}

impl OperationResult {
    pub fn local(status: OpStatus, issued_at: AppTime) -> Self {
        Self {
            status,
            correlation_id: None,
            issued_at,
        }
    }

    pub fn from_response(kind: &OperationKind, response: ResponseData) -> Result<Self, AppError> {
        Ok(Self {
            status: OpStatus::from_wire(kind, response.status)?,
            correlation_id: Some(response.correlation_id),
            issued_at: AppTime::new(response.timestamp),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OpStatus::Flag(true) | OpStatus::Value(Some(_)))
    }

    pub fn value(&self) -> Option<&str> {
        match &self.status {
            OpStatus::Value(v) => v.as_deref(),
            _ => None,
        }
    }
}
