use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::SocketError,
    types::{ReqId, SocketResult},
};

pub const RES_PREFIX: &str = "RES ";

/// `true`/`false` for writes, the stored value for reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseStatus {
    Flag(bool),
    Value(String),
}

/// Operation result sent back on the same connection.
///
/// `status` is `null` on the wire for a missing GET key and for unsupported
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    pub status: Option<ResponseStatus>,
    pub correlation_id: ReqId,
    pub timestamp: u64,
}

impl ResponseData {
    #[inline]
    pub fn new(correlation_id: ReqId, status: Option<ResponseStatus>, timestamp: u64) -> Self {
        Self {
            status,
            correlation_id,
            timestamp,
        }
    }

    pub fn to_line(&self) -> SocketResult<String> {
        let body = serde_json::to_string(self).map_err(|e| SocketError::Encode(e.to_string()))?;
        Ok(format!("{RES_PREFIX}{body}\n"))
    }

    fn parse(s: &str) -> Result<Self, SocketError> {
        let body = s.trim().strip_prefix(RES_PREFIX).unwrap_or(s);

        let data: ResponseData =
            serde_json::from_str(body).map_err(|_| SocketError::BadMessage(s.to_string()))?;

        if data.correlation_id.is_empty() {
            return Err(SocketError::BadRequest(format!("response without id: {s}")));
        }

        Ok(data)
    }
}

impl FromStr for ResponseData {
    type Err = SocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
