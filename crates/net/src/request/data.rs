use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::SocketError,
    types::{ReqId, SocketResult},
};

pub const REQ_PREFIX: &str = "REQ ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParams {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// An operation request as it travels between peers.
///
/// `timestamp` is the caller's issue time in millis; the receiver echoes it
/// back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestData {
    pub operation: String,
    pub params: RequestParams,
    pub correlation_id: ReqId,
    pub timestamp: u64,
}

impl RequestData {
    pub fn to_line(&self) -> SocketResult<String> {
        let body = serde_json::to_string(self).map_err(|e| SocketError::Encode(e.to_string()))?;
        Ok(format!("{REQ_PREFIX}{body}\n"))
    }

    fn parse(s: &str) -> Result<Self, SocketError> {
        let body = s.trim().strip_prefix(REQ_PREFIX).unwrap_or(s);

        let data: RequestData =
            serde_json::from_str(body).map_err(|_| SocketError::BadMessage(s.to_string()))?;

        if data.correlation_id.is_empty() || data.operation.is_empty() {
            return Err(SocketError::BadRequest(s.to_string()));
        }

        Ok(data)
    }
}

impl FromStr for RequestData {
    type Err = SocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Request contents before the socket assigns a correlation id.
#[derive(Copy, Clone, Debug)]
pub struct RequestDataInput<'a> {
    pub operation: &'a str,
    pub key: &'a str,
    pub value: Option<&'a str>,
    pub timestamp: u64,
}

impl<'a> RequestDataInput<'a> {
    #[inline]
    pub fn new(operation: &'a str, key: &'a str, value: Option<&'a str>, timestamp: u64) -> Self {
        Self {
            operation,
            key,
            value,
            timestamp,
        }
    }

    pub fn from_id(self, id: ReqId) -> RequestData {
        RequestData {
            operation: self.operation.to_string(),
            params: RequestParams {
                key: self.key.to_string(),
                value: self.value.map(str::to_string),
            },
            correlation_id: id,
            timestamp: self.timestamp,
        }
    }
}
