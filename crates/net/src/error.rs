use thiserror::Error;

use crate::types::ReqId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SocketError {
    #[error("write channel closed on socket {0}")]
    WriteChannelClosed(String),

    #[error("request {req_id} timed out on socket {socket_id}")]
    Timeout { socket_id: String, req_id: ReqId },

    #[error("socket {socket_id} closed while request {req_id} was pending")]
    ResponseChannelClosed { socket_id: String, req_id: ReqId },

    #[error("socket {0} is closed")]
    Closed(String),

    #[error("duplicate correlation id {0}")]
    DuplicateId(ReqId),

    #[error("bad message: {0}")]
    BadMessage(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("encode error: {0}")]
    Encode(String),
}
