use std::str::FromStr;

use crate::error::SocketError;
use crate::request::RequestData;
use crate::request::data::REQ_PREFIX;
use crate::response::ResponseData;
use crate::response::data::RES_PREFIX;

pub const HELLO_PREFIX: &str = "HELLO ";
pub const ACK_PREFIX: &str = "ACK ";

pub enum ParsedMsg<'a> {
    /// First line from a connecting peer: `HELLO <host> <port>`.
    Hello(&'a str),
    /// Listener's answer to a hello: `ACK <host> <port>`.
    Ack(&'a str),
    Req { data: RequestData },
    Res { data: ResponseData },
    Other(&'a str), // Línea cualquiera (compat/log)
}

pub fn parse_line(line: &str) -> Result<ParsedMsg<'_>, SocketError> {
    let msg = line.trim();

    if msg.starts_with(REQ_PREFIX) {
        let data = RequestData::from_str(msg)?;
        return Ok(ParsedMsg::Req { data });
    }

    if msg.starts_with(RES_PREFIX) {
        let data = ResponseData::from_str(msg)?;
        return Ok(ParsedMsg::Res { data });
    }

    if let Some(rest) = msg.strip_prefix(HELLO_PREFIX) {
        return Ok(ParsedMsg::Hello(rest.trim()));
    }

    if let Some(rest) = msg.strip_prefix(ACK_PREFIX) {
        return Ok(ParsedMsg::Ack(rest.trim()));
    }

    Ok(ParsedMsg::Other(msg))
}

#[inline]
pub fn hello_line(identity: &str) -> String {
    format!("{HELLO_PREFIX}{identity}\n")
}

#[inline]
pub fn ack_line(identity: &str) -> String {
    format!("{ACK_PREFIX}{identity}\n")
}
