pub mod error;
pub mod message;
pub mod pending;
pub mod request;
pub mod response;
pub mod socket;
pub mod types;

pub use error::SocketError;
pub use message::ParsedMsg;
pub use message::parse_line;
pub use pending::PendingTable;
pub use request::{RequestData, RequestDataInput, RequestParams};
pub use response::{ResponseData, ResponseStatus};
pub use socket::Socket;
