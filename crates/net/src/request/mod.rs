pub mod data;

pub use data::{RequestData, RequestDataInput, RequestParams};
