pub mod data;

pub use data::{ResponseData, ResponseStatus};
