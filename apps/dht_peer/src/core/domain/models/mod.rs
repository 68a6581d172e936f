pub mod error;
pub mod operation;
pub mod peer;
pub mod usecases;

pub use error::AppError;
pub use operation::{OpStatus, Operation, OperationKind, OperationResult};
pub use peer::PeerId;
