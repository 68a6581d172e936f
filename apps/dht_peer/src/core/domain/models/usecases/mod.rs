pub mod delete_key_use_case;
pub mod get_key_use_case;
pub mod put_key_use_case;

pub use delete_key_use_case::{DeleteKeyUseCaseInput, DeleteKeyUseCaseOutput};
pub use get_key_use_case::{GetKeyUseCaseInput, GetKeyUseCaseOutput};
pub use put_key_use_case::{PutKeyUseCaseInput, PutKeyUseCaseOutput};
