pub mod delete_key_use_case;
pub mod get_key_use_case;
pub mod put_key_use_case;

pub use delete_key_use_case::DeleteKeyUseCase;
pub use get_key_use_case::GetKeyUseCase;
pub use put_key_use_case::PutKeyUseCase;
