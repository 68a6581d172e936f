pub mod clock;
pub mod use_case;
pub mod utils;

pub use crate::clock::{AppClock, AppTime, Clock};
pub use crate::use_case::{UseCase, UseCaseValidatable};
