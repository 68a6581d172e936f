#[allow(clippy::module_inception)]
pub mod clock;
pub mod time;

pub use clock::{AppClock, Clock};
pub use time::AppTime;
