use std::time::UNIX_EPOCH;

use crate::clock::AppTime;

/// Source of the timestamps stamped on operations.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> AppTime;

    /// Round-trip time of something stamped at `issued_at`.
    fn elapsed_since(&self, issued_at: &AppTime) -> u64 {
        self.now_millis().millis_since(issued_at)
    }
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppClock;

impl AppClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for AppClock {
    #[inline]
    fn now_millis(&self) -> AppTime {
        UNIX_EPOCH
            .elapsed()
            .map(|dur| AppTime::from(dur.as_millis()))
            .unwrap_or_default()
    }
}
