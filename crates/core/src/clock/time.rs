/// Milliseconds since the unix epoch, as stamped on outgoing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AppTime {
    date: u64,
}

impl AppTime {
    #[inline]
    pub fn new(date: u64) -> Self {
        Self { date }
    }

    pub fn is_before(&self, date2: &AppTime) -> bool {
        self.date < date2.date
    }

    pub fn is_before_or_eq(&self, date2: &AppTime) -> bool {
        self.is_before(date2) || self == date2
    }

    pub fn as_millis_u64(&self) -> u64 {
        self.date
    }

    /// Milliseconds elapsed from `earlier` up to `self`, zero if `earlier` is in the future.
    pub fn millis_since(&self, earlier: &AppTime) -> u64 {
        self.date.saturating_sub(earlier.date)
    }
}

impl From<u128> for AppTime {
    fn from(value: u128) -> Self {
        AppTime::new(value as u64)
    }
}

impl From<u64> for AppTime {
    fn from(value: u64) -> Self {
        AppTime::new(value)
    }
}
