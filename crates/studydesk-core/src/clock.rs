//! Wall-clock source.
//!
//! All date-sensitive components take the current instant as an argument;
//! callers obtain it from a [`Clock`] so tests can simulate day rollovers.

use chrono::{DateTime, NaiveDate, Utc};

/// Provider of the current instant and the current calendar day.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar day (date with time-of-day stripped).
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.today(), at.date_naive());
    }
}
