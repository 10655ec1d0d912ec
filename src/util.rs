//! Time helpers shared by posts and the console.

use std::cell::Cell;

use chrono::{DateTime, Duration, FixedOffset};

/// Source of post creation timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        chrono::Local::now().into()
    }
}

/// A clock that only moves when told to.
///
/// Useful for hosts replaying activity and for tests that need distinct or
/// identical timestamps on purpose.
#[derive(Clone, Debug)]
pub struct ManualClock {
    current: Cell<DateTime<FixedOffset>>,
}

impl ManualClock {
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    pub fn set(&self, time: DateTime<FixedOffset>) {
        self.current.set(time);
    }

    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.current.get()
    }
}

/// Format a timestamp the way the console shows it.
pub fn display_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let start = DateTime::parse_from_rfc3339("2025-01-01T00:00:00+00:00").unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), start + Duration::minutes(5));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_display_timestamp() {
        let time = DateTime::parse_from_rfc3339("2025-05-01T12:30:59+01:00").unwrap();
        assert_eq!(display_timestamp(&time), "2025-05-01 12:30");
    }
}
