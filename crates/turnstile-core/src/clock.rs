//! Clock abstraction for deterministic testing.
//!
//! Decouples the guard from the system wall clock. Audit lines and status
//! reports are stamped through a [`Clock`], so simulation and tests can pin or
//! step time while production reads local time.

use chrono::NaiveDateTime;

/// Format used for every timestamp in audit lines and reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Abstract source of local wall-clock time.
///
/// # Invariants
///
/// - `now()` is infallible.
/// - Values are local time without an offset; the log format carries no zone.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current time rendered with [`TIMESTAMP_FORMAT`].
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Clock frozen at a single instant.
///
/// Used by unit tests and by callers that want byte-stable reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    /// Create a clock that always returns `at`.
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(7, 5, 1))
            .expect("valid date")
    }

    #[test]
    fn timestamp_is_zero_padded() {
        let clock = FixedClock::new(instant());
        assert_eq!(clock.timestamp(), "2024-03-09 07:05:01");
    }

    #[test]
    fn fixed_clock_never_moves() {
        let clock = FixedClock::new(instant());
        assert_eq!(clock.now(), clock.now());
    }
}
