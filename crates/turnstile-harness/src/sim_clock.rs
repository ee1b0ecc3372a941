//! Stepping clock for simulation.
//!
//! [`SimClock`] starts at a fixed instant and only moves when a test advances
//! it. Clones share the same offset, so a test can keep one handle while the
//! guard owns another.

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use turnstile_core::Clock;

/// Simulated wall clock.
#[derive(Debug, Clone)]
pub struct SimClock {
    start: NaiveDateTime,
    offset_secs: Arc<AtomicI64>,
}

impl SimClock {
    /// Clock frozen at `start` until advanced.
    pub fn new(start: NaiveDateTime) -> Self {
        Self { start, offset_secs: Arc::new(AtomicI64::new(0)) }
    }

    /// Clock starting at 2024-01-01 00:00:00.
    pub fn epoch() -> Self {
        Self::new(sim_epoch())
    }

    /// Move time forward by `secs` seconds for every clone.
    pub fn advance(&self, secs: u32) {
        self.offset_secs.fetch_add(i64::from(secs), Ordering::SeqCst);
    }

    /// Seconds elapsed since the start instant.
    pub fn elapsed_secs(&self) -> i64 {
        self.offset_secs.load(Ordering::SeqCst)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::epoch()
    }
}

impl Clock for SimClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = TimeDelta::try_seconds(self.elapsed_secs()).unwrap_or(TimeDelta::MAX);
        self.start.checked_add_signed(elapsed).unwrap_or(NaiveDateTime::MAX)
    }
}

fn sim_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}
