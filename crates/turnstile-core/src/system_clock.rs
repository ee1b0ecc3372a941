//! Production clock reading the local wall clock.
//!
//! `SystemClock` is the production implementation of [`Clock`]. Time is read
//! from the operating system on every call and converted to local time, which
//! matches how operators read the audit log on the same machine.

use chrono::{Local, NaiveDateTime};

use crate::clock::Clock;

/// Production clock using the system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
