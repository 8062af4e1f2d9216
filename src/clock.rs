//! Injected time capability.
//!
//! Every time-sensitive function in the crate takes a `&dyn Clock` instead
//! of reading the system clock directly. Relative-date extraction
//! ("demain", "lundi", …) is therefore a pure function of its inputs, and
//! tests stay deterministic across midnight and timezone boundaries.

use chrono::{Local, NaiveDate};

/// Source of "today" for relative-date resolution.
pub trait Clock {
    /// The current civil date.
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a fixed date. Used by tests and replay tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
