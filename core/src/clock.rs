//! Calendar clock: the only source of "today" outside of tests.
//!
//! RULE: The pure core (activity, ranking, expiry) never reads a clock.
//! It receives the date as a parameter. Only the wallet façade holds a
//! Clock, and it asks it once per request.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub trait Clock: Send + Sync {
    /// The calendar date requests should be evaluated against.
    fn today(&self) -> NaiveDate;
}

/// A clock pinned to one date. Used by tests and by `--date` on the runner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixedClock {
    pub date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Move the pinned date forward (or back, for negative `days`).
    pub fn advance_days(&mut self, days: i64) {
        self.date += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

/// The device's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
