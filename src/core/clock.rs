//! Source of the creation date stamped on new invoices

use chrono::{NaiveDate, Utc};

pub trait Clock: Send + Sync {
    /// Today's calendar date
    fn today(&self) -> NaiveDate;
}

/// Wall clock, truncated to the UTC date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
