//! Source of "today" for warranty evaluation.
//!
//! Warranty status depends on the evaluation instant, so the services take a
//! [`Clock`] instead of reading the system time directly. Tests pin the date
//! with [`FixedClock`].

use chrono::{NaiveDate, Utc};

/// Provides the civil date used to evaluate warranties.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time, reduced to its UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock that always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
