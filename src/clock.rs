//! Time sources for the wizard
//!
//! The validator needs today's calendar date and the transition scheduler needs
//! a monotonic instant. Both come from a [`Clock`] so tests can pin them.

use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Source of wall-clock dates and monotonic instants
pub trait Clock: Send + Sync {
    /// Today's date in local time
    fn today(&self) -> NaiveDate;

    /// Monotonic time used for transition deadlines
    fn instant(&self) -> Instant;
}

/// Clock backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock
///
/// Starts at a fixed date and at the `Instant` it was created; only moves
/// when [`ManualClock::advance`] or [`ManualClock::set_today`] is called.
#[derive(Debug)]
pub struct ManualClock {
    inner: Mutex<ManualInner>,
}

#[derive(Debug)]
struct ManualInner {
    today: NaiveDate,
    base: Instant,
    elapsed: Duration,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            inner: Mutex::new(ManualInner {
                today,
                base: Instant::now(),
                elapsed: Duration::ZERO,
            }),
        }
    }

    /// Move the monotonic clock forward
    pub fn advance(&self, by: Duration) {
        self.inner.lock().elapsed += by;
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.inner.lock().today = today;
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.inner.lock().today
    }

    fn instant(&self) -> Instant {
        let inner = self.inner.lock();
        inner.base + inner.elapsed
    }
}
