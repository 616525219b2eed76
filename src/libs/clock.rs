//! Wall-clock source for the tracker.
//!
//! All tracking timestamps are local naive times truncated to milliseconds,
//! matching what SQLite stores and reads back. Sleeping goes through
//! `tokio::time`, so tests can pause and advance time independently of the
//! clock reported here.

use chrono::{Duration, Local, NaiveDateTime, SubsecRound};
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(3)
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        ManualClock {
            now: Mutex::new(start.trunc_subsecs(3)),
        }
    }

    pub fn set(&self, at: NaiveDateTime) {
        *self.now.lock() = at.trunc_subsecs(3);
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = (*now + by).trunc_subsecs(3);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}
