//! Derived metrics for a single work day.
//!
//! A [`DailySummary`] is a snapshot of a work day and its sessions as loaded
//! from the store. Every metric is computed on demand against a reference
//! instant `now`, which is used as the end of any still-open session. Nothing
//! here touches the database.

use crate::db::sessions::Session;
use crate::db::workdays::WorkDay;
use crate::libs::status::TrackingState;
use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub work_day: WorkDay,
    /// Work sessions ordered by start time.
    pub sessions: Vec<Session>,
    /// Break sessions ordered by start time.
    pub breaks: Vec<Session>,
}

fn total(sessions: &[Session], now: NaiveDateTime) -> Duration {
    sessions.iter().fold(Duration::zero(), |acc, s| acc + s.duration(now))
}

impl DailySummary {
    pub fn new(work_day: WorkDay, sessions: Vec<Session>, breaks: Vec<Session>) -> Self {
        DailySummary {
            work_day,
            sessions,
            breaks,
        }
    }

    /// Sum of all work intervals, open ones measured up to `now`.
    pub fn worked(&self, now: NaiveDateTime) -> Duration {
        total(&self.sessions, now)
    }

    pub fn worked_seconds(&self, now: NaiveDateTime) -> f64 {
        seconds(self.worked(now))
    }

    pub fn break_time(&self, now: NaiveDateTime) -> Duration {
        total(&self.breaks, now)
    }

    pub fn break_seconds(&self, now: NaiveDateTime) -> f64 {
        seconds(self.break_time(now))
    }

    /// Completed breaks only.
    pub fn break_count(&self) -> usize {
        self.breaks.iter().filter(|b| !b.is_active()).count()
    }

    pub fn is_working(&self) -> bool {
        self.sessions.iter().any(Session::is_active)
    }

    pub fn is_on_break(&self) -> bool {
        self.breaks.iter().any(Session::is_active)
    }

    pub fn target(&self) -> Duration {
        Duration::milliseconds((self.work_day.target_hours * 3_600_000.0).round() as i64)
    }

    /// Time still needed to reach the target, never negative.
    pub fn remaining(&self, now: NaiveDateTime) -> Duration {
        (self.target() - self.worked(now)).max(Duration::zero())
    }

    pub fn remaining_seconds(&self, now: NaiveDateTime) -> f64 {
        seconds(self.remaining(now))
    }

    /// Fraction of the target worked so far; 1.0 when the target is not positive.
    pub fn progress(&self, now: NaiveDateTime) -> f64 {
        if self.work_day.target_hours <= 0.0 {
            return 1.0;
        }
        self.worked_seconds(now) / self.work_day.target_seconds()
    }

    pub fn day_start_time(&self) -> Option<NaiveDateTime> {
        self.sessions.iter().map(|s| s.started_at).min()
    }

    /// `now` while working, otherwise the latest recorded end of work.
    pub fn day_end_time(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if self.is_working() {
            return Some(now);
        }
        self.sessions.iter().filter_map(|s| s.ended_at).max()
    }

    /// State as seen from the stored rows alone, for readers outside the
    /// running tracker.
    pub fn state(&self, now: NaiveDateTime) -> TrackingState {
        if self.is_on_break() {
            TrackingState::OnBreak
        } else if self.is_working() {
            TrackingState::Working
        } else if self.worked(now) > Duration::zero() && self.remaining(now) <= Duration::zero() {
            TrackingState::Completed
        } else {
            TrackingState::Idle
        }
    }
}

fn seconds(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 1000.0
}
