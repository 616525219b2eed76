//! The persistence interface the tracker depends on.
//!
//! [`SessionStore`] is the seam between the state machine and SQLite: the
//! tracker only ever holds an `Arc<dyn SessionStore>`, so tests can wrap or
//! replace the real store. [`SqliteStore`] is the production implementation
//! built from the per-table query layers.

use crate::db::db::Db;
use crate::db::sessions::{query_sessions, Session, SessionKind, Sessions};
use crate::db::workdays::{query_by_date, WorkDay, Workdays};
use crate::libs::error::StoreResult;
use crate::libs::summary::DailySummary;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use uuid::Uuid;

/// Produces identifiers for new rows.
pub type IdGenerator = Arc<dyn Fn() -> Uuid + Send + Sync>;

/// Time-ordered v7 identifiers.
pub fn default_id_generator() -> IdGenerator {
    Arc::new(Uuid::now_v7)
}

pub trait SessionStore: Send + Sync {
    /// Find-or-create the work day for `date`.
    fn ensure_work_day(&self, date: NaiveDate, default_target_hours: f64) -> StoreResult<WorkDay>;
    fn fetch_work_day(&self, date: NaiveDate) -> StoreResult<Option<WorkDay>>;
    /// Inclusive range, ascending by date.
    fn fetch_work_days(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<WorkDay>>;
    /// Descending by date.
    fn fetch_all_work_days(&self) -> StoreResult<Vec<WorkDay>>;
    fn fetch_months_with_data(&self) -> StoreResult<Vec<NaiveDate>>;
    fn toggle_registered(&self, workday_id: Uuid) -> StoreResult<()>;
    fn update_target_hours(&self, workday_id: Uuid, hours: f64) -> StoreResult<()>;
    fn daily_summary(&self, date: NaiveDate) -> StoreResult<Option<DailySummary>>;

    fn start_work_session(&self, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<Session>;
    fn end_active_work_session(&self, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<()>;
    fn fetch_sessions(&self, workday_id: Uuid) -> StoreResult<Vec<Session>>;
    fn has_active_work_session(&self, workday_id: Uuid) -> StoreResult<bool>;

    fn start_break_session(&self, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<Session>;
    fn end_active_break_session(&self, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<()>;
    fn fetch_breaks(&self, workday_id: Uuid) -> StoreResult<Vec<Session>>;
}

#[derive(Clone)]
pub struct SqliteStore {
    db: Db,
    workdays: Workdays,
    work: Sessions,
    breaks: Sessions,
}

impl SqliteStore {
    pub fn new(db: Db) -> Self {
        Self::with_id_generator(db, default_id_generator())
    }

    pub fn with_id_generator(db: Db, ids: IdGenerator) -> Self {
        SqliteStore {
            workdays: Workdays::new(db.clone(), ids.clone()),
            work: Sessions::new(db.clone(), SessionKind::Work, ids.clone()),
            breaks: Sessions::new(db.clone(), SessionKind::Break, ids),
            db,
        }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }
}

impl SessionStore for SqliteStore {
    fn ensure_work_day(&self, date: NaiveDate, default_target_hours: f64) -> StoreResult<WorkDay> {
        self.workdays.ensure(date, default_target_hours)
    }

    fn fetch_work_day(&self, date: NaiveDate) -> StoreResult<Option<WorkDay>> {
        self.workdays.fetch(date)
    }

    fn fetch_work_days(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<WorkDay>> {
        self.workdays.fetch_range(from, to)
    }

    fn fetch_all_work_days(&self) -> StoreResult<Vec<WorkDay>> {
        self.workdays.fetch_all()
    }

    fn fetch_months_with_data(&self) -> StoreResult<Vec<NaiveDate>> {
        self.workdays.fetch_months_with_data()
    }

    fn toggle_registered(&self, workday_id: Uuid) -> StoreResult<()> {
        self.workdays.toggle_registered(workday_id)
    }

    fn update_target_hours(&self, workday_id: Uuid, hours: f64) -> StoreResult<()> {
        self.workdays.update_target_hours(workday_id, hours)
    }

    /// Loads the day and both session lists under one lock, so the summary
    /// never mixes rows from before and after a concurrent write.
    fn daily_summary(&self, date: NaiveDate) -> StoreResult<Option<DailySummary>> {
        self.db.read(|conn| {
            let Some(work_day) = query_by_date(conn, date)? else {
                return Ok(None);
            };
            let sessions = query_sessions(conn, SessionKind::Work, work_day.id)?;
            let breaks = query_sessions(conn, SessionKind::Break, work_day.id)?;
            Ok(Some(DailySummary::new(work_day, sessions, breaks)))
        })
    }

    fn start_work_session(&self, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<Session> {
        self.work.start(workday_id, at)
    }

    fn end_active_work_session(&self, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<()> {
        self.work.end_active(workday_id, at).map(|_| ())
    }

    fn fetch_sessions(&self, workday_id: Uuid) -> StoreResult<Vec<Session>> {
        self.work.fetch(workday_id)
    }

    fn has_active_work_session(&self, workday_id: Uuid) -> StoreResult<bool> {
        self.work.has_active(workday_id)
    }

    fn start_break_session(&self, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<Session> {
        self.breaks.start(workday_id, at)
    }

    fn end_active_break_session(&self, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<()> {
        self.breaks.end_active(workday_id, at).map(|_| ())
    }

    fn fetch_breaks(&self, workday_id: Uuid) -> StoreResult<Vec<Session>> {
        self.breaks.fetch(workday_id)
    }
}
