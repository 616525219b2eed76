//! Work and break intervals.
//!
//! Both kinds share one shape and live in two tables with identical schemas.
//! A session with no `ended_at` is active. Starting a session first closes any
//! active session of the same kind for that work day, in the same
//! transaction, so a work day never has two open sessions of one kind.

use crate::db::db::Db;
use crate::db::store::IdGenerator;
use crate::db::workdays::row_uuid;
use crate::libs::error::StoreResult;
use chrono::{Duration, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    fn table(self) -> &'static str {
        match self {
            SessionKind::Work => "work_sessions",
            SessionKind::Break => "break_sessions",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub workday_id: Uuid,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Length of the interval, measuring an open session up to `now`.
    pub fn duration(&self, now: NaiveDateTime) -> Duration {
        self.ended_at.unwrap_or(now) - self.started_at
    }
}

fn map_session(row: &Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row_uuid(row, 0)?,
        workday_id: row_uuid(row, 1)?,
        started_at: row.get(2)?,
        ended_at: row.get(3)?,
    })
}

/// All sessions of `kind` for a work day, ordered by start time.
pub(crate) fn query_sessions(conn: &Connection, kind: SessionKind, workday_id: Uuid) -> StoreResult<Vec<Session>> {
    let sql = format!(
        "SELECT id, workday_id, started_at, ended_at FROM {} WHERE workday_id = ?1 ORDER BY started_at ASC",
        kind.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let sessions = stmt
        .query_map(params![workday_id.to_string()], map_session)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sessions)
}

fn query_active(conn: &Connection, kind: SessionKind, workday_id: Uuid) -> StoreResult<Option<Session>> {
    let sql = format!(
        "SELECT id, workday_id, started_at, ended_at FROM {} WHERE workday_id = ?1 AND ended_at IS NULL ORDER BY started_at DESC LIMIT 1",
        kind.table()
    );
    Ok(conn.query_row(&sql, params![workday_id.to_string()], map_session).optional()?)
}

/// Closes every open session of `kind` at `at`, never before its own start.
fn close_active(conn: &Connection, kind: SessionKind, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<usize> {
    let sql = format!("UPDATE {} SET ended_at = ?2 WHERE id = ?1", kind.table());
    let mut closed = 0;
    while let Some(active) = query_active(conn, kind, workday_id)? {
        let ended_at = at.max(active.started_at);
        closed += conn.execute(&sql, params![active.id.to_string(), ended_at])?;
    }
    Ok(closed)
}

/// Query layer over one of the session tables.
#[derive(Clone)]
pub struct Sessions {
    db: Db,
    kind: SessionKind,
    ids: IdGenerator,
}

impl Sessions {
    pub fn new(db: Db, kind: SessionKind, ids: IdGenerator) -> Self {
        Sessions { db, kind, ids }
    }

    /// Opens a new session at `at`, closing the currently active one first.
    pub fn start(&self, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<Session> {
        self.db.write(|tx| {
            close_active(tx, self.kind, workday_id, at)?;
            let session = Session {
                id: (self.ids)(),
                workday_id,
                started_at: at,
                ended_at: None,
            };
            let sql = format!(
                "INSERT INTO {} (id, workday_id, started_at, ended_at) VALUES (?1, ?2, ?3, NULL)",
                self.kind.table()
            );
            tx.execute(&sql, params![session.id.to_string(), workday_id.to_string(), at])?;
            Ok(session)
        })
    }

    /// Ends the active session, if any. Returns whether one was closed.
    pub fn end_active(&self, workday_id: Uuid, at: NaiveDateTime) -> StoreResult<bool> {
        self.db.write(|tx| Ok(close_active(tx, self.kind, workday_id, at)? > 0))
    }

    pub fn fetch(&self, workday_id: Uuid) -> StoreResult<Vec<Session>> {
        self.db.read(|conn| query_sessions(conn, self.kind, workday_id))
    }

    pub fn fetch_active(&self, workday_id: Uuid) -> StoreResult<Option<Session>> {
        self.db.read(|conn| query_active(conn, self.kind, workday_id))
    }

    pub fn has_active(&self, workday_id: Uuid) -> StoreResult<bool> {
        Ok(self.fetch_active(workday_id)?.is_some())
    }
}
