//! Work day records: one row per calendar day that saw tracking activity.
//!
//! A work day is created lazily the first time anything is tracked on that
//! date and is never removed by normal operation. Only the registration flag
//! and the target hours change after creation.

use crate::db::db::Db;
use crate::db::store::IdGenerator;
use crate::libs::error::{StorageError, StoreResult};
use chrono::{Datelike, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;
use uuid::Uuid;

const SELECT_BY_DATE: &str = "SELECT id, date, is_registered, target_hours FROM workdays WHERE date = ?1";
const SELECT_RANGE: &str = "SELECT id, date, is_registered, target_hours FROM workdays WHERE date >= ?1 AND date <= ?2 ORDER BY date ASC";
const SELECT_ALL: &str = "SELECT id, date, is_registered, target_hours FROM workdays ORDER BY date DESC";
const INSERT_WORKDAY: &str = "INSERT INTO workdays (id, date, is_registered, target_hours) VALUES (?1, ?2, ?3, ?4)";
const TOGGLE_REGISTERED: &str = "UPDATE workdays SET is_registered = NOT is_registered WHERE id = ?1";
const UPDATE_TARGET_HOURS: &str = "UPDATE workdays SET target_hours = ?2 WHERE id = ?1";

/// Default daily goal when nothing else is configured.
pub const DEFAULT_TARGET_HOURS: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkDay {
    pub id: Uuid,
    /// Calendar day this record covers.
    pub date: NaiveDate,
    /// Whether the user acknowledged registering the hours externally.
    pub is_registered: bool,
    pub target_hours: f64,
}

impl WorkDay {
    pub fn target_seconds(&self) -> f64 {
        self.target_hours * 3600.0
    }
}

/// Reads a TEXT column holding a UUID.
pub(crate) fn row_uuid(row: &Row, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn map_workday(row: &Row) -> rusqlite::Result<WorkDay> {
    Ok(WorkDay {
        id: row_uuid(row, 0)?,
        date: row.get(1)?,
        is_registered: row.get(2)?,
        target_hours: row.get(3)?,
    })
}

pub(crate) fn query_by_date(conn: &Connection, date: NaiveDate) -> StoreResult<Option<WorkDay>> {
    Ok(conn.query_row(SELECT_BY_DATE, params![date], map_workday).optional()?)
}

/// Query layer over the `workdays` table.
#[derive(Clone)]
pub struct Workdays {
    db: Db,
    ids: IdGenerator,
}

impl Workdays {
    pub fn new(db: Db, ids: IdGenerator) -> Self {
        Workdays { db, ids }
    }

    /// Returns the work day for `date`, inserting it with `default_target_hours` if missing.
    pub fn ensure(&self, date: NaiveDate, default_target_hours: f64) -> StoreResult<WorkDay> {
        self.db.write(|tx| {
            if let Some(existing) = query_by_date(tx, date)? {
                return Ok(existing);
            }
            let workday = WorkDay {
                id: (self.ids)(),
                date,
                is_registered: false,
                target_hours: default_target_hours,
            };
            tx.execute(
                INSERT_WORKDAY,
                params![workday.id.to_string(), workday.date, workday.is_registered, workday.target_hours],
            )?;
            Ok(workday)
        })
    }

    pub fn fetch(&self, date: NaiveDate) -> StoreResult<Option<WorkDay>> {
        self.db.read(|conn| query_by_date(conn, date))
    }

    /// Work days between `from` and `to` inclusive, oldest first.
    pub fn fetch_range(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<WorkDay>> {
        self.db.read(|conn| {
            let mut stmt = conn.prepare(SELECT_RANGE)?;
            let workdays = stmt.query_map(params![from, to], map_workday)?.collect::<Result<Vec<_>, _>>()?;
            Ok(workdays)
        })
    }

    /// Every work day, newest first.
    pub fn fetch_all(&self) -> StoreResult<Vec<WorkDay>> {
        self.db.read(|conn| {
            let mut stmt = conn.prepare(SELECT_ALL)?;
            let workdays = stmt.query_map([], map_workday)?.collect::<Result<Vec<_>, _>>()?;
            Ok(workdays)
        })
    }

    /// First day of every month that has at least one work day, ascending.
    pub fn fetch_months_with_data(&self) -> StoreResult<Vec<NaiveDate>> {
        let mut months = BTreeSet::new();
        for workday in self.fetch_all()? {
            let month_start = workday
                .date
                .with_day(1)
                .ok_or_else(|| StorageError::InvalidValue(workday.date.to_string()))?;
            months.insert(month_start);
        }
        Ok(months.into_iter().collect())
    }

    pub fn toggle_registered(&self, id: Uuid) -> StoreResult<()> {
        self.db.write(|tx| {
            let affected = tx.execute(TOGGLE_REGISTERED, params![id.to_string()])?;
            if affected == 0 {
                return Err(StorageError::WorkDayNotFound(id));
            }
            Ok(())
        })
    }

    pub fn update_target_hours(&self, id: Uuid, hours: f64) -> StoreResult<()> {
        self.db.write(|tx| {
            let affected = tx.execute(UPDATE_TARGET_HOURS, params![id.to_string(), hours])?;
            if affected == 0 {
                return Err(StorageError::WorkDayNotFound(id));
            }
            Ok(())
        })
    }
}
