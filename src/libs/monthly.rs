//! Per-month hours chart.
//!
//! A chart covers one calendar month, chosen as an offset from the current
//! month and limited to a year in either direction.

use crate::db::store::SessionStore;
use crate::libs::error::{StorageError, StoreResult};
use crate::libs::status::StatusColor;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use uuid::Uuid;

pub const MAX_MONTH_OFFSET: i32 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct DayChartData {
    pub workday_id: Uuid,
    pub date: NaiveDate,
    pub hours_worked: f64,
    pub target_hours: f64,
}

impl DayChartData {
    /// Progress band of the day; a day without a positive target is always green.
    pub fn color(&self) -> StatusColor {
        if self.target_hours <= 0.0 {
            return StatusColor::Green;
        }
        StatusColor::band(self.hours_worked / self.target_hours)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyChart {
    pub offset: i32,
    /// First day of the displayed month.
    pub month_start: NaiveDate,
    /// Work days of the month, oldest first.
    pub days: Vec<DayChartData>,
    pub total_hours: f64,
    /// Zero for a month without work days.
    pub average_hours: f64,
    pub can_previous: bool,
    pub can_next: bool,
}

impl MonthlyChart {
    /// Builds the chart for the month `offset` months away from `now`'s month.
    pub fn load(store: &dyn SessionStore, now: NaiveDateTime, offset: i32) -> StoreResult<Self> {
        let offset = offset.clamp(-MAX_MONTH_OFFSET, MAX_MONTH_OFFSET);
        let month_start = shift_month(month_start(now.date())?, offset)?;
        let month_end = last_day_of_month(month_start)?;

        let mut days = Vec::new();
        for work_day in store.fetch_work_days(month_start, month_end)? {
            let hours_worked = store
                .daily_summary(work_day.date)?
                .map(|s| s.worked_seconds(now) / 3600.0)
                .unwrap_or(0.0);
            days.push(DayChartData {
                workday_id: work_day.id,
                date: work_day.date,
                hours_worked,
                target_hours: work_day.target_hours,
            });
        }
        days.sort_by_key(|d| d.date);

        let total_hours: f64 = days.iter().map(|d| d.hours_worked).sum();
        let average_hours = if days.is_empty() { 0.0 } else { total_hours / days.len() as f64 };

        let months = store.fetch_months_with_data()?;
        let (can_previous, can_next) = match (months.first(), months.last()) {
            (Some(earliest), Some(latest)) => (
                offset > -MAX_MONTH_OFFSET && months_between(*earliest, month_start) > 0,
                offset < MAX_MONTH_OFFSET && months_between(month_start, *latest) > 0,
            ),
            _ => (false, false),
        };

        Ok(MonthlyChart {
            offset,
            month_start,
            days,
            total_hours,
            average_hours,
            can_previous,
            can_next,
        })
    }

    /// e.g. "March 2025".
    pub fn label(&self) -> String {
        self.month_start.format("%B %Y").to_string()
    }
}

fn month_start(date: NaiveDate) -> StoreResult<NaiveDate> {
    date.with_day(1).ok_or_else(|| StorageError::InvalidValue(date.to_string()))
}

fn shift_month(date: NaiveDate, offset: i32) -> StoreResult<NaiveDate> {
    let months = Months::new(offset.unsigned_abs());
    let shifted = if offset >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.ok_or_else(|| StorageError::InvalidValue(date.to_string()))
}

fn last_day_of_month(month_start: NaiveDate) -> StoreResult<NaiveDate> {
    shift_month(month_start, 1)?
        .pred_opt()
        .ok_or_else(|| StorageError::InvalidValue(month_start.to_string()))
}

/// Whole months from `from` to `to`, negative when `to` is earlier.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32
}
