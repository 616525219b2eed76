//! SQLite persistence.
//!
//! [`db::Db`] owns the connection and runs [`migrations`] on open.
//! [`workdays`] and [`sessions`] hold the per-table queries, and
//! [`store::SqliteStore`] combines them behind the [`store::SessionStore`]
//! trait the tracker works against.
//!
//! ```rust
//! use worktrack::db::{db::Db, store::{SessionStore, SqliteStore}};
//! use chrono::NaiveDate;
//!
//! let store = SqliteStore::new(Db::in_memory()?);
//! let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
//! let day = store.ensure_work_day(date, 8.0)?;
//! assert_eq!(store.ensure_work_day(date, 6.0)?.id, day.id);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod migrations;
pub mod sessions;
pub mod store;
pub mod workdays;
