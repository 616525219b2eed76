//! Database schema migration management and versioning system.
//!
//! Every schema change is a numbered migration applied once, inside a
//! transaction, and recorded in the `migrations` table. A database that fails
//! to migrate is unusable, so callers treat any error here as fatal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use worktrack::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("worktrack.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// SQL schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Represents a single database migration with execution logic.
#[derive(Debug, Clone)]
struct Migration {
    /// Unique version number for ordering and tracking
    version: u32,
    /// Human-readable name describing the migration's purpose
    name: &'static str,
    /// Function that applies the schema changes within a transaction
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations, in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    /// Registers all database migrations in chronological order.
    fn register_migrations(&mut self) {
        // Version 1: work days and the two session tables
        self.add_migration(1, "create_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS workdays (
        id TEXT NOT NULL PRIMARY KEY,
        date DATE NOT NULL UNIQUE,
        is_registered BOOLEAN NOT NULL DEFAULT FALSE,
        target_hours REAL NOT NULL DEFAULT 8.0
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS work_sessions (
        id TEXT NOT NULL PRIMARY KEY,
        workday_id TEXT NOT NULL REFERENCES workdays(id) ON DELETE CASCADE,
        started_at TIMESTAMP NOT NULL,
        ended_at TIMESTAMP
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS break_sessions (
        id TEXT NOT NULL PRIMARY KEY,
        workday_id TEXT NOT NULL REFERENCES workdays(id) ON DELETE CASCADE,
        started_at TIMESTAMP NOT NULL,
        ended_at TIMESTAMP
    )",
                [],
            )?;

            Ok(())
        });

        // Version 2: lookup indexes for per-day session queries
        self.add_migration(2, "create_indexes", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_work_sessions_workday_id ON work_sessions(workday_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_break_sessions_workday_id ON break_sessions(workday_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_workdays_date ON workdays(date)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the current schema version.
    ///
    /// All pending migrations share one transaction: either the database ends
    /// up at the latest version or it is left untouched.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Highest applied migration version, or 0 for an empty database.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

}

/// Applies all pending migrations to `conn`.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}
