use crate::db::migrations::{get_db_version, init_with_migrations};
use crate::libs::data_storage::DataStorage;
use crate::libs::error::StoreResult;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "worktrack.db";

/// Shared handle to the application database.
///
/// All clones share one connection behind a mutex, so every write runs through
/// a single writer and no read can interleave with a write transaction.
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Opens the database in the platform data directory and migrates it.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Fresh in-memory database with the full schema, used by tests.
    pub fn in_memory() -> Result<Db> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(mut conn: Connection) -> Result<Db> {
        conn.pragma_update(None, "foreign_keys", true)?;
        init_with_migrations(&mut conn)?;
        msg_debug!(Message::DatabaseVersion(get_db_version(&conn)?));
        Ok(Db {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs a read-only query against the connection.
    pub fn read<T>(&self, f: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Runs `f` inside an immediate transaction and commits it when `f` succeeds.
    pub fn write<T>(&self, f: impl FnOnce(&Transaction) -> StoreResult<T>) -> StoreResult<T> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Direct access to the connection for maintenance queries.
    pub fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}
