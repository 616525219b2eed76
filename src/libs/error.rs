//! Error types shared by the persistence layer and the OS bridges.
//!
//! Storage failures are caught by the tracker and logged; screen lock failures
//! trigger the manual break fallback. Neither ever reaches the user directly.

use thiserror::Error;
use uuid::Uuid;

/// Failure of a Session Store operation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying SQLite call failed (I/O, constraint violation, ...).
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// An operation expected a work day row that does not exist.
    #[error("work day {0} not found")]
    WorkDayNotFound(Uuid),

    /// A value read back from the database could not be decoded.
    #[error("invalid stored value: {0}")]
    InvalidValue(String),
}

/// Result alias used by every Session Store operation.
pub type StoreResult<T> = Result<T, StorageError>;

/// Failure of the screen lock effector.
#[derive(Debug, Error)]
pub enum ScreenLockError {
    /// The lock command could not be started at all.
    #[error("failed to run screen lock command: {0}")]
    Spawn(#[from] std::io::Error),

    /// The lock command ran but exited with a non-zero status.
    #[error("screen lock command exited with status {0}")]
    LockFailed(i32),

    /// No lock mechanism is known for this platform.
    #[error("screen locking is not supported on this platform")]
    Unsupported,
}
