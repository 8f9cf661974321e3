//! SQLite-backed storage for models, conversations, messages and settings.
//!
//! All SQL lives in `sql/*.sql` files, loaded via `include_str!`.
//! Timestamps are stored as RFC 3339 UTC text.

mod conversations;
mod messages;
mod models;
mod settings;

use chrono::{DateTime, SecondsFormat, Utc};
use grove_application::StorageError;
use rusqlite::{Connection, ErrorCode, Row, types::Type};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

const SQL_SCHEMA: &str = include_str!("../../../sql/schema.sql");

/// SQLite storage adapter.
///
/// Wraps one `rusqlite::Connection` in a `Mutex`, which also serializes
/// writers. Construct once and share behind an `Arc`.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(db_error)?;
        conn.busy_timeout(Duration::from_secs(5)).map_err(db_error)?;
        debug!(path = %path.display(), "Opened database");
        Self::with_connection(conn)
    }

    /// Create an in-memory database (useful for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory().map_err(db_error)?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Create tables and indexes if they do not exist.
    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn()?.execute_batch(SQL_SCHEMA).map_err(db_error)
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}

/// Map a driver error onto the port's error type.
pub(crate) fn db_error(e: rusqlite::Error) -> StorageError {
    match e {
        rusqlite::Error::SqliteFailure(err, message)
            if err.code == ErrorCode::ConstraintViolation =>
        {
            StorageError::Constraint(message.unwrap_or_else(|| err.to_string()))
        }
        e @ (rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)) => StorageError::Corrupt(e.to_string()),
        e => StorageError::Backend(e.to_string()),
    }
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}

pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Read an RFC 3339 column.
pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
