//! Persistent storage adapters.
//!
//! [`SqliteStorage`] implements every repository port over a single SQLite
//! database file.

mod sqlite;

pub use sqlite::SqliteStorage;
