//! Error types for the database layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur while opening or preparing the database.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file could not be opened.
    #[error("failed to open database at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A schema migration failed to apply.
    #[error("migration {version} failed: {source}")]
    Migration {
        version: u32,
        #[source]
        source: rusqlite::Error,
    },

    /// The database was written by a newer release.
    #[error("database schema version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A previous holder of the connection panicked mid-operation.
    #[error("database connection lock poisoned")]
    Poisoned,

    /// Any other SQLite error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
