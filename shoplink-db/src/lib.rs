//! SQLite connection management for ShopLink.
//!
//! Every store in the workspace (the correlation mapper and the entity
//! controllers) shares one [`Database`] handle. The handle wraps a single
//! connection behind a mutex; cross-process safety comes from SQLite's own
//! locking, WAL journaling and the busy timeout configured here.
//!
//! Opening a database always runs [`ensure_schema`], so callers receive a
//! handle whose tables exist and are at the current schema version.

mod error;
mod schema;

pub use error::{DbError, DbResult};
pub use schema::{ensure_schema, schema_version, SCHEMA_VERSION};

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

/// Default time to wait for a competing writer before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Tuning knobs applied when a connection is opened.
#[derive(Debug, Clone)]
pub struct DbOptions {
    /// How long a statement waits on a locked database.
    pub busy_timeout: Duration,
    /// Use write-ahead logging (ignored for in-memory databases).
    pub wal: bool,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            wal: true,
        }
    }
}

/// Shared handle to the connector database.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) the database at `path` and installs the schema.
    pub fn open(path: &Path, options: &DbOptions) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|source| DbError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        configure(&conn, options, true)?;
        debug!("opened connector database at {}", path.display());
        Self::from_connection(conn)
    }

    /// Opens an in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        configure(&conn, &DbOptions::default(), false)?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> DbResult<Self> {
        ensure_schema(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Locks the connection for the duration of one operation.
    pub fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }

    /// Returns the schema version recorded in the database.
    pub fn schema_version(&self) -> DbResult<u32> {
        let conn = self.lock()?;
        schema_version(&conn)
    }
}

fn configure(conn: &Connection, options: &DbOptions, file_backed: bool) -> DbResult<()> {
    conn.busy_timeout(options.busy_timeout)?;
    conn.pragma_update(None, "foreign_keys", true)?;
    if file_backed && options.wal {
        // journal_mode answers with the mode in effect; read it so the
        // statement is fully stepped.
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!("journal mode: {mode}");
    }
    Ok(())
}
