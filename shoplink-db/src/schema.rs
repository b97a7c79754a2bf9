//! Versioned schema installation.
//!
//! Migrations are applied in order, each inside its own transaction, and the
//! applied version is recorded in `PRAGMA user_version`. Running
//! [`ensure_schema`] on an up-to-date database is a no-op.

use crate::error::{DbError, DbResult};
use rusqlite::{Connection, TransactionBehavior};
use tracing::info;

/// Statements for each schema version, starting at version 1.
const MIGRATIONS: &[&str] = &[
    // 1: entity tables and the identity correlation table.
    "
    CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY NOT NULL,
        parent_id TEXT,
        status INTEGER NOT NULL DEFAULT 1
    );

    CREATE INDEX IF NOT EXISTS idx_categories_parent ON categories(parent_id);

    CREATE TABLE IF NOT EXISTS category_translations (
        category_id TEXT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        language_iso TEXT NOT NULL CHECK (language_iso <> ''),
        name TEXT,
        description TEXT,
        title_tag TEXT,
        meta_description TEXT,
        meta_keywords TEXT,
        PRIMARY KEY (category_id, language_iso)
    );

    CREATE TABLE IF NOT EXISTS mapping (
        type INTEGER NOT NULL,
        endpoint TEXT NOT NULL CHECK (endpoint <> ''),
        host INTEGER NOT NULL,
        PRIMARY KEY (type, endpoint),
        UNIQUE (type, host)
    );
    ",
];

/// The schema version this release writes.
pub const SCHEMA_VERSION: u32 = MIGRATIONS.len() as u32;

/// Reads the schema version recorded in the database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

/// Brings the schema up to [`SCHEMA_VERSION`].
///
/// Returns the number of migrations applied by this call.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<u32> {
    let current = schema_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(DbError::UnsupportedVersion {
            found: current,
            supported: SCHEMA_VERSION,
        });
    }

    let mut applied = 0;
    for (index, sql) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = index as u32 + 1;
        let ran = apply_migration(conn, version, sql)
            .map_err(|source| DbError::Migration { version, source })?;
        if ran {
            info!("applied schema migration {version}");
            applied += 1;
        }
    }
    Ok(applied)
}

fn apply_migration(conn: &mut Connection, version: u32, sql: &str) -> rusqlite::Result<bool> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    // Another process may have migrated while we waited for the write lock.
    let current: u32 = tx.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if current >= version {
        tx.commit()?;
        return Ok(false);
    }
    tx.execute_batch(sql)?;
    tx.pragma_update(None, "user_version", version)?;
    tx.commit()?;
    Ok(true)
}
