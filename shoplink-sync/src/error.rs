//! Error types for the sync layer.

use shoplink_types::IdentityType;
use std::fmt;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// The write step that failed inside a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStage {
    /// Inserting or updating the entity row.
    Entity,
    /// Merging one localization row.
    Localization,
    /// Removing the entity and its localizations.
    Delete,
    /// Committing the transaction.
    Commit,
}

impl fmt::Display for WriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entity => "entity",
            Self::Localization => "localization",
            Self::Delete => "delete",
            Self::Commit => "commit",
        })
    }
}

/// Errors that can occur in sync operations.
///
/// "Nothing to do" outcomes (no unlinked entities, deleting a record that was
/// never written) are successes, not errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The backing database could not serve the request.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A write failed; the surrounding transaction was rolled back.
    #[error("persistence failure at {stage} stage: {source}")]
    PersistenceFailure {
        stage: WriteStage,
        #[source]
        source: rusqlite::Error,
    },

    /// The record cannot be written as given.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// No controller handles this entity type.
    #[error("no controller registered for {0}")]
    UnsupportedType(IdentityType),
}

impl SyncError {
    /// Builds a mapper from a SQLite error to a failure at `stage`.
    pub(crate) fn at(stage: WriteStage) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::PersistenceFailure { stage, source }
    }
}

impl From<rusqlite::Error> for SyncError {
    fn from(e: rusqlite::Error) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}

impl From<shoplink_db::DbError> for SyncError {
    fn from(e: shoplink_db::DbError) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}
