//! Error types for the correlation store.

use shoplink_types::IdentityType;
use thiserror::Error;

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// Errors that can occur in mapping operations.
///
/// A missing link is never an error: lookups return `None` and deletes of
/// absent rows succeed.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The backing database could not serve the request.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Saving would replace an existing, different link.
    #[error(
        "{entity_type} link {endpoint_id}<->{host_id} conflicts with existing link {}<->{}",
        .existing.0, .existing.1
    )]
    DuplicateCorrelation {
        entity_type: IdentityType,
        endpoint_id: String,
        host_id: i64,
        /// The `(endpoint, host)` pair already stored.
        existing: (String, i64),
    },

    /// The link itself is malformed (e.g. an empty endpoint id).
    #[error("invalid link: {0}")]
    InvalidLink(String),
}

impl From<rusqlite::Error> for MappingError {
    fn from(e: rusqlite::Error) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}

impl From<shoplink_db::DbError> for MappingError {
    fn from(e: shoplink_db::DbError) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}
