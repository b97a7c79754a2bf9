//! The `mapping` table: durable host/endpoint links per entity type.

use crate::error::{MappingError, MappingResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, TransactionBehavior};
use shoplink_db::Database;
use shoplink_types::IdentityType;
use tracing::{debug, warn};

/// Scope of a [`PrimaryKeyMapper::clear`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    /// Remove every link of one entity type.
    Type(IdentityType),
    /// Remove every link of every type.
    Everything(WipeConfirmation),
}

/// Proof that the caller really means to wipe the whole correlation store.
///
/// Only obtainable through [`WipeConfirmation::confirmed`], so a full wipe
/// cannot happen through a defaulted or forgotten argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WipeConfirmation(());

impl WipeConfirmation {
    /// Acknowledges that all links of all types will be destroyed.
    #[must_use]
    pub const fn confirmed() -> Self {
        Self(())
    }
}

/// Persistent store of host/endpoint links backed by SQLite.
#[derive(Clone)]
pub struct PrimaryKeyMapper {
    db: Database,
}

impl PrimaryKeyMapper {
    /// Creates a mapper over an installed database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns the host id linked to `endpoint_id`, if any.
    pub fn get_host_id(
        &self,
        entity_type: IdentityType,
        endpoint_id: &str,
    ) -> MappingResult<Option<i64>> {
        let conn = self.db.lock()?;
        let host = conn
            .query_row(
                "SELECT host FROM mapping WHERE type = ?1 AND endpoint = ?2",
                params![entity_type.code(), endpoint_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(host)
    }

    /// Returns the endpoint id linked to `host_id`, if any.
    pub fn get_endpoint_id(
        &self,
        entity_type: IdentityType,
        host_id: i64,
    ) -> MappingResult<Option<String>> {
        let conn = self.db.lock()?;
        let endpoint = conn
            .query_row(
                "SELECT endpoint FROM mapping WHERE type = ?1 AND host = ?2",
                params![entity_type.code(), host_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(endpoint)
    }

    /// Saves a link.
    ///
    /// Saving the same triple twice succeeds. Saving a link whose endpoint id
    /// or host id is already linked to a different counterpart fails with
    /// [`MappingError::DuplicateCorrelation`]; the stored link is kept.
    pub fn save(
        &self,
        entity_type: IdentityType,
        endpoint_id: &str,
        host_id: i64,
    ) -> MappingResult<()> {
        if endpoint_id.is_empty() {
            return Err(MappingError::InvalidLink(format!(
                "{entity_type} link to host {host_id} has an empty endpoint id"
            )));
        }

        let mut conn = self.db.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO mapping (type, endpoint, host) VALUES (?1, ?2, ?3)",
            params![entity_type.code(), endpoint_id, host_id],
        )?;

        if inserted == 0 {
            // Either the identical link exists, or one side is taken.
            let conflict: Option<(String, i64)> = tx
                .query_row(
                    "SELECT endpoint, host FROM mapping
                     WHERE type = ?1 AND (endpoint = ?2 OR host = ?3)
                       AND NOT (endpoint = ?2 AND host = ?3)
                     LIMIT 1",
                    params![entity_type.code(), endpoint_id, host_id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            if let Some(existing) = conflict {
                warn!(
                    "refusing to relink {entity_type} {endpoint_id}<->{host_id}: \
                     already linked as {}<->{}",
                    existing.0, existing.1
                );
                return Err(MappingError::DuplicateCorrelation {
                    entity_type,
                    endpoint_id: endpoint_id.to_string(),
                    host_id,
                    existing,
                });
            }
            debug!("{entity_type} link {endpoint_id}<->{host_id} already present");
        } else {
            debug!("saved {entity_type} link {endpoint_id}<->{host_id}");
        }

        tx.commit()?;
        Ok(())
    }

    /// Deletes links of `entity_type` matching every supplied id.
    ///
    /// With neither `endpoint_id` nor `host_id` this removes **all** links of
    /// the type. Returns the number of links removed; removing nothing is not
    /// an error.
    pub fn delete(
        &self,
        entity_type: IdentityType,
        endpoint_id: Option<&str>,
        host_id: Option<i64>,
    ) -> MappingResult<usize> {
        let mut sql = String::from("DELETE FROM mapping WHERE type = ?");
        let mut values = vec![Value::Integer(entity_type.code())];

        if let Some(endpoint) = endpoint_id {
            sql.push_str(" AND endpoint = ?");
            values.push(Value::Text(endpoint.to_string()));
        }
        if let Some(host) = host_id {
            sql.push_str(" AND host = ?");
            values.push(Value::Integer(host));
        }
        if endpoint_id.is_none() && host_id.is_none() {
            warn!("deleting every {entity_type} link");
        }

        let conn = self.db.lock()?;
        let removed = conn.execute(&sql, params_from_iter(values))?;
        debug!("deleted {removed} {entity_type} link(s)");
        Ok(removed)
    }

    /// Clears one type's links, or the entire store.
    pub fn clear(&self, scope: ClearScope) -> MappingResult<usize> {
        match scope {
            ClearScope::Type(entity_type) => self.delete(entity_type, None, None),
            ClearScope::Everything(_) => {
                warn!("wiping the whole correlation store");
                let conn = self.db.lock()?;
                Ok(conn.execute("DELETE FROM mapping", [])?)
            }
        }
    }

    /// Counts stored links, optionally restricted to one type.
    pub fn count(&self, entity_type: Option<IdentityType>) -> MappingResult<u64> {
        let conn = self.db.lock()?;
        let count: i64 = match entity_type {
            Some(t) => conn.query_row(
                "SELECT COUNT(*) FROM mapping WHERE type = ?1",
                params![t.code()],
                |row| row.get(0),
            )?,
            None => conn.query_row("SELECT COUNT(*) FROM mapping", [], |row| row.get(0))?,
        };
        Ok(count as u64)
    }
}
