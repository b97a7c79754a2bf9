//! Category synchronization against the `categories` and
//! `category_translations` tables.

use crate::controller::SyncController;
use crate::error::{SyncError, SyncResult, WriteStage};
use crate::merger::LocalizationMerger;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, TransactionBehavior};
use shoplink_db::Database;
use shoplink_model::{Category, CategoryI18n, EntityRecord, QueryFilter, PARENT_ID_FILTER};
use shoplink_types::{new_endpoint_id, Identity, IdentityType};
use tracing::{debug, info};

/// Synchronization controller for catalog categories.
#[derive(Clone)]
pub struct CategoryController {
    db: Database,
}

impl CategoryController {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns every category without a category link.
    pub fn discover(&self, filter: &QueryFilter) -> SyncResult<Vec<Category>> {
        let (clause, values) = unlinked_clause(filter);
        let mut conn = self.db.lock()?;
        // One read transaction so the rows and their translations form a
        // single snapshot.
        let tx = conn.transaction()?;

        let rows: Vec<(String, Option<String>, i64)> = {
            let mut stmt = tx.prepare(&format!("SELECT c.id, c.parent_id, c.status {clause}"))?;
            let mapped = stmt.query_map(params_from_iter(values), |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?;
            mapped.collect::<Result<_, _>>()?
        };

        let mut categories = Vec::with_capacity(rows.len());
        for (id, parent_id, status) in rows {
            let i18ns = load_i18ns(&tx, &id)?;
            categories.push(Category {
                id: Identity::from_endpoint(id),
                parent_category_id: parent_id.map(Identity::from_endpoint).unwrap_or_default(),
                is_active: status != 0,
                i18ns,
            });
        }
        tx.commit()?;

        debug!("discovered {} unlinked categories", categories.len());
        Ok(categories)
    }

    /// Counts the categories [`discover`](Self::discover) would return.
    pub fn count_unlinked(&self, filter: &QueryFilter) -> SyncResult<u64> {
        let (clause, values) = unlinked_clause(filter);
        let conn = self.db.lock()?;
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM (SELECT c.id {clause})"),
            params_from_iter(values),
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Loads one category by endpoint id, linked or not.
    pub fn find(&self, endpoint_id: &str) -> SyncResult<Option<Category>> {
        let conn = self.db.lock()?;
        let row: Option<(Option<String>, i64)> = conn
            .query_row(
                "SELECT parent_id, status FROM categories WHERE id = ?1",
                params![endpoint_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((parent_id, status)) = row else {
            return Ok(None);
        };
        Ok(Some(Category {
            id: Identity::from_endpoint(endpoint_id),
            parent_category_id: parent_id.map(Identity::from_endpoint).unwrap_or_default(),
            is_active: status != 0,
            i18ns: load_i18ns(&conn, endpoint_id)?,
        }))
    }

    /// Inserts or updates a category and merges its translations.
    ///
    /// The category row and every translation are written in one
    /// transaction. Stored translations for languages the record does not
    /// carry are kept.
    pub fn upsert_category(&self, mut category: Category) -> SyncResult<Category> {
        LocalizationMerger::validate(&category.i18ns)?;

        let endpoint_id = match category.endpoint_id() {
            Some(id) => id.to_string(),
            None => {
                let id = new_endpoint_id();
                category.id.set_endpoint(id.clone());
                debug!("minted endpoint id {id} for new category");
                id
            }
        };
        let parent_id = category.parent_endpoint_id().map(str::to_string);

        let mut conn = self.db.lock()?;
        // Failing to take the write lock has written nothing yet.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO categories (id, parent_id, status) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                 parent_id = excluded.parent_id,
                 status = excluded.status",
            params![endpoint_id, parent_id, category.is_active],
        )
        .map_err(SyncError::at(WriteStage::Entity))?;

        let writes = LocalizationMerger::plan(&endpoint_id, &category.i18ns)?;
        let merged = LocalizationMerger::apply(&tx, &writes)?;

        tx.commit().map_err(SyncError::at(WriteStage::Commit))?;
        info!("upserted category {endpoint_id} with {merged} localization(s)");
        Ok(category)
    }

    /// Deletes a category and its translations.
    ///
    /// A category without an endpoint id was never written, so it is
    /// returned unchanged.
    pub fn delete_category(&self, category: Category) -> SyncResult<Category> {
        let Some(endpoint_id) = category.endpoint_id() else {
            debug!("skipping delete of category without endpoint id");
            return Ok(category);
        };

        let mut conn = self.db.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "DELETE FROM category_translations WHERE category_id = ?1",
            params![endpoint_id],
        )
        .map_err(SyncError::at(WriteStage::Delete))?;
        let removed = tx
            .execute("DELETE FROM categories WHERE id = ?1", params![endpoint_id])
            .map_err(SyncError::at(WriteStage::Delete))?;
        tx.commit().map_err(SyncError::at(WriteStage::Commit))?;

        if removed > 0 {
            info!("deleted category {endpoint_id}");
        } else {
            debug!("category {endpoint_id} was already absent");
        }
        Ok(category)
    }
}

impl SyncController for CategoryController {
    fn identity_type(&self) -> IdentityType {
        IdentityType::Category
    }

    fn discover_unlinked(&self, filter: &QueryFilter) -> SyncResult<Vec<EntityRecord>> {
        Ok(self.discover(filter)?.into_iter().map(EntityRecord::from).collect())
    }

    fn upsert(&self, record: EntityRecord) -> SyncResult<EntityRecord> {
        let category = expect_category(record)?;
        self.upsert_category(category).map(EntityRecord::from)
    }

    fn delete(&self, record: EntityRecord) -> SyncResult<EntityRecord> {
        let category = expect_category(record)?;
        self.delete_category(category).map(EntityRecord::from)
    }

    fn count(&self, filter: &QueryFilter) -> SyncResult<u64> {
        self.count_unlinked(filter)
    }
}

fn expect_category(record: EntityRecord) -> SyncResult<Category> {
    let identity_type = record.identity_type();
    record.into_category().ok_or_else(|| {
        SyncError::InvalidRecord(format!(
            "category controller cannot handle {identity_type} records"
        ))
    })
}

/// Builds the `FROM ... WHERE ... LIMIT` tail shared by discovery and count.
///
/// The anti-join is restricted to category links, so a link of another type
/// on the same endpoint id neither hides nor duplicates a category.
fn unlinked_clause(filter: &QueryFilter) -> (String, Vec<Value>) {
    let mut clause = String::from(
        "FROM categories c
         WHERE NOT EXISTS (
             SELECT 1 FROM mapping m WHERE m.type = ? AND m.endpoint = c.id
         )",
    );
    let mut values = vec![Value::Integer(IdentityType::Category.code())];

    match filter.get(PARENT_ID_FILTER) {
        Some("") => clause.push_str(" AND c.parent_id IS NULL"),
        Some(parent) => {
            clause.push_str(" AND c.parent_id = ?");
            values.push(Value::Text(parent.to_string()));
        }
        None => {}
    }

    clause.push_str(" ORDER BY c.rowid");
    if let Some(limit) = filter.limit {
        clause.push_str(" LIMIT ?");
        values.push(Value::Integer(i64::from(limit)));
    }
    (clause, values)
}

fn load_i18ns(conn: &Connection, category_id: &str) -> rusqlite::Result<Vec<CategoryI18n>> {
    let mut stmt = conn.prepare_cached(
        "SELECT language_iso, name, description, title_tag, meta_description, meta_keywords
         FROM category_translations
         WHERE category_id = ?1
         ORDER BY language_iso",
    )?;
    let rows = stmt.query_map(params![category_id], |row| {
        Ok(CategoryI18n {
            language_iso: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            title_tag: row.get(3)?,
            meta_description: row.get(4)?,
            meta_keywords: row.get(5)?,
        })
    })?;
    rows.collect()
}
