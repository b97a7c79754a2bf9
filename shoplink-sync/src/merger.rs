//! Localization merge for entities with per-language sub-records.
//!
//! Localizations are merged by their natural key `(entity id, language)`:
//! a language already stored is overwritten in place, a new one is inserted,
//! and stored languages missing from the incoming record are left alone.
//! Nothing is ever deleted by a merge.

use crate::error::{SyncError, SyncResult, WriteStage};
use rusqlite::{params, Transaction};
use shoplink_model::CategoryI18n;
use std::collections::BTreeSet;
use tracing::debug;

/// One localization row to upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I18nWrite<'a> {
    pub category_id: &'a str,
    pub i18n: &'a CategoryI18n,
}

/// Plans and applies localization merges.
pub struct LocalizationMerger;

impl LocalizationMerger {
    /// Checks that every language code is non-empty and appears once.
    pub fn validate(i18ns: &[CategoryI18n]) -> SyncResult<()> {
        let mut seen = BTreeSet::new();
        for i18n in i18ns {
            if i18n.language_iso.trim().is_empty() {
                return Err(SyncError::InvalidRecord(
                    "localization with an empty language code".to_string(),
                ));
            }
            if !seen.insert(i18n.language_iso.as_str()) {
                return Err(SyncError::InvalidRecord(format!(
                    "duplicate localization for language {}",
                    i18n.language_iso
                )));
            }
        }
        Ok(())
    }

    /// Computes the rows to upsert for `category_id`, ordered by language.
    pub fn plan<'a>(
        category_id: &'a str,
        i18ns: &'a [CategoryI18n],
    ) -> SyncResult<Vec<I18nWrite<'a>>> {
        Self::validate(i18ns)?;
        let mut writes: Vec<I18nWrite<'a>> = i18ns
            .iter()
            .map(|i18n| I18nWrite { category_id, i18n })
            .collect();
        writes.sort_by(|a, b| a.i18n.language_iso.cmp(&b.i18n.language_iso));
        Ok(writes)
    }

    /// Applies planned writes inside the caller's transaction.
    ///
    /// Returns the number of rows written. Any failure is reported at the
    /// [`WriteStage::Localization`] stage; the caller's transaction is then
    /// rolled back when dropped.
    pub fn apply(tx: &Transaction<'_>, writes: &[I18nWrite<'_>]) -> SyncResult<usize> {
        if writes.is_empty() {
            return Ok(0);
        }

        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO category_translations (
                    category_id, language_iso, name, description,
                    title_tag, meta_description, meta_keywords
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT(category_id, language_iso) DO UPDATE SET
                    name = excluded.name,
                    description = excluded.description,
                    title_tag = excluded.title_tag,
                    meta_description = excluded.meta_description,
                    meta_keywords = excluded.meta_keywords",
            )
            .map_err(SyncError::at(WriteStage::Localization))?;

        for write in writes {
            let i18n = write.i18n;
            stmt.execute(params![
                write.category_id,
                i18n.language_iso,
                i18n.name,
                i18n.description,
                i18n.title_tag,
                i18n.meta_description,
                i18n.meta_keywords,
            ])
            .map_err(SyncError::at(WriteStage::Localization))?;
            debug!("merged {} localization of {}", i18n.language_iso, write.category_id);
        }
        Ok(writes.len())
    }
}
