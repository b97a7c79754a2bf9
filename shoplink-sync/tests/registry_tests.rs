use pretty_assertions::assert_eq;
use shoplink_db::Database;
use shoplink_mapping::PrimaryKeyMapper;
use shoplink_model::{Category, CategoryI18n, EntityRecord, QueryFilter};
use shoplink_sync::{ControllerRegistry, Statistic, SyncController, SyncError, SyncResult};
use shoplink_types::IdentityType;

/// Controller for a type with a fixed backlog and no storage.
struct FixedBacklog {
    identity_type: IdentityType,
    available: u64,
}

impl SyncController for FixedBacklog {
    fn identity_type(&self) -> IdentityType {
        self.identity_type
    }

    fn discover_unlinked(&self, _filter: &QueryFilter) -> SyncResult<Vec<EntityRecord>> {
        Ok(Vec::new())
    }

    fn upsert(&self, record: EntityRecord) -> SyncResult<EntityRecord> {
        Ok(record)
    }

    fn delete(&self, record: EntityRecord) -> SyncResult<EntityRecord> {
        Ok(record)
    }

    fn count(&self, _filter: &QueryFilter) -> SyncResult<u64> {
        Ok(self.available)
    }
}

fn category(name: &str) -> EntityRecord {
    Category::new().with_i18n(CategoryI18n::new("en", name)).into()
}

// ── Lookup ───────────────────────────────────────────────────────

#[test]
fn defaults_register_category_controller() {
    let registry = ControllerRegistry::with_defaults(Database::open_in_memory().unwrap());
    let types: Vec<IdentityType> = registry.types().collect();
    assert_eq!(types, vec![IdentityType::Category]);
    assert_eq!(
        registry.get(IdentityType::Category).unwrap().identity_type(),
        IdentityType::Category
    );
}

#[test]
fn unknown_type_is_unsupported() {
    let registry = ControllerRegistry::with_defaults(Database::open_in_memory().unwrap());
    assert!(matches!(
        registry.get(IdentityType::Product),
        Err(SyncError::UnsupportedType(IdentityType::Product))
    ));
}

#[test]
fn empty_registry_rejects_records() {
    let registry = ControllerRegistry::new();
    assert!(matches!(
        registry.upsert(category("Shoes")),
        Err(SyncError::UnsupportedType(IdentityType::Category))
    ));
    assert!(matches!(
        registry.delete(category("Shoes")),
        Err(SyncError::UnsupportedType(IdentityType::Category))
    ));
}

#[test]
fn register_replaces_previous_controller() {
    let mut registry = ControllerRegistry::new();
    let first = registry.register(Box::new(FixedBacklog {
        identity_type: IdentityType::Product,
        available: 1,
    }));
    assert!(first.is_none());

    let replaced = registry.register(Box::new(FixedBacklog {
        identity_type: IdentityType::Product,
        available: 2,
    }));
    assert_eq!(replaced.unwrap().count(&QueryFilter::new()).unwrap(), 1);
    assert_eq!(registry.get(IdentityType::Product).unwrap().count(&QueryFilter::new()).unwrap(), 2);
}

// ── Routing ──────────────────────────────────────────────────────

#[test]
fn upsert_and_delete_route_by_record_type() {
    let db = Database::open_in_memory().unwrap();
    let registry = ControllerRegistry::with_defaults(db);
    let controller = registry.get(IdentityType::Category).unwrap();

    let saved = registry.upsert(category("Shoes")).unwrap();
    assert!(saved.id().has_endpoint());
    assert_eq!(controller.discover_unlinked(&QueryFilter::new()).unwrap(), vec![saved.clone()]);

    registry.delete(saved).unwrap();
    assert_eq!(controller.count(&QueryFilter::new()).unwrap(), 0);
}

// ── Statistics ───────────────────────────────────────────────────

#[test]
fn statistics_report_every_type_in_code_order() {
    let db = Database::open_in_memory().unwrap();
    let mut registry = ControllerRegistry::with_defaults(db.clone());
    registry.register(Box::new(FixedBacklog {
        identity_type: IdentityType::Product,
        available: 9,
    }));

    let mapper = PrimaryKeyMapper::new(db);
    let linked = registry.upsert(category("Shoes")).unwrap();
    registry.upsert(category("Hats")).unwrap();
    registry.upsert(category("Bags")).unwrap();
    mapper
        .save(IdentityType::Category, linked.id().endpoint().unwrap(), 1)
        .unwrap();

    let stats = registry.statistics(&QueryFilter::new()).unwrap();
    assert_eq!(
        stats,
        vec![
            Statistic { identity_type: IdentityType::Category, available: 2 },
            Statistic { identity_type: IdentityType::Product, available: 9 },
        ]
    );
}

#[test]
fn statistics_of_empty_registry_are_empty() {
    let registry = ControllerRegistry::new();
    assert!(registry.statistics(&QueryFilter::new()).unwrap().is_empty());
}
