//! The per-entity-type synchronization contract and its registry.

use crate::category::CategoryController;
use crate::error::{SyncError, SyncResult};
use serde::Serialize;
use shoplink_db::Database;
use shoplink_model::{EntityRecord, QueryFilter};
use shoplink_types::IdentityType;
use std::collections::BTreeMap;

/// Capabilities every entity-type controller provides.
///
/// Controllers are stateless across calls; whether an entity is linked is
/// decided solely by the presence of its row in the correlation store.
pub trait SyncController: Send + Sync {
    /// The entity type this controller owns.
    fn identity_type(&self) -> IdentityType;

    /// Returns every stored entity of this type that has no correlation row
    /// of this type, fully hydrated.
    fn discover_unlinked(&self, filter: &QueryFilter) -> SyncResult<Vec<EntityRecord>>;

    /// Inserts or updates the record keyed by its endpoint id, minting one
    /// when absent, and returns it with the endpoint id populated.
    fn upsert(&self, record: EntityRecord) -> SyncResult<EntityRecord>;

    /// Removes the record if it was ever written; otherwise returns it
    /// unchanged.
    fn delete(&self, record: EntityRecord) -> SyncResult<EntityRecord>;

    /// Counts what [`discover_unlinked`](Self::discover_unlinked) would
    /// return for the same filter, without hydrating anything.
    fn count(&self, filter: &QueryFilter) -> SyncResult<u64>;
}

/// Unlinked-entity count for one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistic {
    pub identity_type: IdentityType,
    pub available: u64,
}

/// Selects the controller for an entity type.
#[derive(Default)]
pub struct ControllerRegistry {
    controllers: BTreeMap<IdentityType, Box<dyn SyncController>>,
}

impl ControllerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in controller over `db`.
    pub fn with_defaults(db: Database) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CategoryController::new(db)));
        registry
    }

    /// Registers a controller, returning the one it replaces.
    pub fn register(
        &mut self,
        controller: Box<dyn SyncController>,
    ) -> Option<Box<dyn SyncController>> {
        self.controllers.insert(controller.identity_type(), controller)
    }

    /// Returns the controller for `identity_type`.
    pub fn get(&self, identity_type: IdentityType) -> SyncResult<&dyn SyncController> {
        self.controllers
            .get(&identity_type)
            .map(|c| &**c)
            .ok_or(SyncError::UnsupportedType(identity_type))
    }

    /// The registered entity types, in code order.
    pub fn types(&self) -> impl Iterator<Item = IdentityType> + '_ {
        self.controllers.keys().copied()
    }

    /// Routes a record to its type's controller for upsert.
    pub fn upsert(&self, record: EntityRecord) -> SyncResult<EntityRecord> {
        self.get(record.identity_type())?.upsert(record)
    }

    /// Routes a record to its type's controller for deletion.
    pub fn delete(&self, record: EntityRecord) -> SyncResult<EntityRecord> {
        self.get(record.identity_type())?.delete(record)
    }

    /// Counts unlinked entities for every registered type.
    pub fn statistics(&self, filter: &QueryFilter) -> SyncResult<Vec<Statistic>> {
        self.controllers
            .iter()
            .map(|(identity_type, controller)| {
                Ok(Statistic {
                    identity_type: *identity_type,
                    available: controller.count(filter)?,
                })
            })
            .collect()
    }
}
