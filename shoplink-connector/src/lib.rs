//! Runtime wiring for the ShopLink connector.
//!
//! [`Connector`] opens the endpoint database once and hands out the
//! correlation store and the controller registry over that shared handle.

mod config;

pub use config::{ConfigError, ConfigResult, ConnectorConfig, DbConfig, DEFAULT_CONFIG_PATH};

use serde::Serialize;
use shoplink_db::{Database, DbResult};
use shoplink_mapping::PrimaryKeyMapper;
use shoplink_model::QueryFilter;
use shoplink_sync::{ControllerRegistry, Statistic, SyncResult};
use tracing::info;

/// Identity the connector reports to the host system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorInfo {
    pub endpoint_version: &'static str,
    pub platform_name: &'static str,
    pub platform_version: &'static str,
}

impl ConnectorInfo {
    pub const fn current() -> Self {
        Self {
            endpoint_version: "0.1",
            platform_name: "Bulk",
            platform_version: "",
        }
    }
}

/// An opened connector: database, correlation store and controllers.
pub struct Connector {
    db: Database,
    mapper: PrimaryKeyMapper,
    registry: ControllerRegistry,
}

impl Connector {
    /// Opens the configured database, installing the schema if needed.
    pub fn open(config: &ConnectorConfig) -> DbResult<Self> {
        let db = Database::open(&config.db.path, &config.db_options())?;
        info!("connector database ready at {}", config.db.path.display());
        Ok(Self::with_database(db))
    }

    /// Wires the connector over an already opened database.
    pub fn with_database(db: Database) -> Self {
        Self {
            mapper: PrimaryKeyMapper::new(db.clone()),
            registry: ControllerRegistry::with_defaults(db.clone()),
            db,
        }
    }

    pub fn info(&self) -> ConnectorInfo {
        ConnectorInfo::current()
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn mapper(&self) -> &PrimaryKeyMapper {
        &self.mapper
    }

    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    /// Unlinked-entity counts for every supported type.
    pub fn statistics(&self) -> SyncResult<Vec<Statistic>> {
        self.registry.statistics(&QueryFilter::new())
    }
}
