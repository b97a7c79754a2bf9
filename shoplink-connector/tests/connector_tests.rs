use pretty_assertions::assert_eq;
use shoplink_connector::{Connector, ConnectorConfig, ConnectorInfo};
use shoplink_db::{Database, SCHEMA_VERSION};
use shoplink_model::{Category, CategoryI18n, QueryFilter};
use shoplink_sync::Statistic;
use shoplink_types::IdentityType;

#[test]
fn info_reports_bulk_platform() {
    let info = ConnectorInfo::current();
    assert_eq!(info.endpoint_version, "0.1");
    assert_eq!(info.platform_name, "Bulk");
    assert_eq!(info.platform_version, "");
}

#[test]
fn open_installs_schema() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConnectorConfig::for_database(dir.path().join("connector.db"));
    let connector = Connector::open(&config).unwrap();
    assert_eq!(connector.database().schema_version().unwrap(), SCHEMA_VERSION);
}

#[test]
fn sync_pass_through_connector() {
    let connector = Connector::with_database(Database::open_in_memory().unwrap());
    let controller = connector.registry().get(IdentityType::Category).unwrap();

    let saved = connector
        .registry()
        .upsert(Category::new().with_i18n(CategoryI18n::new("en", "Shoes")).into())
        .unwrap();
    assert_eq!(
        connector.statistics().unwrap(),
        vec![Statistic { identity_type: IdentityType::Category, available: 1 }]
    );

    let endpoint_id = saved.id().endpoint().unwrap();
    connector.mapper().save(IdentityType::Category, endpoint_id, 42).unwrap();
    assert!(controller.discover_unlinked(&QueryFilter::new()).unwrap().is_empty());
    assert_eq!(connector.statistics().unwrap()[0].available, 0);
}
