use staffdesk_core::db::migrations::latest_version;
use staffdesk_core::db::{open_db, open_db_in_memory, DbError};
use staffdesk_core::{
    ConnectionProvider, EmployeeService, EntityService, ErrorKind, ServiceError, StoreConfig,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["Departments", "Employees", "Projects", "Assignments"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn opened_connections_enforce_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("staffdesk.db"));

    let conn_first = open_db(&config).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&config).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "Assignments");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&StoreConfig::new(&path)).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_database_is_not_created_when_creation_is_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");
    let config = StoreConfig {
        create_if_missing: false,
        ..StoreConfig::new(&path)
    };

    let err = open_db(&config).unwrap_err();
    assert!(matches!(err, DbError::MissingDatabase(ref missing) if missing == &path));
    assert!(!path.exists());
}

#[test]
fn provider_initialize_and_probe_report_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::new(StoreConfig::new(dir.path().join("probe.db")));

    assert_eq!(provider.initialize().unwrap(), latest_version());

    let info = provider.probe().unwrap();
    assert_eq!(info.schema_version, latest_version());
    assert_eq!(info.database_path, provider.config().database_path);
    assert!(!info.sqlite_version.is_empty());
}

#[test]
fn service_calls_report_connectivity_failure_as_typed_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        create_if_missing: false,
        ..StoreConfig::new(dir.path().join("absent.db"))
    };
    let service: EmployeeService = EntityService::new(ConnectionProvider::new(config));

    let err = service.list().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connectivity);
    assert!(matches!(
        err,
        ServiceError::Connectivity(DbError::MissingDatabase(_))
    ));
    assert!(err.to_string().contains("cannot connect"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
