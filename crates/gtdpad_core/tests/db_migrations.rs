use gtdpad_core::db::migrations::latest_version;
use gtdpad_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn in_memory_database_gets_the_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), latest_version());
    assert!(table_exists(&conn, "kv_entries"));
}

#[test]
fn reopening_a_file_database_keeps_its_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gtdpad.db");

    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();

    assert_eq!(user_version(&conn), latest_version());
    assert!(table_exists(&conn, "kv_entries"));
}

#[test]
fn newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
    let conn = Connection::open(&path).unwrap();
    assert_eq!(user_version(&conn), 42);
    assert!(!table_exists(&conn, "kv_entries"));
}

#[test]
fn non_database_file_is_a_sqlite_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "plain text, not a database\n".repeat(64)).unwrap();

    let err = open_db(&path).unwrap_err();

    assert!(matches!(err, DbError::Sqlite(_)));
}

#[test]
fn blank_keys_violate_the_table_check() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES ('  ', x'00');",
        [],
    );

    assert!(result.is_err());
}

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &Connection, name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [name],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        == 1
}
