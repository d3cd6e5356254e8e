use hwfl_core::db::migrations::latest_version;
use hwfl_core::db::{open_db, open_db_in_memory};
use hwfl_core::{EntryStore, KeyValueStore, KvError, NewEntry, SqliteKvStore, StoreConfig};
use rusqlite::Connection;

#[test]
fn get_returns_none_for_absent_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    assert_eq!(store.get("hwfl_entries").unwrap(), None);
}

#[test]
fn set_upserts_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();

    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn entries_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hwfl.db");

    {
        let conn = open_db(&path).unwrap();
        let store = EntryStore::from_backend(
            SqliteKvStore::try_new(&conn).unwrap(),
            StoreConfig::default(),
        );
        assert!(store.save(NewEntry::new("2024-05-01", "Saw a heron")));
    }

    let conn = open_db(&path).unwrap();
    let store = EntryStore::from_backend(
        SqliteKvStore::try_new(&conn).unwrap(),
        StoreConfig::default(),
    );
    let entries = store.list();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Saw a heron");
}

#[test]
fn rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKvStore::try_new(&conn) {
        Err(KvError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn rejects_connection_without_kv_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteKvStore::try_new(&conn),
        Err(KvError::MissingRequiredTable("kv_entries"))
    ));
}
