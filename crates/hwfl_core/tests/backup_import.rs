use hwfl_core::{EntryStore, KeyValueStore, MemoryKvStore, NewEntry, StoreConfig};

#[test]
fn export_then_import_into_empty_store_reproduces_days_and_texts() {
    let source = EntryStore::from_backend(MemoryKvStore::new(), StoreConfig::default());
    assert!(source.save(NewEntry::new("2024-05-01T08:00:00.000Z", "Found a note from Gran")));
    assert!(source.save(NewEntry::new("2024-05-03", "Bus driver waited for me")));

    let backup = source.export_backup().expect("export should succeed");

    let target = EntryStore::from_backend(MemoryKvStore::new(), StoreConfig::default());
    assert!(target.import_backup_json(&backup));

    let exported: Vec<_> = source
        .list()
        .into_iter()
        .map(|entry| (entry.day_key(), entry.text))
        .collect();
    let imported: Vec<_> = target
        .list()
        .into_iter()
        .map(|entry| (entry.day_key(), entry.text))
        .collect();
    assert_eq!(exported, imported);
}

#[test]
fn export_of_empty_store_is_empty_array() {
    let store = EntryStore::from_backend(MemoryKvStore::new(), StoreConfig::default());
    let backup = store.export_backup().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&backup).unwrap();
    assert_eq!(parsed, serde_json::json!([]));
}

#[test]
fn reimporting_own_export_is_a_no_op() {
    let store = EntryStore::from_backend(MemoryKvStore::new(), StoreConfig::default());
    assert!(store.save(NewEntry::new("2024-05-01", "one")));
    assert!(store.save(NewEntry::new("2024-05-02", "two")));
    let before = store.list();

    let backup = store.export_backup().unwrap();
    assert!(store.import_backup_json(&backup));

    assert_eq!(store.list(), before);
}

#[test]
fn import_backup_json_rejects_malformed_text() {
    let store = EntryStore::from_backend(MemoryKvStore::new(), StoreConfig::default());
    assert!(!store.import_backup_json("[{\"date\": \"2024-05-01\""));
    assert!(store.list().is_empty());
}

#[test]
fn legacy_stories_merge_into_entries_once() {
    let backend = MemoryKvStore::with_value(
        "dailyStories",
        r#"[{"date":"2024-05-01","story":"legacy one"},{"date":"2024-05-02","story":"legacy two"}]"#,
    );
    let store = EntryStore::from_backend(&backend, StoreConfig::default());
    assert!(store.save(NewEntry::new("2024-05-02", "current two")));
    let kept_id = store.list()[0].id.clone();

    assert!(store.import_legacy_stories());
    let after_first = store.list();
    assert_eq!(after_first.len(), 2);
    assert_eq!(after_first[0].id, kept_id);
    assert_eq!(after_first[0].text, "legacy two");
    assert_eq!(after_first[1].text, "legacy one");

    assert!(store.import_legacy_stories());
    assert_eq!(store.list(), after_first);
    assert!(backend.get("dailyStories").unwrap().is_some());
}

#[test]
fn legacy_import_without_legacy_blob_succeeds_and_writes_nothing() {
    let backend = MemoryKvStore::new();
    let store = EntryStore::from_backend(&backend, StoreConfig::default());

    assert!(store.import_legacy_stories());
    assert_eq!(backend.get("hwfl_entries").unwrap(), None);
}

#[test]
fn legacy_import_is_disabled_without_legacy_key() {
    let backend = MemoryKvStore::with_value("dailyStories", "not even json");
    let store = EntryStore::from_backend(&backend, StoreConfig::with_entries_key("hwfl_entries"));

    assert!(store.import_legacy_stories());
    assert!(store.list().is_empty());
}

#[test]
fn corrupt_legacy_blob_fails_without_writing() {
    let backend = MemoryKvStore::with_value("dailyStories", "{oops");
    let store = EntryStore::from_backend(&backend, StoreConfig::default());

    assert!(!store.import_legacy_stories());
    assert_eq!(backend.get("hwfl_entries").unwrap(), None);
}
