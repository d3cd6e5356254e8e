//! Entry collection persistence over a key-value backend.
//!
//! # Responsibility
//! - Read, parse and sort the entry blob stored under one key.
//! - Sort, serialize and write the full collection back in one `set`.
//!
//! # Invariants
//! - Stored order is never trusted; every load and every write re-sorts by
//!   date descending.
//! - A missing blob is an empty collection, not an error.
//! - Errors are typed by failure stage so the service can log a stable code.

use crate::backup::BackupRejection;
use crate::config::StoreConfig;
use crate::kv::{KeyValueStore, KvError};
use crate::model::day::sort_key;
use crate::model::entry::Entry;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure taxonomy for entry persistence.
#[derive(Debug)]
pub enum StoreError {
    BackendRead(KvError),
    BackendWrite(KvError),
    /// Stored blob could not be parsed, or the collection could not be encoded.
    Serialization(serde_json::Error),
    /// Import input was rejected before any storage access.
    Validation(BackupRejection),
}

impl StoreError {
    /// Stable code used in diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BackendRead(_) => "backend_read_failed",
            Self::BackendWrite(_) => "backend_write_failed",
            Self::Serialization(_) => "serialization_failed",
            Self::Validation(_) => "validation_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BackendRead(err) => write!(f, "failed to read entries: {err}"),
            Self::BackendWrite(err) => write!(f, "failed to write entries: {err}"),
            Self::Serialization(err) => write!(f, "entry data is not valid: {err}"),
            Self::Validation(rejection) => write!(f, "invalid input: {rejection}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BackendRead(err) | Self::BackendWrite(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Validation(rejection) => Some(rejection),
        }
    }
}

impl From<BackupRejection> for StoreError {
    fn from(value: BackupRejection) -> Self {
        Self::Validation(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Whole-collection access to persisted entries.
pub trait EntryRepository {
    /// Loads every entry, sorted by date descending.
    fn load_entries(&self) -> StoreResult<Vec<Entry>>;
    /// Sorts and replaces the whole persisted collection.
    fn replace_entries(&self, entries: Vec<Entry>) -> StoreResult<()>;
    /// Reads a raw blob stored under another key of the same backend.
    fn load_raw(&self, key: &str) -> StoreResult<Option<String>>;
}

/// Entry repository storing one JSON array under `StoreConfig::entries_key`.
pub struct KvEntryRepository<S: KeyValueStore> {
    backend: S,
    entries_key: String,
}

impl<S: KeyValueStore> KvEntryRepository<S> {
    pub fn new(backend: S, config: &StoreConfig) -> Self {
        Self {
            backend,
            entries_key: config.entries_key.clone(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}

impl<S: KeyValueStore> EntryRepository for KvEntryRepository<S> {
    fn load_entries(&self) -> StoreResult<Vec<Entry>> {
        let Some(blob) = self.load_raw(&self.entries_key)? else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<Entry> = serde_json::from_str(&blob)?;
        sort_entries(&mut entries);
        Ok(entries)
    }

    fn replace_entries(&self, mut entries: Vec<Entry>) -> StoreResult<()> {
        sort_entries(&mut entries);
        let blob = serde_json::to_string(&entries)?;
        self.backend
            .set(&self.entries_key, &blob)
            .map_err(StoreError::BackendWrite)
    }

    fn load_raw(&self, key: &str) -> StoreResult<Option<String>> {
        self.backend.get(key).map_err(StoreError::BackendRead)
    }
}

/// Sorts entries most-recent first; equal dates keep their relative order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_cached_key(|entry| std::cmp::Reverse(sort_key(&entry.date)));
}

#[cfg(test)]
mod tests {
    use super::{sort_entries, EntryRepository, KvEntryRepository, StoreError};
    use crate::backup::BackupRejection;
    use crate::config::StoreConfig;
    use crate::kv::{KeyValueStore, MemoryKvStore};
    use crate::model::entry::Entry;

    #[test]
    fn missing_blob_loads_empty() {
        let repo = KvEntryRepository::new(MemoryKvStore::new(), &StoreConfig::default());
        assert!(repo.load_entries().unwrap().is_empty());
    }

    #[test]
    fn malformed_blob_is_serialization_error() {
        let backend = MemoryKvStore::with_value("hwfl_entries", "{not json");
        let repo = KvEntryRepository::new(backend, &StoreConfig::default());
        let err = repo.load_entries().unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
        assert_eq!(err.code(), "serialization_failed");
    }

    #[test]
    fn rejected_backup_maps_to_validation_error() {
        let err = StoreError::from(BackupRejection::NotAnArray);
        assert!(matches!(err, StoreError::Validation(BackupRejection::NotAnArray)));
        assert_eq!(err.code(), "validation_failed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn load_resorts_stored_order() {
        let blob = r#"[
            {"id":"1","date":"2023-01-01T00:00:00.000Z","text":"one"},
            {"id":"3","date":"2023-01-03","text":"three"},
            {"id":"2","date":"2023-01-02T00:00:00.000Z","text":"two"}
        ]"#;
        let repo = KvEntryRepository::new(
            MemoryKvStore::with_value("hwfl_entries", blob),
            &StoreConfig::default(),
        );
        let ids: Vec<_> = repo
            .load_entries()
            .unwrap()
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[test]
    fn replace_writes_sorted_blob_under_configured_key() {
        let config = StoreConfig::with_entries_key("profile_a");
        let repo = KvEntryRepository::new(MemoryKvStore::new(), &config);
        repo.replace_entries(vec![
            Entry::with_id("old", "2024-01-01", "a"),
            Entry::with_id("new", "2024-02-01", "b"),
        ])
        .unwrap();

        let blob = repo.backend().get("profile_a").unwrap().unwrap();
        let stored: Vec<Entry> = serde_json::from_str(&blob).unwrap();
        assert_eq!(stored[0].id, "new");
        assert_eq!(repo.backend().get("hwfl_entries").unwrap(), None);
    }

    #[test]
    fn sort_is_stable_for_equal_dates_and_puts_unparseable_last() {
        let mut entries = vec![
            Entry::with_id("junk", "someday", ""),
            Entry::with_id("a", "2024-05-01", ""),
            Entry::with_id("b", "2024-05-01", ""),
            Entry::with_id("c", "2024-05-03", ""),
        ];
        sort_entries(&mut entries);
        let ids: Vec<_> = entries.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b", "junk"]);
    }
}
