//! Entry store use-case service.
//!
//! # Responsibility
//! - Provide list/save/update/delete/import/export over the entry collection.
//! - Enforce one entry per calendar day on save and import.
//! - Convert every failure into a logged diagnostic plus a safe default.
//!
//! # Invariants
//! - Only creation paths mint IDs; same-day saves and import merges keep the
//!   existing `id`.
//! - Each mutation is one read followed by at most one full-collection write.
//! - Overlapping mutations resolve last-write-wins on the whole blob. There is
//!   no locking; callers are expected to issue one mutation at a time.

use crate::backup::{encode_backup, parse_backup, validate_backup, BackupValidation};
use crate::config::StoreConfig;
use crate::kv::KeyValueStore;
use crate::model::day::{day_key, format_day, normalize_day};
use crate::model::entry::{BackupItem, Entry, NewEntry};
use crate::repo::entry_repo::{EntryRepository, KvEntryRepository, StoreError, StoreResult};
use log::{error, info};
use serde_json::Value;
use std::collections::HashMap;

/// Journal entry store. All public operations are infallible from the
/// caller's point of view.
pub struct EntryStore<R: EntryRepository> {
    repo: R,
    legacy_stories_key: Option<String>,
}

impl<S: KeyValueStore> EntryStore<KvEntryRepository<S>> {
    /// Builds a store writing to `backend` under the keys in `config`.
    pub fn from_backend(backend: S, config: StoreConfig) -> Self {
        let repo = KvEntryRepository::new(backend, &config);
        Self {
            repo,
            legacy_stories_key: config.legacy_stories_key,
        }
    }
}

impl<R: EntryRepository> EntryStore<R> {
    /// Creates a store over a repository, without a legacy stories source.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            legacy_stories_key: None,
        }
    }

    /// Returns all entries, most recent first.
    ///
    /// Read or parse failures are logged and yield an empty list.
    pub fn list(&self) -> Vec<Entry> {
        match self.repo.load_entries() {
            Ok(entries) => entries,
            Err(err) => {
                log_failure("entries_list", &err);
                Vec::new()
            }
        }
    }

    /// Returns the entry saved for the same calendar day as `date`, if any.
    pub fn entry_for_day(&self, date: &str) -> Option<Entry> {
        let key = day_key(date);
        self.list().into_iter().find(|entry| entry.day_key() == key)
    }

    /// Saves a reflection, overwriting the same day's entry when one exists.
    ///
    /// The overwritten entry keeps its `id` and takes the new `date` and `text`.
    pub fn save(&self, entry: NewEntry) -> bool {
        self.run("entry_save", || {
            let mut entries = self.repo.load_entries()?;
            upsert_for_day(&mut entries, entry);
            self.repo.replace_entries(entries)
        })
    }

    /// Replaces the entry with the same `id` verbatim.
    ///
    /// An unknown `id` rewrites the collection unchanged and still succeeds.
    pub fn update(&self, entry: Entry) -> bool {
        self.run("entry_update", || {
            let mut entries = self.repo.load_entries()?;
            if let Some(slot) = entries.iter_mut().find(|existing| existing.id == entry.id) {
                *slot = entry;
            }
            self.repo.replace_entries(entries)
        })
    }

    /// Removes every entry with the given `id`. Missing IDs are not an error.
    pub fn delete(&self, id: &str) -> bool {
        self.run("entry_delete", || {
            let mut entries = self.repo.load_entries()?;
            entries.retain(|entry| entry.id != id);
            self.repo.replace_entries(entries)
        })
    }

    /// Merges a parsed backup document into the collection.
    ///
    /// The document is validated before any storage access; a rejected
    /// backup leaves storage untouched.
    pub fn import_entries(&self, raw: &Value) -> bool {
        self.import_validated("entries_import", validate_backup(raw))
    }

    /// Parses backup file text and merges it like `import_entries`.
    pub fn import_backup_json(&self, raw: &str) -> bool {
        self.import_validated("entries_import", parse_backup(raw))
    }

    /// Merges reflections stored by earlier app versions under the legacy key.
    ///
    /// Returns `true` when there is nothing to migrate. The legacy blob is
    /// left in place; merging again is a no-op because import merges by day.
    pub fn import_legacy_stories(&self) -> bool {
        let Some(legacy_key) = self.legacy_stories_key.as_deref() else {
            return true;
        };

        let raw = match self.repo.load_raw(legacy_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return true,
            Err(err) => {
                log_failure("legacy_import", &err);
                return false;
            }
        };

        self.import_validated("legacy_import", parse_backup(&raw))
    }

    /// Encodes the current collection as a `{date, story}` backup document.
    pub fn export_backup(&self) -> Option<String> {
        let entries = self.list();
        match encode_backup(&entries) {
            Ok(encoded) => {
                info!(
                    "event=entries_export module=store status=ok count={}",
                    entries.len()
                );
                Some(encoded)
            }
            Err(err) => {
                log_failure("entries_export", &StoreError::Serialization(err));
                None
            }
        }
    }

    fn import_validated(&self, event: &'static str, validation: BackupValidation) -> bool {
        let items = match validation {
            BackupValidation::Valid(items) => items,
            BackupValidation::Invalid(rejection) => {
                log_failure(event, &StoreError::from(rejection));
                return false;
            }
        };

        let count = items.len();
        let ok = self.run(event, || {
            let mut entries = self.repo.load_entries()?;
            merge_backup(&mut entries, items);
            self.repo.replace_entries(entries)
        });
        if ok {
            info!("event={event} module=store status=ok items={count}");
        }
        ok
    }

    fn run(&self, event: &'static str, op: impl FnOnce() -> StoreResult<()>) -> bool {
        match op() {
            Ok(()) => true,
            Err(err) => {
                log_failure(event, &err);
                false
            }
        }
    }
}

/// Applies a save to an in-memory collection.
///
/// Replaces the first entry on the same calendar day (keeping its `id`) or
/// prepends a new entry with a fresh `id`.
pub fn upsert_for_day(entries: &mut Vec<Entry>, entry: NewEntry) {
    let key = day_key(&entry.date);
    match entries.iter_mut().find(|existing| existing.day_key() == key) {
        Some(existing) => {
            existing.date = entry.date;
            existing.text = entry.text;
        }
        None => entries.insert(0, Entry::new(entry.date, entry.text)),
    }
}

/// Merges backup items into an in-memory collection.
///
/// Items landing on an occupied day replace that entry's text only. Other
/// items create entries dated with the normalized `YYYY-MM-DD` day. Later
/// items for the same day win.
pub fn merge_backup(entries: &mut Vec<Entry>, items: Vec<BackupItem>) {
    let mut by_day: HashMap<String, usize> = HashMap::with_capacity(entries.len() + items.len());
    for (index, entry) in entries.iter().enumerate() {
        by_day.entry(entry.day_key()).or_insert(index);
    }

    for item in items {
        let day = match normalize_day(&item.date) {
            Some(day) => format_day(day),
            None => item.date.trim().to_string(),
        };

        match by_day.get(&day) {
            Some(&index) => entries[index].text = item.story,
            None => {
                by_day.insert(day.clone(), entries.len());
                entries.push(Entry::new(day, item.story));
            }
        }
    }
}

fn log_failure(event: &str, err: &StoreError) {
    error!(
        "event={event} module=store status=error error_code={} error={err}",
        err.code()
    );
}
