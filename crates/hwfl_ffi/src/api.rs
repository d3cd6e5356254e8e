//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the entry store operations to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + `message`.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call opens the configured database, runs one store operation, and
//!   closes it again; there is no cached connection.

use hwfl_core::db::open_db;
use hwfl_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Entry, EntryStore, KvEntryRepository, NewEntry, SqliteKvStore, StoreConfig,
};
use log::error;
use std::path::PathBuf;
use std::sync::{OnceLock, RwLock};

const ENTRY_DB_FILE_NAME: &str = "hwfl_entries.sqlite3";
const DB_PATH_ENV: &str = "HWFL_DB_PATH";

static CONFIGURED_DB_PATH: OnceLock<RwLock<Option<PathBuf>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Sets the database file used by subsequent calls.
///
/// Typically called once at startup with the app documents directory.
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }
    match db_path_slot().write() {
        Ok(mut slot) => {
            *slot = Some(PathBuf::from(trimmed));
            String::new()
        }
        Err(_) => "db path lock poisoned".to_string(),
    }
}

/// Entry projection handed to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryItem {
    pub id: String,
    pub date: String,
    pub text: String,
}

impl From<Entry> for EntryItem {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            text: entry.text,
        }
    }
}

/// Generic action response envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn from_outcome(ok: bool, success: &str, failure: &str) -> Self {
        Self {
            ok,
            message: (if ok { success } else { failure }).to_string(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Lists all entries, most recent first. Empty on any failure.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_list() -> Vec<EntryItem> {
    with_entry_store(|store| store.list())
        .unwrap_or_default()
        .into_iter()
        .map(EntryItem::from)
        .collect()
}

/// Returns the entry saved for the same calendar day as `date`.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_for_day(date: String) -> Option<EntryItem> {
    with_entry_store(|store| store.entry_for_day(&date))
        .ok()
        .flatten()
        .map(EntryItem::from)
}

/// Saves today's (or any day's) reflection, overwriting the same day.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_save(date: String, text: String) -> EntryActionResponse {
    run_action(
        |store| store.save(NewEntry::new(date, text)),
        "Entry saved.",
        "Could not save entry.",
    )
}

/// Replaces the entry with `id` by the supplied fields.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_update(id: String, date: String, text: String) -> EntryActionResponse {
    run_action(
        |store| store.update(Entry::with_id(id, date, text)),
        "Entry updated.",
        "Could not update entry.",
    )
}

/// Deletes the entry with `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete(id: String) -> EntryActionResponse {
    run_action(
        |store| store.delete(&id),
        "Entry deleted.",
        "Could not delete entry.",
    )
}

/// Merges a backup file's text into the journal.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_import(json: String) -> EntryActionResponse {
    run_action(
        |store| store.import_backup_json(&json),
        "Your data has been imported.",
        "An error occurred while importing your data.",
    )
}

/// Merges reflections saved by earlier app versions into the journal.
///
/// Succeeds when there is nothing to migrate.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_import_legacy() -> EntryActionResponse {
    run_action(
        |store| store.import_legacy_stories(),
        "Earlier reflections have been imported.",
        "Could not import earlier reflections.",
    )
}

/// Encodes all entries as a backup document.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_export() -> Option<String> {
    with_entry_store(|store| store.export_backup()).ok().flatten()
}

fn run_action(
    op: impl FnOnce(&EntryStore<KvEntryRepository<SqliteKvStore<'_>>>) -> bool,
    success: &str,
    failure: &str,
) -> EntryActionResponse {
    match with_entry_store(op) {
        Ok(ok) => EntryActionResponse::from_outcome(ok, success, failure),
        Err(err) => EntryActionResponse::failure(err),
    }
}

fn with_entry_store<T>(
    f: impl FnOnce(&EntryStore<KvEntryRepository<SqliteKvStore<'_>>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_entry_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        error!("event=ffi_store_open module=ffi status=error error_code=db_open_failed error={err}");
        format!("entry DB open failed: {err}")
    })?;
    let backend = SqliteKvStore::try_new(&conn).map_err(|err| {
        error!(
            "event=ffi_store_open module=ffi status=error error_code=store_init_failed error={err}"
        );
        format!("entry store init failed: {err}")
    })?;
    let store = EntryStore::from_backend(backend, StoreConfig::from_env());
    Ok(f(&store))
}

fn db_path_slot() -> &'static RwLock<Option<PathBuf>> {
    CONFIGURED_DB_PATH.get_or_init(|| RwLock::new(None))
}

fn resolve_entry_db_path() -> PathBuf {
    if let Ok(slot) = db_path_slot().read() {
        if let Some(path) = slot.as_ref() {
            return path.clone();
        }
    }
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(ENTRY_DB_FILE_NAME)
}
