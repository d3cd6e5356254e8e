//! Core persistence engine for Homework for Life.
//! This crate owns the journal entry invariants: one entry per calendar day,
//! stable entry IDs, and most-recent-first ordering.

pub mod backup;
pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use backup::{encode_backup, parse_backup, validate_backup, BackupRejection, BackupValidation};
pub use config::StoreConfig;
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::day::{day_key, normalize_day};
pub use model::entry::{generate_entry_id, BackupItem, Entry, EntryId, NewEntry};
pub use repo::entry_repo::{EntryRepository, KvEntryRepository, StoreError, StoreResult};
pub use service::entry_store::EntryStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
