//! SQLite-backed key-value store.
//!
//! # Invariants
//! - `set` is a single UPSERT statement, so a value is replaced entirely or
//!   not at all.
//! - Construction rejects connections that were not migrated by `db::open_db`.

use super::{KeyValueStore, KvError, KvResult};
use crate::db::migrations::{current_user_version, latest_version};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_entries";

/// Key-value store over the `kv_entries` table of a migrated connection.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection after checking its schema is ready.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when the version is current but the table is gone.
    pub fn try_new(conn: &'conn Connection) -> KvResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version < expected_version {
            return Err(KvError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [KV_TABLE],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Err(KvError::MissingRequiredTable(KV_TABLE));
        }

        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=kv_set module=kv status=ok backend=sqlite value_bytes={}",
            value.len()
        );
        Ok(())
    }
}
