//! Key-value persistence backend contract.
//!
//! # Responsibility
//! - Define the string-keyed get/set contract the entry repository writes to.
//! - Provide in-memory and SQLite implementations.
//!
//! # Invariants
//! - `set` replaces the whole value for a key in one step; a failed `set`
//!   leaves the previous value readable.
//! - Backends offer no transactions across calls.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Backend transport error.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Connection schema is older than this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// A lock guarding in-process state was poisoned by a panicking writer.
    Poisoned,
    /// Backend refused the operation for an implementation-specific reason.
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::Poisoned => write!(f, "key-value store lock poisoned"),
            Self::Unavailable(reason) => write!(f, "key-value store unavailable: {reason}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed persistence backend.
pub trait KeyValueStore {
    /// Reads the value stored under `key`; `Ok(None)` when absent.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }
}
