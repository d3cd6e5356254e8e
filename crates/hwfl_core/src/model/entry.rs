//! Journal entry model.
//!
//! # Responsibility
//! - Define the persisted `Entry` record (`id`, `date`, `text`).
//! - Mint collision-resistant entry IDs.
//!
//! # Invariants
//! - `id` is assigned once, at creation, and never rewritten by edits or merges.
//! - Wire field names are `id`, `date`, `text` for stored entries and
//!   `date`, `story` for backup items.

use crate::model::day;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ID_RANDOM_SUFFIX_LEN: usize = 8;

/// Stable identifier of a journal entry.
///
/// Kept as a plain string: entries written by earlier app versions carry
/// millisecond-timestamp IDs that must round-trip untouched.
pub type EntryId = String;

/// One persisted daily reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    /// Calendar day the reflection belongs to, as supplied by the caller.
    pub date: String,
    pub text: String,
}

impl Entry {
    /// Creates an entry with a freshly generated ID.
    pub fn new(date: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_id(generate_entry_id(), date, text)
    }

    /// Creates an entry with a caller-provided ID.
    ///
    /// Used by update paths and tests where identity already exists.
    pub fn with_id(id: impl Into<EntryId>, date: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            text: text.into(),
        }
    }

    /// `YYYY-MM-DD` key used for same-day matching.
    pub fn day_key(&self) -> String {
        day::day_key(&self.date)
    }
}

/// Save request: an entry that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub date: String,
    pub text: String,
}

impl NewEntry {
    pub fn new(date: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            text: text.into(),
        }
    }
}

/// One `{date, story}` element of a backup file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupItem {
    pub date: String,
    pub story: String,
}

impl From<&Entry> for BackupItem {
    fn from(entry: &Entry) -> Self {
        Self {
            date: entry.date.clone(),
            story: entry.text.clone(),
        }
    }
}

/// Generates a new entry ID.
///
/// Format: `<unix-micros>-<8 hex chars>`. The random suffix keeps IDs unique
/// when several are minted within the same microsecond.
pub fn generate_entry_id() -> EntryId {
    let micros = Utc::now().timestamp_micros();
    let random = Uuid::new_v4().simple().to_string();
    format!("{micros}-{}", &random[..ID_RANDOM_SUFFIX_LEN])
}

#[cfg(test)]
mod tests {
    use super::{generate_entry_id, BackupItem, Entry};
    use std::collections::HashSet;

    #[test]
    fn ids_do_not_collide_in_tight_loop() {
        let ids: HashSet<_> = (0..1_000).map(|_| generate_entry_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn id_has_timestamp_prefix_and_hex_suffix() {
        let id = generate_entry_id();
        let (stamp, suffix) = id.split_once('-').expect("id should contain a separator");
        assert!(stamp.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn entry_serializes_with_wire_field_names() {
        let entry = Entry::with_id("1", "2024-05-01", "Walked the dog");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["text"], "Walked the dog");
    }

    #[test]
    fn backup_item_maps_text_to_story() {
        let entry = Entry::with_id("1", "2024-05-01", "Walked the dog");
        let item = BackupItem::from(&entry);
        assert_eq!(item.date, "2024-05-01");
        assert_eq!(item.story, "Walked the dog");
    }

    #[test]
    fn day_key_ignores_time_component() {
        let entry = Entry::new("2023-01-03T00:00:00.000Z", "x");
        assert_eq!(entry.day_key(), "2023-01-03");
        assert!(!entry.id.is_empty());
    }
}
