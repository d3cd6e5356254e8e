//! Journal domain model.
//!
//! # Responsibility
//! - Define the persisted `Entry` record and its input shapes.
//! - Own the single calendar-day normalization used for same-day matching.
//!
//! # Invariants
//! - Every entry carries an `EntryId` that never changes after creation.
//! - Same-day comparisons always go through `day::normalize_day`.

pub mod day;
pub mod entry;
