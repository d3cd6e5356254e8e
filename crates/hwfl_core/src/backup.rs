//! Backup file schema.
//!
//! # Responsibility
//! - Validate raw backup JSON into typed `BackupItem`s before any storage I/O.
//! - Encode entries into the same `{date, story}` shape for export.
//!
//! # Invariants
//! - Validation is all-or-nothing: one bad element rejects the whole backup.
//! - Every accepted `date` normalizes to a calendar day.

use crate::model::day::normalize_day;
use crate::model::entry::{BackupItem, Entry};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outcome of backup validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupValidation {
    Valid(Vec<BackupItem>),
    Invalid(BackupRejection),
}

/// Why a backup was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupRejection {
    MalformedJson(String),
    NotAnArray,
    NotAnObject { index: usize },
    MissingField { index: usize, field: &'static str },
    InvalidDate { index: usize, value: String },
}

impl Display for BackupRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedJson(details) => write!(f, "backup is not valid JSON: {details}"),
            Self::NotAnArray => write!(f, "backup must be an array of items"),
            Self::NotAnObject { index } => write!(f, "backup item {index} is not an object"),
            Self::MissingField { index, field } => {
                write!(f, "backup item {index} has no string `{field}` field")
            }
            Self::InvalidDate { index, value } => {
                write!(f, "backup item {index} has unreadable date `{value}`")
            }
        }
    }
}

impl Error for BackupRejection {}

/// Validates an already-parsed backup document.
pub fn validate_backup(value: &Value) -> BackupValidation {
    let Some(elements) = value.as_array() else {
        return BackupValidation::Invalid(BackupRejection::NotAnArray);
    };

    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        match validate_item(index, element) {
            Ok(item) => items.push(item),
            Err(rejection) => return BackupValidation::Invalid(rejection),
        }
    }

    BackupValidation::Valid(items)
}

/// Parses and validates backup file text.
pub fn parse_backup(raw: &str) -> BackupValidation {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => validate_backup(&value),
        Err(err) => BackupValidation::Invalid(BackupRejection::MalformedJson(err.to_string())),
    }
}

/// Encodes entries as a pretty-printed backup document.
pub fn encode_backup(entries: &[Entry]) -> serde_json::Result<String> {
    let items: Vec<BackupItem> = entries.iter().map(BackupItem::from).collect();
    serde_json::to_string_pretty(&items)
}

fn validate_item(index: usize, element: &Value) -> Result<BackupItem, BackupRejection> {
    let object = element
        .as_object()
        .ok_or(BackupRejection::NotAnObject { index })?;

    let date = object
        .get("date")
        .and_then(Value::as_str)
        .ok_or(BackupRejection::MissingField {
            index,
            field: "date",
        })?;
    let story = object
        .get("story")
        .and_then(Value::as_str)
        .ok_or(BackupRejection::MissingField {
            index,
            field: "story",
        })?;

    if normalize_day(date).is_none() {
        return Err(BackupRejection::InvalidDate {
            index,
            value: date.to_string(),
        });
    }

    Ok(BackupItem {
        date: date.to_string(),
        story: story.to_string(),
    })
}
