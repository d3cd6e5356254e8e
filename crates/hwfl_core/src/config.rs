//! Entry store configuration.
//!
//! Storage keys are injected into each store instead of living in module
//! globals, so tests and multiple profiles can use isolated keys.

/// Key holding the serialized entry collection.
pub const DEFAULT_ENTRIES_KEY: &str = "hwfl_entries";
/// Key earlier app versions used for `{date, story}` reflections.
pub const DEFAULT_LEGACY_STORIES_KEY: &str = "dailyStories";
/// Environment variable overriding the entries key.
pub const ENTRIES_KEY_ENV: &str = "HWFL_ENTRIES_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub entries_key: String,
    /// Source for `EntryStore::import_legacy_stories`; `None` disables it.
    pub legacy_stories_key: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            entries_key: DEFAULT_ENTRIES_KEY.to_string(),
            legacy_stories_key: Some(DEFAULT_LEGACY_STORIES_KEY.to_string()),
        }
    }
}

impl StoreConfig {
    /// Config using a custom entries key and no legacy source.
    pub fn with_entries_key(key: impl Into<String>) -> Self {
        Self {
            entries_key: key.into(),
            legacy_stories_key: None,
        }
    }

    /// Defaults, with the entries key overridden by `HWFL_ENTRIES_KEY` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENTRIES_KEY_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                config.entries_key = trimmed.to_string();
            }
        }
        config
    }
}
