//! Configuration for the conversation store and its cache.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::conversation::core::errors::{ConversationError, ConversationResult};

/// Configuration for the conversation store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the serialized chat list is stored under.
    pub storage_key: String,
    /// `SQLite` database path for the durable cache.
    pub sqlite_path: PathBuf,
    /// Cache table name.
    pub cache_table: String,
    /// Sentinel text shown in the assistant placeholder while a send is in
    /// flight.
    pub placeholder_text: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "chats_v1".to_string(),
            sqlite_path: PathBuf::from("parlance.sqlite"),
            cache_table: "chat_cache".to_string(),
            placeholder_text: "Thinking…".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache database path.
    #[must_use]
    pub fn with_sqlite_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sqlite_path = path.into();
        self
    }

    /// Set the storage key for the chat-list record.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the placeholder sentinel text.
    #[must_use]
    pub fn with_placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = text.into();
        self
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any value is empty.
    pub fn validate(&self) -> ConversationResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(ConversationError::InvalidConfig(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.cache_table.trim().is_empty() {
            return Err(ConversationError::InvalidConfig(
                "cache_table must not be empty".to_string(),
            ));
        }
        if self.placeholder_text.is_empty() {
            return Err(ConversationError::InvalidConfig(
                "placeholder_text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
