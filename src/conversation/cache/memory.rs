//! In-memory chat cache for tests and filesystem-less embedders.

use dashmap::DashMap;

use crate::conversation::cache::{CacheFuture, ChatCache, parse_chat_list};
use crate::conversation::core::chat::Chat;
use crate::conversation::core::config::StoreConfig;
use crate::conversation::core::errors::ConversationResult;

/// Keyed-record cache held entirely in memory.
///
/// Same record shape as [`super::SqliteChatCache`] (serialized JSON under the
/// configured key), so both implementations obey the same parse-or-empty
/// contract.
pub struct MemoryChatCache {
    key: String,
    entries: DashMap<String, String>,
}

impl MemoryChatCache {
    /// Create an empty cache using the configured storage key.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            key: config.storage_key.clone(),
            entries: DashMap::new(),
        }
    }
}

impl ChatCache for MemoryChatCache {
    fn load(&self) -> CacheFuture<'_, ConversationResult<Vec<Chat>>> {
        Box::pin(async move {
            Ok(self
                .entries
                .get(&self.key)
                .map_or_else(Vec::new, |entry| parse_chat_list(entry.value())))
        })
    }

    fn save(&self, chats: &[Chat]) -> CacheFuture<'_, ConversationResult<()>> {
        let serialized = serde_json::to_string(chats);
        Box::pin(async move {
            self.entries.insert(self.key.clone(), serialized?);
            Ok(())
        })
    }

    fn clear(&self) -> CacheFuture<'_, ConversationResult<()>> {
        Box::pin(async move {
            self.entries.remove(&self.key);
            Ok(())
        })
    }
}
