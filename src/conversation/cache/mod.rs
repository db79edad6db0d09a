//! Durable cache for the full chat list.
//!
//! The persistence contract is a single keyed record holding the ordered
//! chat list as serialized JSON. A missing or unparseable record is an empty
//! list, never an error the presentation layer has to see.

pub mod memory;
pub mod sqlite;

use std::future::Future;
use std::pin::Pin;

use crate::conversation::core::chat::Chat;
use crate::conversation::core::errors::ConversationResult;

pub use memory::MemoryChatCache;
pub use sqlite::SqliteChatCache;

/// Boxed future type for cache operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for durable storage of the chat list.
pub trait ChatCache: Send + Sync {
    /// Load the cached chat list.
    ///
    /// A missing or unparseable record yields an empty list.
    ///
    /// # Errors
    /// Returns an error only when storage access itself fails.
    fn load(&self) -> CacheFuture<'_, ConversationResult<Vec<Chat>>>;

    /// Persist the full chat list, replacing any previous record.
    ///
    /// # Errors
    /// Returns an error if serialization or storage access fails.
    fn save(&self, chats: &[Chat]) -> CacheFuture<'_, ConversationResult<()>>;

    /// Remove the cached record entirely.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn clear(&self) -> CacheFuture<'_, ConversationResult<()>>;
}

/// Decode a cached payload, falling back to an empty list when it does not
/// parse as a chat list.
pub(crate) fn parse_chat_list(payload: &str) -> Vec<Chat> {
    serde_json::from_str(payload).unwrap_or_else(|err| {
        tracing::debug!("chat cache payload unparseable, starting empty: {err}");
        Vec::new()
    })
}
