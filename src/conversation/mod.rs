//! Conversation state management.
//!
//! This subsystem is the client-side core of the chat application,
//! organized into:
//! - `core`: Configuration, errors, IDs, messages, and chat records
//! - `cache`: Durable chat-list cache with `SQLite` and in-memory backends
//! - `store`: The conversation store, its send state machine, and the
//!   hydration merge

pub mod cache;
pub mod core;
pub mod store;

// Re-export commonly used types for convenience
pub use self::core::{
    Chat, ChatId, ConversationError, ConversationResult, Message, MessageId, Role, StoreConfig,
    derive_title,
};
pub use cache::{CacheFuture, ChatCache, MemoryChatCache, SqliteChatCache};
pub use store::{ConversationStore, SendOutcome, SendPhase, StoreBackends, StoreSnapshot};
