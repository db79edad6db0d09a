//! Core conversation types and identifiers.

pub mod chat;
pub mod config;
pub mod errors;
pub mod ids;
pub mod message;

pub use chat::{Chat, derive_title};
pub use config::StoreConfig;
pub use errors::{ConversationError, ConversationResult};
pub use ids::{ChatId, MessageId};
pub use message::{Message, Role};
