//! Error types for the conversation subsystem.

use thiserror::Error;

/// Conversation subsystem error type.
///
/// These never cross the store boundary toward the presentation layer; the
/// store converts or swallows them. They do surface from cache construction
/// and from the cache trait itself.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// `SQLite` storage error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result alias for conversation operations.
pub type ConversationResult<T> = Result<T, ConversationError>;
