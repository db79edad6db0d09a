//! Message model for chat transcripts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::conversation::core::ids::MessageId;

/// Role of a chat message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// User input.
    User,
    /// Assistant response (including placeholders and synthesized errors).
    Assistant,
}

impl Role {
    /// Stable string form for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            _ => Err(value.to_string()),
        }
    }
}

/// A single message in a conversation.
///
/// Immutable once created, except for the placeholder-then-replace step the
/// store performs while reconciling an in-flight send.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier within the chat.
    pub id: MessageId,
    /// Who produced the message.
    pub role: Role,
    /// Textual content.
    pub content: String,
    /// Creation timestamp, the logical ordering key.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Build a message with an explicit id and timestamp.
    ///
    /// Used when the backend confirms an exchange and hands back its own ids.
    #[must_use]
    pub fn new(
        id: MessageId,
        role: Role,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            created_at,
        }
    }

    /// Build a user message with a fresh local id, stamped now.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageId::generate(), Role::User, content, Utc::now())
    }

    /// Build an assistant message with a fresh local id, stamped now.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageId::generate(), Role::Assistant, content, Utc::now())
    }
}
