//! Chat records and title derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conversation::core::ids::ChatId;
use crate::conversation::core::message::Message;

/// Titles longer than this are truncated.
const TITLE_MAX_CHARS: usize = 60;
/// Leading characters kept when truncating.
const TITLE_KEPT_CHARS: usize = 57;
/// Marker appended to truncated titles.
const TITLE_ELLIPSIS: char = '…';
/// Title used when the source content is empty.
const FALLBACK_TITLE: &str = "New chat";

/// A persisted conversation.
///
/// Message order is insertion order, which the store keeps chronological.
/// Drafts are not `Chat`s: a chat only exists once the backend has issued
/// its id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    /// Backend-issued identifier.
    pub id: ChatId,
    /// Display title, derived from the first message.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Ordered message history.
    pub messages: Vec<Message>,
}

impl Chat {
    /// Build an empty chat from server-side metadata.
    #[must_use]
    pub fn new(id: ChatId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::with_messages(id, title, created_at, Vec::new())
    }

    /// Build a chat with an initial message history.
    #[must_use]
    pub fn with_messages(
        id: ChatId,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
        messages: Vec<Message>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            created_at,
            messages,
        }
    }
}

/// Derive a chat title from the first prompt.
///
/// Content over [`TITLE_MAX_CHARS`] characters keeps the first
/// [`TITLE_KEPT_CHARS`] characters plus an ellipsis marker; shorter content
/// is used verbatim. Counting is in `char`s, never bytes, so multi-byte
/// prompts cannot be split mid-character.
#[must_use]
pub fn derive_title(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return FALLBACK_TITLE.to_string();
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        let mut title: String = trimmed.chars().take(TITLE_KEPT_CHARS).collect();
        title.push(TITLE_ELLIPSIS);
        title
    } else {
        trimmed.to_string()
    }
}
