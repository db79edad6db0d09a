//! Reconciliation of the local chat list against the server listing.

use crate::conversation::core::chat::Chat;
use crate::gateway::types::ConversationSummary;

/// Merge the server-reported conversation listing into the local chat list.
///
/// Server order wins. A server conversation already known locally keeps its
/// local message history (the server only stores metadata here) while the
/// server refreshes title and creation time; an unknown one becomes a new
/// empty chat. Local-only chats are preserved and appended after the
/// server-ordered set, in their existing relative order.
pub(crate) fn merge_chats(local: Vec<Chat>, remote: &[ConversationSummary]) -> Vec<Chat> {
    let mut local = local;
    let mut merged = Vec::with_capacity(remote.len() + local.len());

    for summary in remote {
        if let Some(pos) = local.iter().position(|chat| chat.id == summary.id) {
            let mut chat = local.remove(pos);
            chat.title = summary.title.clone();
            chat.created_at = summary.created_at;
            merged.push(chat);
        } else {
            merged.push(Chat::new(
                summary.id.clone(),
                summary.title.clone(),
                summary.created_at,
            ));
        }
    }

    merged.append(&mut local);
    merged
}
