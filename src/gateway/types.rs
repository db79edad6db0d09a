//! Wire types for the chat backend API.
//!
//! Field names mirror the backend contract exactly: chat and profile
//! payloads are camelCase, the conversation listing is snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conversation::core::ids::{ChatId, MessageId};

/// Request body for creating a conversation from its first prompt.
#[derive(Debug, Serialize)]
pub struct CreateChatRequest<'a> {
    /// The user's prompt.
    pub prompt: &'a str,
    /// Title derived from the prompt.
    pub title: &'a str,
}

/// Request body for continuing an existing conversation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueChatRequest<'a> {
    /// The conversation to continue.
    pub conversation_id: &'a str,
    /// The user's prompt.
    pub prompt: &'a str,
}

/// Response to both chat calls: the confirmed exchange.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
    /// Conversation id (server-issued on create).
    pub conversation_id: ChatId,
    /// Confirmed id of the user message.
    pub user_message_id: MessageId,
    /// Confirmed id of the assistant message, when one was produced.
    #[serde(default)]
    pub assistant_message_id: Option<MessageId>,
    /// Assistant response content, when one was produced.
    #[serde(default)]
    pub assistant_content: Option<String>,
    /// Model that served the exchange, when reported.
    #[serde(default)]
    pub model_used: Option<String>,
}

/// One entry of the server-side conversation listing.
#[derive(Clone, Debug, Deserialize)]
pub struct ConversationSummary {
    /// Conversation id.
    pub id: ChatId,
    /// Display title.
    pub title: String,
    /// Whether this is a group conversation.
    #[serde(default)]
    pub is_group: bool,
    /// Account that created the conversation.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Envelope of the conversation listing.
#[derive(Debug, Deserialize)]
pub(crate) struct ConversationListResponse {
    #[serde(default)]
    pub conversations: Vec<ConversationSummary>,
}

/// The authenticated user's profile.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Account id.
    pub id: String,
    /// Display name.
    pub display_name: String,
    /// Avatar reference, when set.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Envelope of the profile call.
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileMeResponse {
    pub profile: Profile,
}

/// Request body for logging in.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// Account email.
    pub email: &'a str,
    /// Account password.
    pub password: &'a str,
}

/// Request body for signing up.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest<'a> {
    /// Account email.
    pub email: &'a str,
    /// Account password.
    pub password: &'a str,
    /// Optional display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<&'a str>,
}

/// Response to the auth calls.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthSession {
    /// Issued session, when authentication succeeded.
    #[serde(default)]
    pub session: Option<SessionToken>,
    /// The authenticated account.
    #[serde(default)]
    pub user: Option<AccountInfo>,
}

/// Bearer token issued by the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct SessionToken {
    /// The access token to present on subsequent calls.
    pub access_token: String,
}

/// Account details returned by the auth calls.
#[derive(Clone, Debug, Deserialize)]
pub struct AccountInfo {
    /// Account id.
    pub id: String,
    /// Account email.
    pub email: String,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Error body shape some backend failures carry.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_exchange() {
        let json = r#"{
            "conversationId": "c-1",
            "userMessageId": "u-1",
            "assistantMessageId": "a-1",
            "assistantContent": "Hello!",
            "modelUsed": "parlance-mini"
        }"#;
        let parsed = serde_json::from_str::<ChatExchange>(json).ok();
        assert!(parsed.is_some());
        let Some(exchange) = parsed else {
            return;
        };
        assert_eq!(exchange.conversation_id.as_str(), "c-1");
        assert_eq!(exchange.user_message_id.as_str(), "u-1");
        assert_eq!(
            exchange.assistant_message_id.as_ref().map(MessageId::as_str),
            Some("a-1")
        );
        assert_eq!(exchange.assistant_content.as_deref(), Some("Hello!"));
        assert_eq!(exchange.model_used.as_deref(), Some("parlance-mini"));
    }

    #[test]
    fn test_parse_exchange_without_assistant() {
        let json = r#"{"conversationId": "c-1", "userMessageId": "u-1"}"#;
        let parsed = serde_json::from_str::<ChatExchange>(json).ok();
        assert!(parsed.is_some());
        let Some(exchange) = parsed else {
            return;
        };
        assert!(exchange.assistant_message_id.is_none());
        assert!(exchange.assistant_content.is_none());
    }

    #[test]
    fn test_parse_conversation_listing() {
        let json = r#"{
            "conversations": [
                {
                    "id": "c-1",
                    "title": "First",
                    "is_group": false,
                    "created_by": "acct-1",
                    "created_at": "2026-01-02T03:04:05Z"
                }
            ]
        }"#;
        let parsed = serde_json::from_str::<ConversationListResponse>(json).ok();
        assert!(parsed.is_some());
        let Some(listing) = parsed else {
            return;
        };
        assert_eq!(listing.conversations.len(), 1);
        assert_eq!(listing.conversations[0].id.as_str(), "c-1");
        assert!(!listing.conversations[0].is_group);
    }

    #[test]
    fn test_parse_profile_envelope() {
        let json = r#"{
            "profile": {
                "id": "acct-1",
                "displayName": "Ada",
                "avatarUrl": null,
                "createdAt": "2026-01-02T03:04:05Z"
            }
        }"#;
        let parsed = serde_json::from_str::<ProfileMeResponse>(json).ok();
        assert!(parsed.is_some());
        let Some(envelope) = parsed else {
            return;
        };
        assert_eq!(envelope.profile.display_name, "Ada");
        assert!(envelope.profile.avatar_url.is_none());
    }

    #[test]
    fn test_signup_request_omits_absent_display_name() {
        let request = SignupRequest {
            email: "a@b.c",
            password: "pw",
            display_name: None,
        };
        let json = serde_json::to_string(&request).unwrap_or_default();
        assert!(!json.contains("displayName"));
    }
}
