//! Remote gateway to the chat backend.
//!
//! The conversation store consumes the narrow [`RemoteGateway`] trait; the
//! HTTP implementation and the auth calls that mint its credential live in
//! [`http`]. The backend is stateless request/response — persistence and
//! model inference are entirely its concern.

pub mod config;
pub mod error;
pub mod http;
pub mod types;

use std::future::Future;
use std::pin::Pin;

use crate::conversation::core::ids::ChatId;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use http::HttpGateway;
pub use types::{
    AccountInfo, AuthSession, ChatExchange, ContinueChatRequest, ConversationSummary,
    CreateChatRequest, LoginRequest, Profile, SessionToken, SignupRequest,
};

/// Boxed future type for gateway operations.
pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The request/response surface the conversation store consumes.
pub trait RemoteGateway: Send + Sync {
    /// Create a conversation from its first prompt.
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    fn create_chat(
        &self,
        prompt: &str,
        title: &str,
    ) -> GatewayFuture<'_, GatewayResult<ChatExchange>>;

    /// Continue an existing conversation.
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    fn continue_chat(
        &self,
        id: &ChatId,
        prompt: &str,
    ) -> GatewayFuture<'_, GatewayResult<ChatExchange>>;

    /// List the authenticated user's conversations, server-ordered.
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    fn list_conversations(&self) -> GatewayFuture<'_, GatewayResult<Vec<ConversationSummary>>>;

    /// Fetch the authenticated user's profile.
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    fn fetch_profile(&self) -> GatewayFuture<'_, GatewayResult<Profile>>;

    /// Whether an ambient credential is currently held.
    fn has_credential(&self) -> bool;
}
