//! HTTP implementation of the remote gateway.

use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::conversation::core::ids::ChatId;
use crate::gateway::config::GatewayConfig;
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::types::{
    ApiErrorBody, AuthSession, ChatExchange, ContinueChatRequest, ConversationListResponse,
    ConversationSummary, CreateChatRequest, LoginRequest, Profile, ProfileMeResponse,
    SignupRequest,
};
use crate::gateway::{GatewayFuture, RemoteGateway};

/// HTTP gateway to the chat backend.
///
/// Holds the ambient credential: once [`login`](Self::login) or
/// [`signup`](Self::signup) succeeds (or a token is injected with
/// [`set_token`](Self::set_token)), every call carries it as a bearer header.
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
    token: RwLock<Option<String>>,
}

impl HttpGateway {
    /// Build a gateway from config.
    ///
    /// # Errors
    /// Returns an error if the config is invalid or the HTTP client cannot
    /// be constructed.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            token: RwLock::new(None),
        })
    }

    /// Inject an existing bearer token (e.g. one restored from app storage).
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    /// Drop the held credential.
    ///
    /// Callers owning a [`crate::conversation::ConversationStore`] should
    /// also `reset()` it so the next account cannot read this one's history.
    pub fn logout(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    /// Authenticate and adopt the issued token.
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects the
    /// credentials.
    pub async fn login(&self, email: &str, password: &str) -> GatewayResult<AuthSession> {
        let session: AuthSession = self
            .post_json("/auth/login", &LoginRequest { email, password })
            .await?;
        self.adopt_session(&session);
        Ok(session)
    }

    /// Register an account and adopt the issued token.
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects the
    /// registration.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> GatewayResult<AuthSession> {
        let session: AuthSession = self
            .post_json(
                "/auth/signup",
                &SignupRequest {
                    email,
                    password,
                    display_name,
                },
            )
            .await?;
        self.adopt_session(&session);
        Ok(session)
    }

    fn adopt_session(&self, session: &AuthSession) {
        if let Some(token) = session.session.as_ref().map(|s| s.access_token.as_str()) {
            self.set_token(token);
        }
    }

    fn bearer(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| (*guard).clone())
    }

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        Ok(Url::parse(&self.config.base_url)?.join(path)?)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> GatewayResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut request = self.client.post(url).json(body);
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn get_json<R>(&self, path: &str) -> GatewayResult<R>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut request = self.client.get(url);
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn decode<R>(response: reqwest::Response) -> GatewayResult<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: extract_api_message(status.as_u16(), &body),
            });
        }
        Ok(response.json::<R>().await?)
    }
}

/// Pull a human-usable message out of an error response body.
fn extract_api_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

impl RemoteGateway for HttpGateway {
    fn create_chat(
        &self,
        prompt: &str,
        title: &str,
    ) -> GatewayFuture<'_, GatewayResult<ChatExchange>> {
        let prompt = prompt.to_string();
        let title = title.to_string();
        Box::pin(async move {
            self.post_json(
                "/chat",
                &CreateChatRequest {
                    prompt: &prompt,
                    title: &title,
                },
            )
            .await
        })
    }

    fn continue_chat(
        &self,
        id: &ChatId,
        prompt: &str,
    ) -> GatewayFuture<'_, GatewayResult<ChatExchange>> {
        let conversation_id = id.as_str().to_string();
        let prompt = prompt.to_string();
        Box::pin(async move {
            self.post_json(
                "/chat",
                &ContinueChatRequest {
                    conversation_id: &conversation_id,
                    prompt: &prompt,
                },
            )
            .await
        })
    }

    fn list_conversations(&self) -> GatewayFuture<'_, GatewayResult<Vec<ConversationSummary>>> {
        Box::pin(async move {
            let listing: ConversationListResponse = self.get_json("/conversation").await?;
            Ok(listing.conversations)
        })
    }

    fn fetch_profile(&self) -> GatewayFuture<'_, GatewayResult<Profile>> {
        Box::pin(async move {
            let envelope: ProfileMeResponse = self.get_json("/profile/me").await?;
            Ok(envelope.profile)
        })
    }

    fn has_credential(&self) -> bool {
        self.bearer().is_some()
    }
}
