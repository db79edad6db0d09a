//! Conversation store orchestration.
//!
//! The store owns the chat list, the active chat/draft selection, and the
//! optimistic-update-then-reconcile cycle of `send_message`. All state lives
//! behind one async lock; every mutation is a discrete critical section and
//! no lock is held across a gateway await, so the presentation layer can
//! observe the optimistic state while the round-trip is in flight.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::conversation::cache::{ChatCache, SqliteChatCache};
use crate::conversation::core::chat::{Chat, derive_title};
use crate::conversation::core::config::StoreConfig;
use crate::conversation::core::errors::ConversationResult;
use crate::conversation::core::ids::ChatId;
use crate::conversation::core::message::{Message, Role};
use crate::conversation::store::hydrate::merge_chats;
use crate::conversation::store::send::{SendOutcome, SendPhase};
use crate::gateway::RemoteGateway;
use crate::gateway::types::ChatExchange;

/// Backend dependencies for the conversation store.
pub struct StoreBackends {
    /// Gateway implementation.
    pub gateway: Arc<dyn RemoteGateway>,
    /// Cache implementation.
    pub cache: Arc<dyn ChatCache>,
}

impl StoreBackends {
    /// Build the default `SQLite`-backed bundle around a gateway.
    ///
    /// # Errors
    /// Returns an error if the cache cannot be initialized.
    pub async fn sqlite(
        config: &StoreConfig,
        gateway: Arc<dyn RemoteGateway>,
    ) -> ConversationResult<Self> {
        let cache = Arc::new(SqliteChatCache::open(config).await?);
        Ok(Self { gateway, cache })
    }
}

/// Mutable store state, guarded by the store's single lock.
#[derive(Debug, Default)]
struct StoreState {
    chats: Vec<Chat>,
    active_chat_id: Option<ChatId>,
    draft: bool,
    draft_messages: Vec<Message>,
    send: SendPhase,
    hydrating: bool,
}

impl StoreState {
    fn new() -> Self {
        Self {
            draft: true,
            ..Self::default()
        }
    }

    fn chat_mut(&mut self, id: &ChatId) -> Option<&mut Chat> {
        self.chats.iter_mut().find(|chat| chat.id == *id)
    }

    fn active_messages(&self) -> Vec<Message> {
        match &self.active_chat_id {
            Some(id) => self
                .chats
                .iter()
                .find(|chat| chat.id == *id)
                .map(|chat| chat.messages.clone())
                .unwrap_or_default(),
            None => self.draft_messages.clone(),
        }
    }
}

/// Point-in-time view of the store for the presentation layer.
#[derive(Clone, Debug)]
pub struct StoreSnapshot {
    /// Chat list, most recently created or touched first.
    pub chats: Vec<Chat>,
    /// Active chat id; `None` means the draft is active.
    pub active_chat_id: Option<ChatId>,
    /// Whether draft mode is active.
    pub draft: bool,
    /// Message sequence of whatever is active.
    pub active_messages: Vec<Message>,
    /// Whether a send is in flight.
    pub is_sending: bool,
    /// Whether the initial conversation-list fetch is in flight.
    pub is_loading: bool,
}

/// The conversation store.
///
/// One instance per application session, owned by the presentation layer.
/// No operation returns an error to the caller: gateway failures become
/// synthesized assistant messages, cache failures are logged and swallowed.
pub struct ConversationStore {
    config: StoreConfig,
    gateway: Arc<dyn RemoteGateway>,
    cache: Arc<dyn ChatCache>,
    state: RwLock<StoreState>,
}

impl ConversationStore {
    /// Create a store over the given backends. Starts in draft mode with an
    /// empty chat list; call [`load_cached`](Self::load_cached) to restore
    /// prior history and [`hydrate`](Self::hydrate) to merge the server
    /// listing.
    #[must_use]
    pub fn new(config: StoreConfig, backends: StoreBackends) -> Self {
        Self {
            config,
            gateway: backends.gateway,
            cache: backends.cache,
            state: RwLock::new(StoreState::new()),
        }
    }

    /// Restore the chat list from the durable cache.
    ///
    /// A missing or unreadable cache yields an empty list, never an error.
    pub async fn load_cached(&self) {
        match self.cache.load().await {
            Ok(chats) => {
                let mut state = self.state.write().await;
                state.chats = chats;
            }
            Err(err) => debug!("chat cache read failed, starting empty: {err}"),
        }
    }

    /// Fetch the server conversation listing and merge it into the local
    /// list. Skipped entirely when the gateway holds no credential; a fetch
    /// failure leaves local state untouched.
    pub async fn hydrate(&self) {
        if !self.gateway.has_credential() {
            debug!("no credential, skipping hydration");
            return;
        }

        {
            let mut state = self.state.write().await;
            state.hydrating = true;
        }

        let result = self.gateway.list_conversations().await;

        let merged = {
            let mut state = self.state.write().await;
            state.hydrating = false;
            match result {
                Ok(remote) => {
                    let local = std::mem::take(&mut state.chats);
                    state.chats = merge_chats(local, &remote);
                    Some(state.chats.clone())
                }
                Err(err) => {
                    warn!("conversation list fetch failed: {err}");
                    None
                }
            }
        };

        if let Some(chats) = merged {
            self.persist(&chats).await;
        }
    }

    /// Point-in-time view of the whole store.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        StoreSnapshot {
            chats: state.chats.clone(),
            active_chat_id: state.active_chat_id.clone(),
            draft: state.draft,
            active_messages: state.active_messages(),
            is_sending: !state.send.is_idle(),
            is_loading: state.hydrating,
        }
    }

    /// Message sequence of whatever is active.
    pub async fn active_messages(&self) -> Vec<Message> {
        self.state.read().await.active_messages()
    }

    /// Whether a send is in flight.
    pub async fn is_sending(&self) -> bool {
        !self.state.read().await.send.is_idle()
    }

    /// Switch to a fresh draft. Idempotent, no network effect.
    pub async fn start_new_draft(&self) {
        let mut state = self.state.write().await;
        state.active_chat_id = None;
        state.draft = true;
        state.draft_messages.clear();
    }

    /// Activate a known chat. Silently ignores unknown ids.
    pub async fn select_chat(&self, id: &ChatId) {
        let mut state = self.state.write().await;
        if state.chats.iter().any(|chat| chat.id == *id) {
            state.active_chat_id = Some(id.clone());
            state.draft = false;
        } else {
            debug!("select_chat: unknown chat id {id}");
        }
    }

    /// Send a message on the active chat or draft.
    ///
    /// Appends the optimistic user/placeholder pair synchronously, then
    /// round-trips through the gateway and reconciles by the placeholder's
    /// id. Empty input and overlapping calls are complete no-ops.
    pub async fn send_message(&self, content: &str) -> SendOutcome {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return SendOutcome::Ignored;
        }

        let Some(target) = self.begin_send(trimmed).await else {
            return SendOutcome::Ignored;
        };

        match target {
            Some(id) => self.send_continuation(&id, trimmed).await,
            None => self.send_draft(trimmed).await,
        }
    }

    /// Drop all local state and the durable cache.
    ///
    /// For the logout path, so the next account cannot read this one's
    /// history.
    pub async fn reset(&self) {
        {
            let mut state = self.state.write().await;
            *state = StoreState::new();
        }
        if let Err(err) = self.cache.clear().await {
            warn!("chat cache clear failed: {err}");
        }
    }

    /// Optimistic step: append the user/placeholder pair inside one critical
    /// section and arm the send gate. Returns the continuation target
    /// (`Some(id)`) or `None` for the draft branch, wrapped in `None` when
    /// the call must be ignored.
    async fn begin_send(&self, prompt: &str) -> Option<Option<ChatId>> {
        let (target, to_persist) = {
            let mut state = self.state.write().await;
            if !state.send.is_idle() {
                debug!("send already in flight, ignoring");
                return None;
            }

            let user = Message::user(prompt);
            let placeholder = Message::assistant(self.config.placeholder_text.clone());
            let phase = SendPhase::InFlight {
                user: user.id.clone(),
                placeholder: placeholder.id.clone(),
            };

            match state.active_chat_id.clone() {
                Some(id) => {
                    let Some(chat) = state.chat_mut(&id) else {
                        warn!("active chat {id} missing from list, dropping send");
                        return None;
                    };
                    chat.messages.push(user);
                    chat.messages.push(placeholder);
                    state.send = phase;
                    (Some(id), Some(state.chats.clone()))
                }
                None => {
                    state.draft_messages.push(user);
                    state.draft_messages.push(placeholder);
                    state.send = phase;
                    (None, None)
                }
            }
        };

        if let Some(chats) = to_persist {
            self.persist(&chats).await;
        }
        Some(target)
    }

    /// Draft branch: create the conversation, then either promote the draft
    /// to a persisted chat or rewrite the placeholder with the failure.
    async fn send_draft(&self, prompt: &str) -> SendOutcome {
        let title = derive_title(prompt);
        let result = self.gateway.create_chat(prompt, &title).await;

        let (outcome, to_persist) = {
            let mut state = self.state.write().await;
            let outcome = match result {
                Ok(exchange) => {
                    let confirmed = confirmed_messages(&exchange, prompt);
                    let chat = Chat::with_messages(
                        exchange.conversation_id.clone(),
                        title,
                        Utc::now(),
                        confirmed,
                    );
                    state.chats.retain(|existing| existing.id != chat.id);
                    state.active_chat_id = Some(chat.id.clone());
                    state.chats.insert(0, chat);
                    state.draft = false;
                    state.draft_messages.clear();
                    SendOutcome::Delivered
                }
                Err(err) => {
                    warn!("create conversation failed: {err}");
                    let failure = err.user_message();
                    let placeholder = match &state.send {
                        SendPhase::InFlight { placeholder, .. } => Some(placeholder.clone()),
                        SendPhase::Idle => None,
                    };
                    if let Some(placeholder_id) = placeholder {
                        if let Some(message) = state
                            .draft_messages
                            .iter_mut()
                            .find(|message| message.id == placeholder_id)
                        {
                            message.content = failure;
                        }
                    }
                    SendOutcome::Failed
                }
            };
            state.send = SendPhase::Idle;
            let to_persist =
                (outcome == SendOutcome::Delivered).then(|| state.chats.clone());
            (outcome, to_persist)
        };

        if let Some(chats) = to_persist {
            self.persist(&chats).await;
        }
        outcome
    }

    /// Continuation branch: round-trip, then swap the optimistic pair for
    /// the confirmed messages, or the placeholder for a synthesized error.
    async fn send_continuation(&self, id: &ChatId, prompt: &str) -> SendOutcome {
        let result = self.gateway.continue_chat(id, prompt).await;

        let (outcome, chats) = {
            let mut state = self.state.write().await;
            let pending = match &state.send {
                SendPhase::InFlight { user, placeholder } => {
                    Some((user.clone(), placeholder.clone()))
                }
                SendPhase::Idle => None,
            };
            let outcome = match (result, pending) {
                (Ok(exchange), Some((user_id, placeholder_id))) => {
                    let confirmed = confirmed_messages(&exchange, prompt);
                    if let Some(chat) = state.chat_mut(id) {
                        chat.messages
                            .retain(|message| message.id != user_id && message.id != placeholder_id);
                        chat.messages.extend(confirmed);
                    }
                    SendOutcome::Delivered
                }
                (Err(err), Some((_, placeholder_id))) => {
                    warn!("continue conversation failed: {err}");
                    let failure = Message::assistant(err.user_message());
                    if let Some(chat) = state.chat_mut(id) {
                        chat.messages.retain(|message| message.id != placeholder_id);
                        chat.messages.push(failure);
                    }
                    SendOutcome::Failed
                }
                (_, None) => {
                    debug!("no send in flight during reconciliation, dropping result");
                    SendOutcome::Ignored
                }
            };
            state.send = SendPhase::Idle;
            (outcome, state.chats.clone())
        };

        self.persist(&chats).await;
        outcome
    }

    /// Write the chat list to the durable cache, swallowing failures.
    async fn persist(&self, chats: &[Chat]) {
        if let Err(err) = self.cache.save(chats).await {
            warn!("chat cache write failed: {err}");
        }
    }
}

/// Build the confirmed message pair from an exchange response.
///
/// The backend confirms ids but not timestamps; stamping locally keeps the
/// chronological-ordering invariant, with the assistant message strictly
/// after the user message.
fn confirmed_messages(exchange: &ChatExchange, prompt: &str) -> Vec<Message> {
    let now = Utc::now();
    let mut messages = vec![Message::new(
        exchange.user_message_id.clone(),
        Role::User,
        prompt,
        now,
    )];
    if let Some(content) = &exchange.assistant_content {
        let id = exchange
            .assistant_message_id
            .clone()
            .unwrap_or_else(crate::conversation::core::ids::MessageId::generate);
        messages.push(Message::new(
            id,
            Role::Assistant,
            content.clone(),
            now + TimeDelta::milliseconds(1),
        ));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::cache::MemoryChatCache;
    use crate::conversation::core::ids::MessageId;
    use crate::gateway::error::{GatewayError, GatewayResult};
    use crate::gateway::types::{ConversationSummary, Profile};
    use crate::gateway::GatewayFuture;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::{Mutex, Notify};

    /// Gateway double replaying scripted exchange results.
    struct ScriptedGateway {
        exchanges: Mutex<VecDeque<GatewayResult<ChatExchange>>>,
        listing: Vec<ConversationSummary>,
        fail_listing: bool,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
        credential: bool,
    }

    impl ScriptedGateway {
        fn new() -> Self {
            Self {
                exchanges: Mutex::new(VecDeque::new()),
                listing: Vec::new(),
                fail_listing: false,
                calls: AtomicUsize::new(0),
                gate: None,
                credential: true,
            }
        }

        fn with_exchange(self, result: GatewayResult<ChatExchange>) -> Self {
            if let Ok(mut queue) = self.exchanges.try_lock() {
                queue.push_back(result);
            }
            self
        }

        fn with_listing(mut self, listing: Vec<ConversationSummary>) -> Self {
            self.listing = listing;
            self
        }

        fn with_failing_listing(mut self) -> Self {
            self.fail_listing = true;
            self
        }

        fn with_gate(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn next_exchange(&self) -> GatewayResult<ChatExchange> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.exchanges.lock().await.pop_front().unwrap_or_else(|| {
                Err(GatewayError::Api {
                    status: 500,
                    message: "unscripted call".to_string(),
                })
            })
        }
    }

    impl RemoteGateway for ScriptedGateway {
        fn create_chat(
            &self,
            _prompt: &str,
            _title: &str,
        ) -> GatewayFuture<'_, GatewayResult<ChatExchange>> {
            Box::pin(self.next_exchange())
        }

        fn continue_chat(
            &self,
            _id: &ChatId,
            _prompt: &str,
        ) -> GatewayFuture<'_, GatewayResult<ChatExchange>> {
            Box::pin(self.next_exchange())
        }

        fn list_conversations(&self) -> GatewayFuture<'_, GatewayResult<Vec<ConversationSummary>>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.fail_listing {
                    Err(GatewayError::Api {
                        status: 503,
                        message: "listing unavailable".to_string(),
                    })
                } else {
                    Ok(self.listing.clone())
                }
            })
        }

        fn fetch_profile(&self) -> GatewayFuture<'_, GatewayResult<Profile>> {
            Box::pin(async move {
                Err(GatewayError::Api {
                    status: 404,
                    message: "not scripted".to_string(),
                })
            })
        }

        fn has_credential(&self) -> bool {
            self.credential
        }
    }

    fn exchange(
        conversation: &str,
        user: &str,
        assistant: Option<(&str, &str)>,
    ) -> ChatExchange {
        ChatExchange {
            conversation_id: ChatId::new(conversation),
            user_message_id: MessageId::new(user),
            assistant_message_id: assistant.map(|(id, _)| MessageId::new(id)),
            assistant_content: assistant.map(|(_, content)| content.to_string()),
            model_used: None,
        }
    }

    fn summary(id: &str, title: &str) -> ConversationSummary {
        ConversationSummary {
            id: ChatId::new(id),
            title: title.to_string(),
            is_group: false,
            created_by: "acct-1".to_string(),
            created_at: Utc::now(),
        }
    }

    fn store_over(
        gateway: Arc<ScriptedGateway>,
        cache: Arc<MemoryChatCache>,
    ) -> ConversationStore {
        ConversationStore::new(
            StoreConfig::default(),
            StoreBackends { gateway, cache },
        )
    }

    fn store_with(gateway: Arc<ScriptedGateway>) -> ConversationStore {
        let cache = Arc::new(MemoryChatCache::new(&StoreConfig::default()));
        store_over(gateway, cache)
    }

    async fn seeded_chat(cache: &Arc<MemoryChatCache>, id: &str, messages: Vec<Message>) {
        let chat = Chat::with_messages(ChatId::new(id), "Seeded", Utc::now(), messages);
        let saved = cache.save(&[chat]).await;
        assert!(saved.is_ok());
    }

    #[tokio::test]
    async fn test_empty_input_is_a_complete_noop() {
        let gateway = Arc::new(ScriptedGateway::new());
        let store = store_with(gateway.clone());

        assert_eq!(store.send_message("   ").await, SendOutcome::Ignored);
        assert_eq!(gateway.call_count(), 0);
        assert!(store.active_messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_draft_send_promotes_to_persisted_chat() {
        let gateway = Arc::new(ScriptedGateway::new().with_exchange(Ok(exchange(
            "c-1",
            "u-1",
            Some(("a-1", "Hello back")),
        ))));
        let store = store_with(gateway);

        let outcome = store.send_message("  hello there  ").await;
        assert_eq!(outcome, SendOutcome::Delivered);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.chats.len(), 1);
        assert_eq!(snapshot.chats[0].id, ChatId::new("c-1"));
        assert_eq!(snapshot.active_chat_id, Some(ChatId::new("c-1")));
        assert!(!snapshot.draft);
        assert!(!snapshot.is_sending);

        let messages = &snapshot.chats[0].messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, MessageId::new("u-1"));
        assert_eq!(messages[0].content, "hello there");
        assert_eq!(messages[1].id, MessageId::new("a-1"));
        assert_eq!(messages[1].content, "Hello back");
        assert!(messages[0].created_at < messages[1].created_at);
    }

    #[tokio::test]
    async fn test_draft_failure_rewrites_placeholder_in_place() {
        let gateway = Arc::new(ScriptedGateway::new().with_exchange(Err(GatewayError::Api {
            status: 500,
            message: "model exploded".to_string(),
        })));
        let store = store_with(gateway);

        let outcome = store.send_message("hello").await;
        assert_eq!(outcome, SendOutcome::Failed);

        let snapshot = store.snapshot().await;
        assert!(snapshot.draft);
        assert!(snapshot.active_chat_id.is_none());
        assert!(snapshot.chats.is_empty());
        assert_eq!(snapshot.active_messages.len(), 2);
        assert_eq!(snapshot.active_messages[0].role, Role::User);
        assert_eq!(snapshot.active_messages[0].content, "hello");
        assert_eq!(snapshot.active_messages[1].role, Role::Assistant);
        assert_eq!(snapshot.active_messages[1].content, "model exploded");
    }

    #[tokio::test]
    async fn test_continuation_swaps_optimistic_pair_for_confirmed() {
        let cache = Arc::new(MemoryChatCache::new(&StoreConfig::default()));
        seeded_chat(
            &cache,
            "c-1",
            vec![Message::user("m1"), Message::assistant("m2")],
        )
        .await;
        let gateway = Arc::new(ScriptedGateway::new().with_exchange(Ok(exchange(
            "c-1",
            "u-2",
            Some(("a-2", "Sure.")),
        ))));
        let store = store_over(gateway, cache);
        store.load_cached().await;
        store.select_chat(&ChatId::new("c-1")).await;

        let outcome = store.send_message("follow up").await;
        assert_eq!(outcome, SendOutcome::Delivered);

        let messages = store.active_messages().await;
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].id, MessageId::new("u-2"));
        assert_eq!(messages[2].content, "follow up");
        assert_eq!(messages[3].id, MessageId::new("a-2"));
        assert_eq!(messages[3].content, "Sure.");
        assert!(!messages.iter().any(|m| m.content == "Thinking…"));
    }

    #[tokio::test]
    async fn test_continuation_failure_keeps_user_and_synthesizes_error() {
        let cache = Arc::new(MemoryChatCache::new(&StoreConfig::default()));
        seeded_chat(
            &cache,
            "c-1",
            vec![Message::user("m1"), Message::assistant("m2")],
        )
        .await;
        let gateway = Arc::new(ScriptedGateway::new().with_exchange(Err(GatewayError::Api {
            status: 502,
            message: "backend down".to_string(),
        })));
        let store = store_over(gateway, cache);
        store.load_cached().await;
        store.select_chat(&ChatId::new("c-1")).await;

        let outcome = store.send_message("follow up").await;
        assert_eq!(outcome, SendOutcome::Failed);

        // Original two, the kept user message, one synthesized error.
        let messages = store.active_messages().await;
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(messages[2].content, "follow up");
        assert_eq!(messages[3].role, Role::Assistant);
        assert_eq!(messages[3].content, "backend down");
        assert!(!messages.iter().any(|m| m.content == "Thinking…"));
        assert!(!store.is_sending().await);
    }

    #[tokio::test]
    async fn test_optimistic_pair_visible_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_exchange(Ok(exchange("c-1", "u-1", Some(("a-1", "done")))))
                .with_gate(gate.clone()),
        );
        let store = Arc::new(store_with(gateway));

        let task = tokio::spawn({
            let store = store.clone();
            async move { store.send_message("hello").await }
        });

        let mut snapshot = store.snapshot().await;
        for _ in 0..100 {
            if snapshot.active_messages.len() == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
            snapshot = store.snapshot().await;
        }

        assert_eq!(snapshot.active_messages.len(), 2);
        assert!(snapshot.is_sending);
        assert_eq!(snapshot.active_messages[0].content, "hello");
        assert_eq!(snapshot.active_messages[1].content, "Thinking…");

        gate.notify_one();
        let outcome = task.await.unwrap_or(SendOutcome::Ignored);
        assert_eq!(outcome, SendOutcome::Delivered);
        assert!(!store.is_sending().await);
    }

    #[tokio::test]
    async fn test_second_send_while_busy_is_ignored() {
        let gate = Arc::new(Notify::new());
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_exchange(Ok(exchange("c-1", "u-1", None)))
                .with_gate(gate.clone()),
        );
        let store = Arc::new(store_with(gateway.clone()));

        let task = tokio::spawn({
            let store = store.clone();
            async move { store.send_message("first").await }
        });

        let mut sending = store.is_sending().await;
        for _ in 0..100 {
            if sending {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
            sending = store.is_sending().await;
        }
        assert!(sending);

        let before = store.snapshot().await;
        assert_eq!(store.send_message("second").await, SendOutcome::Ignored);
        let after = store.snapshot().await;
        assert_eq!(after.active_messages, before.active_messages);

        gate.notify_one();
        let outcome = task.await.unwrap_or(SendOutcome::Ignored);
        assert_eq!(outcome, SendOutcome::Delivered);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_hydration_merges_server_listing() {
        let cache = Arc::new(MemoryChatCache::new(&StoreConfig::default()));
        seeded_chat(
            &cache,
            "a",
            vec![Message::user("m1"), Message::assistant("m2")],
        )
        .await;
        let gateway = Arc::new(
            ScriptedGateway::new().with_listing(vec![summary("a", "A"), summary("b", "B")]),
        );
        let store = store_over(gateway, cache);
        store.load_cached().await;

        store.hydrate().await;

        let snapshot = store.snapshot().await;
        assert!(!snapshot.is_loading);
        let ids: Vec<&str> = snapshot.chats.iter().map(|chat| chat.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(snapshot.chats[0].messages.len(), 2);
        assert!(snapshot.chats[1].messages.is_empty());
    }

    #[tokio::test]
    async fn test_hydration_failure_leaves_local_state() {
        let cache = Arc::new(MemoryChatCache::new(&StoreConfig::default()));
        seeded_chat(&cache, "a", vec![Message::user("m1")]).await;
        let gateway = Arc::new(ScriptedGateway::new().with_failing_listing());
        let store = store_over(gateway, cache);
        store.load_cached().await;

        store.hydrate().await;

        let snapshot = store.snapshot().await;
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.chats.len(), 1);
        assert_eq!(snapshot.chats[0].id, ChatId::new("a"));
        assert_eq!(snapshot.chats[0].messages.len(), 1);
    }

    #[tokio::test]
    async fn test_hydration_without_credential_is_skipped() {
        let mut gateway = ScriptedGateway::new().with_listing(vec![summary("a", "A")]);
        gateway.credential = false;
        let gateway = Arc::new(gateway);
        let store = store_with(gateway.clone());

        store.hydrate().await;

        assert_eq!(gateway.call_count(), 0);
        assert!(store.snapshot().await.chats.is_empty());
    }

    #[tokio::test]
    async fn test_chat_list_round_trips_through_cache() {
        let cache = Arc::new(MemoryChatCache::new(&StoreConfig::default()));
        let gateway = Arc::new(ScriptedGateway::new().with_exchange(Ok(exchange(
            "c-1",
            "u-1",
            Some(("a-1", "Hi")),
        ))));
        let store = store_over(gateway, cache.clone());
        assert_eq!(store.send_message("hello").await, SendOutcome::Delivered);
        let saved = store.snapshot().await.chats;

        let reloaded_store = store_over(Arc::new(ScriptedGateway::new()), cache);
        reloaded_store.load_cached().await;
        assert_eq!(reloaded_store.snapshot().await.chats, saved);
    }

    #[tokio::test]
    async fn test_start_new_draft_clears_selection() {
        let gateway = Arc::new(ScriptedGateway::new().with_exchange(Ok(exchange(
            "c-1",
            "u-1",
            None,
        ))));
        let store = store_with(gateway);
        assert_eq!(store.send_message("hello").await, SendOutcome::Delivered);

        store.start_new_draft().await;

        let snapshot = store.snapshot().await;
        assert!(snapshot.draft);
        assert!(snapshot.active_chat_id.is_none());
        assert!(snapshot.active_messages.is_empty());
        // The persisted chat is untouched.
        assert_eq!(snapshot.chats.len(), 1);
    }

    #[tokio::test]
    async fn test_select_unknown_chat_is_a_noop() {
        let store = store_with(Arc::new(ScriptedGateway::new()));
        store.select_chat(&ChatId::new("missing")).await;

        let snapshot = store.snapshot().await;
        assert!(snapshot.draft);
        assert!(snapshot.active_chat_id.is_none());
    }

    #[tokio::test]
    async fn test_reset_clears_state_and_cache() {
        let cache = Arc::new(MemoryChatCache::new(&StoreConfig::default()));
        let gateway = Arc::new(ScriptedGateway::new().with_exchange(Ok(exchange(
            "c-1",
            "u-1",
            None,
        ))));
        let store = store_over(gateway, cache.clone());
        assert_eq!(store.send_message("hello").await, SendOutcome::Delivered);

        store.reset().await;

        let snapshot = store.snapshot().await;
        assert!(snapshot.chats.is_empty());
        assert!(snapshot.draft);
        assert!(cache.load().await.unwrap_or_default().is_empty());
    }
}
