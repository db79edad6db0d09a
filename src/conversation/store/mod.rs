//! The conversation store and its send lifecycle.

pub mod core;
pub mod hydrate;
pub mod send;

pub use self::core::{ConversationStore, StoreBackends, StoreSnapshot};
pub use send::{SendOutcome, SendPhase};
