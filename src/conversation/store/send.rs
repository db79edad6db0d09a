//! Per-send lifecycle state.

use crate::conversation::core::ids::MessageId;

/// Lifecycle of an outbound message exchange.
///
/// This is the single-flight gate: a send may only begin from `Idle`, and
/// reconciliation matches the optimistic pair by the ids recorded here —
/// never by position in the message list, so concurrent tail mutations
/// cannot corrupt unrelated messages.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum SendPhase {
    /// No exchange in flight.
    #[default]
    Idle,
    /// The optimistic pair has been appended; awaiting the gateway
    /// round-trip.
    InFlight {
        /// Id of the optimistic user message.
        user: MessageId,
        /// Id of the assistant placeholder awaiting replacement.
        placeholder: MessageId,
    },
}

impl SendPhase {
    /// True when no exchange is in flight.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Outcome of a `send_message` call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SendOutcome {
    /// The exchange round-tripped; confirmed messages are in place.
    Delivered,
    /// The gateway call failed; a synthesized assistant error message is in
    /// place instead.
    Failed,
    /// The call was a no-op: empty input, or a send already in flight.
    Ignored,
}
