//! Identifier types for the conversation subsystem.
//!
//! This module is intentionally **type-heavy** and **logic-light**. Both
//! identifiers are opaque strings on the wire: the backend issues
//! conversation ids in whatever shape it likes, and locally-minted message
//! ids must only be unique within a chat.
//!
//! ## Cargo features used by this module
//! - `uuid_v7`: generates `UUIDv7` message ids for insert locality instead
//!   of the default `UUIDv4`.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh UUID for locally-minted identifiers.
///
/// With feature `uuid_v7` enabled, this uses `Uuid::now_v7()`.
/// Otherwise it falls back to `Uuid::new_v4()`.
#[inline]
#[must_use]
fn uuid_fresh() -> Uuid {
    #[cfg(feature = "uuid_v7")]
    {
        Uuid::now_v7()
    }
    #[cfg(not(feature = "uuid_v7"))]
    {
        Uuid::new_v4()
    }
}

/// Declare an opaque string-id newtype with a consistent API.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[repr(transparent)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string.
            #[inline]
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow as `&str`.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume into `String`.
            #[inline]
            #[must_use]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }
    };
}

define_string_id!(
    /// Identifier of a persisted conversation.
    ///
    /// Issued by the backend when the first exchange of a draft succeeds.
    /// A draft has no `ChatId` at all, which is why the active chat id is
    /// always carried as an `Option`.
    ChatId
);

define_string_id!(
    /// Identifier of a single message within a chat.
    ///
    /// Confirmed messages carry the backend-issued id; optimistic messages
    /// and placeholders carry a locally generated one (see [`MessageId::generate`]).
    MessageId
);

impl MessageId {
    /// Mint a fresh local identifier for an optimistic message.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid_fresh().to_string())
    }
}
