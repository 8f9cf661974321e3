//! Typed identities.
//!
//! Storage assigns integer identities starting at 1. The zero value is the
//! "uninitialized" identity: a lookup that yields it is treated as a miss.

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identity without validation (storage round-trips).
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Wrap a raw identity, rejecting zero and negative values.
            pub fn positive(raw: i64) -> Result<Self, DomainError> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err(DomainError::NonPositiveId {
                        field: $field,
                        value: raw,
                    })
                }
            }

            pub const fn get(self) -> i64 {
                self.0
            }

            /// `true` for the zero/uninitialized identity.
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identity of a [`CloudLlmModel`](crate::CloudLlmModel) record.
    ModelId,
    "model_id"
);

entity_id!(
    /// Identity of a [`Conversation`](crate::Conversation).
    ConversationId,
    "conversation_id"
);

entity_id!(
    /// Identity of a [`Message`](crate::Message). Monotonic per database.
    MessageId,
    "message_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_accepts_one() {
        assert_eq!(ModelId::positive(1).unwrap().get(), 1);
    }

    #[test]
    fn test_positive_rejects_zero_and_negative() {
        assert!(ModelId::positive(0).is_err());
        assert!(ConversationId::positive(-5).is_err());
    }

    #[test]
    fn test_unset() {
        assert!(MessageId::new(0).is_unset());
        assert!(!MessageId::new(7).is_unset());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&ConversationId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
