//! Prompt domain
//!
//! Turns stored conversation history plus a new question into the ordered,
//! role-tagged message list sent to the provider.

use crate::conversation::entities::{Message, Role};
use serde::{Deserialize, Serialize};

/// Role of a message sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::Assistant,
            content: content.into(),
        }
    }

    /// Map a stored message. Roles other than user and assistant have no
    /// prompt counterpart.
    pub fn from_history(message: &Message) -> Option<Self> {
        match message.role {
            Role::User => Some(Self::user(message.content.as_str())),
            Role::Assistant => Some(Self::assistant(message.content.as_str())),
            Role::Other(_) => None,
        }
    }
}

/// Build the provider message list.
///
/// `history` must already be in chronological order. The question is always
/// the final entry.
pub fn assemble_prompt(history: &[Message], question: &str) -> Vec<PromptMessage> {
    history
        .iter()
        .filter_map(PromptMessage::from_history)
        .chain(std::iter::once(PromptMessage::user(question)))
        .collect()
}
