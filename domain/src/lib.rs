//! Domain layer for grove
//!
//! This crate contains the core entities, value objects, and the pure pieces
//! of the chat request pipeline. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! A [`Conversation`] owns an append-only list of [`Message`]s. Every request
//! adds exactly one `user` message followed by one `assistant` message.
//!
//! ## History Window
//!
//! [`HistoryWindow`] bounds how many prior turns are replayed to the provider.
//! A turn is a user message plus its assistant reply, so a window of `n`
//! turns fetches at most `2n` messages.
//!
//! ## Streaming Completion
//!
//! Provider output arrives as [`ChatChunk`]s. [`CompletionAccumulator`] folds
//! them into the final text and token usage, and reports when the content of
//! the first choice has just finished.

pub mod cloud_model;
pub mod completion;
pub mod conversation;
pub mod core;
pub mod prompt;
pub mod setting;
pub mod stream;

// Re-export commonly used types
pub use cloud_model::{CloudLlmModel, NewCloudLlmModel};
pub use completion::{
    accumulator::{ChoiceState, CompletionAccumulator},
    chunk::{ChatChunk, ChunkChoice, ChunkDelta, TokenUsage, ToolCallDelta},
    request::CompletionRequest,
};
pub use conversation::{
    entities::{Conversation, Message, Role},
    history::HistoryWindow,
};
pub use core::{
    error::DomainError,
    id::{ConversationId, MessageId, ModelId},
};
pub use prompt::{PromptMessage, PromptRole, assemble_prompt};
pub use setting::Setting;
pub use stream::StreamEvent;
