//! Conversation domain.
//!
//! - [`entities::Conversation`]: a persisted chat thread
//! - [`entities::Message`]: a single append-only message within a thread
//! - [`history::HistoryWindow`]: bounded selection of prior turns

pub mod entities;
pub mod history;
