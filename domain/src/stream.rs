//! Events delivered to the stream observer while a completion is drained.

use serde::{Deserialize, Serialize};

/// One observer notification.
///
/// Fragments carry `done = false` and a 0-based `index` that increments per
/// fragment. The single completion event carries empty content, `done = true`
/// and the number of fragments emitted before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEvent {
    pub content: String,
    pub done: bool,
    pub index: u64,
}

impl StreamEvent {
    pub fn fragment(content: impl Into<String>, index: u64) -> Self {
        Self {
            content: content.into(),
            done: false,
            index,
        }
    }

    pub fn completed(index: u64) -> Self {
        Self {
            content: String::new(),
            done: true,
            index,
        }
    }
}
