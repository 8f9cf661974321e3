//! Chat defaults: request parameters used when the caller gives none.

use crate::use_cases::send_message::SendMessageInput;
use serde::{Deserialize, Serialize};

/// Per-request parameters filled in from configuration.
///
/// The CLI overrides individual fields with flags before building a
/// [`SendMessageInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatDefaults {
    /// Registered model used when no `--model` is given.
    pub model_id: Option<i64>,
    /// Provider-side model name used when no `--model-name` is given.
    pub model_name: Option<String>,
    pub temperature: f64,
    /// Prior turns replayed with each question.
    pub history_length: u32,
    /// `0` leaves completions uncapped.
    pub max_completion_tokens: u32,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            model_id: None,
            model_name: None,
            temperature: 0.7,
            history_length: 10,
            max_completion_tokens: 0,
        }
    }
}

impl ChatDefaults {
    // ==================== Builder Methods ====================

    pub fn with_model_id(mut self, id: i64) -> Self {
        self.model_id = Some(id);
        self
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_history_length(mut self, turns: u32) -> Self {
        self.history_length = turns;
        self
    }

    pub fn with_max_completion_tokens(mut self, max: u32) -> Self {
        self.max_completion_tokens = max;
        self
    }

    /// Build a request for `question` in `conversation_id` (`0` for new).
    ///
    /// Missing model fields become `0` and `""`, which the use case rejects
    /// as invalid arguments.
    pub fn input_for(&self, question: impl Into<String>, conversation_id: i64) -> SendMessageInput {
        SendMessageInput::new(
            self.model_id.unwrap_or(0),
            question,
            self.model_name.clone().unwrap_or_default(),
            self.temperature,
        )
        .with_conversation(conversation_id)
        .with_history_length(self.history_length)
        .with_max_completion_tokens(self.max_completion_tokens)
    }
}
