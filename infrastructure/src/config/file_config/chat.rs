//! Chat request defaults from TOML (`[chat]` section)

use grove_application::ChatDefaults;
use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Registered model id used when `--model` is omitted
    pub model_id: Option<i64>,
    /// Provider-side model name, e.g. `gpt-4o-mini`
    pub model_name: Option<String>,
    pub temperature: f64,
    /// Prior turns replayed with each question
    pub history_length: u32,
    /// `0` leaves completions uncapped
    pub max_completion_tokens: u32,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        let defaults = ChatDefaults::default();
        Self {
            model_id: defaults.model_id,
            model_name: defaults.model_name,
            temperature: defaults.temperature,
            history_length: defaults.history_length,
            max_completion_tokens: defaults.max_completion_tokens,
        }
    }
}

impl FileChatConfig {
    pub fn to_chat_defaults(&self) -> ChatDefaults {
        ChatDefaults {
            model_id: self.model_id,
            model_name: self
                .model_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            temperature: self.temperature,
            history_length: self.history_length,
            max_completion_tokens: self.max_completion_tokens,
        }
    }
}
