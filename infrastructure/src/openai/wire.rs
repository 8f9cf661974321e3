//! OpenAI chat completion wire types.

use grove_domain::{ChatChunk, CompletionRequest, PromptMessage};
use serde::{Deserialize, Serialize};

/// Body of `POST /chat/completions` with streaming enabled.
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_options: Option<StreamOptions>,
}

#[derive(Debug, Serialize)]
struct StreamOptions {
    include_usage: bool,
}

impl<'a> From<&'a CompletionRequest> for ChatCompletionBody<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_completion_tokens: request.max_completion_tokens,
            stream: true,
            stream_options: request.include_usage.then_some(StreamOptions {
                include_usage: true,
            }),
        }
    }
}

/// Error object returned by OpenAI-compatible servers.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) message: String,
    #[serde(default, rename = "type")]
    pub(crate) kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StreamPayload {
    Error { error: ErrorBody },
    Chunk(ChatChunk),
}

impl ErrorBody {
    pub(crate) fn describe(&self) -> String {
        match &self.kind {
            Some(kind) => format!("{kind}: {}", self.message),
            None => self.message.clone(),
        }
    }
}
