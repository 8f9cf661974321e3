//! Type definitions for the SendMessage use case.

use super::lookup::ModelUnavailable;
use crate::ports::llm_gateway::GatewayError;
use crate::ports::storage::StorageError;
use grove_domain::ConversationId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while sending a message
///
/// Each variant maps to one stage of the pipeline. Partially streamed text is
/// never persisted for `StreamReadFailed` or `Cancelled`.
#[derive(Error, Debug)]
pub enum SendMessageError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Model resolution failed: {0}")]
    ModelResolutionFailed(#[from] ModelUnavailable),

    #[error("Conversation resolution failed: {0}")]
    ConversationResolutionFailed(#[source] StorageError),

    #[error("Failed to open completion stream: {0}")]
    StreamOpenFailed(#[source] GatewayError),

    #[error("Completion stream failed: {0}")]
    StreamReadFailed(#[source] GatewayError),

    #[error("Failed to persist messages: {0}")]
    PersistenceFailed(#[source] StorageError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl SendMessageError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SendMessageError::Cancelled)
    }

    /// True when the request was rejected before any I/O.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SendMessageError::InvalidArgument(_))
    }

    fn invalid(message: &str) -> Self {
        SendMessageError::InvalidArgument(message.to_string())
    }
}

/// Input for the [`SendMessageUseCase`](super::SendMessageUseCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageInput {
    /// Registered cloud model whose endpoint and key are used.
    pub model_id: i64,
    /// Existing conversation to continue; `0` starts a new one.
    pub conversation_id: i64,
    pub question: String,
    /// Provider-side model name sent in the request.
    pub model_name: String,
    pub temperature: f64,
    /// `0` omits the cap.
    pub max_completion_tokens: u32,
    /// Prior turns to replay; `0` sends only the question.
    pub history_length: u32,
}

impl SendMessageInput {
    pub fn new(
        model_id: i64,
        question: impl Into<String>,
        model_name: impl Into<String>,
        temperature: f64,
    ) -> Self {
        Self {
            model_id,
            conversation_id: 0,
            question: question.into(),
            model_name: model_name.into(),
            temperature,
            max_completion_tokens: 0,
            history_length: 0,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_conversation(mut self, conversation_id: i64) -> Self {
        self.conversation_id = conversation_id;
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

    /// Reject malformed requests. Performs no I/O.
    pub fn validate(&self) -> Result<(), SendMessageError> {
        if self.model_id <= 0 {
            return Err(SendMessageError::invalid("model id must be positive"));
        }
        if self.question.is_empty() {
            return Err(SendMessageError::invalid("question must not be empty"));
        }
        if self.model_name.is_empty() {
            return Err(SendMessageError::invalid("model name must not be empty"));
        }
        if self.temperature.is_nan() || self.temperature <= 0.0 {
            return Err(SendMessageError::invalid("temperature must be positive"));
        }
        if self.conversation_id < 0 {
            return Err(SendMessageError::invalid(
                "conversation id must not be negative",
            ));
        }
        Ok(())
    }
}

/// Result of a successful request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SendMessageOutput {
    /// Conversation the turn was appended to (newly created when the input
    /// carried no id).
    pub conversation_id: ConversationId,
    /// Total token usage reported by the provider.
    pub total_tokens: i64,
}
