//! Send Message use case.
//!
//! Sends one user question to a cloud model, streams the answer to a
//! [`StreamObserver`] and appends the finished turn to the conversation.
//!
//! # Flow
//!
//! 1. Validate the input (no I/O on failure)
//! 2. Resolve the model from the registry
//! 3. Resolve or create the conversation, loading history for existing ones
//! 4. Assemble the prompt and open the completion stream
//! 5. Drain the stream, emitting fragments and one completion event
//! 6. Persist the question and answer as one turn
//!
//! Cancellation is honoured while opening and while draining the stream. A
//! cancelled or failed stream never persists anything.

mod lookup;
mod persist;
mod stream;
mod types;

pub use lookup::ModelUnavailable;
pub use types::{SendMessageError, SendMessageInput, SendMessageOutput};

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::storage::{CloudModelRepository, ConversationRepository, MessageRepository};
use crate::ports::stream_observer::StreamObserver;
use grove_domain::core::string::preview;
use grove_domain::{CompletionRequest, HistoryWindow, ModelId, assemble_prompt};
use lookup::{load_history, resolve_conversation, resolve_model};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Use case for sending a message and streaming the reply.
///
/// Every collaborator is request-agnostic; all per-request state lives on the
/// stack of [`execute`](Self::execute), so one instance can serve concurrent
/// requests.
pub struct SendMessageUseCase {
    models: Arc<dyn CloudModelRepository>,
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
    gateway: Arc<dyn LlmGateway>,
    cancellation_token: Option<CancellationToken>,
}

impl Clone for SendMessageUseCase {
    fn clone(&self) -> Self {
        Self {
            models: self.models.clone(),
            conversations: self.conversations.clone(),
            messages: self.messages.clone(),
            gateway: self.gateway.clone(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

impl SendMessageUseCase {
    pub fn new(
        models: Arc<dyn CloudModelRepository>,
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
        gateway: Arc<dyn LlmGateway>,
    ) -> Self {
        Self {
            models,
            conversations,
            messages,
            gateway,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token for aborting the in-flight stream.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    fn check_cancelled(&self) -> Result<(), SendMessageError> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Err(SendMessageError::Cancelled);
        }
        Ok(())
    }

    /// Execute one request.
    pub async fn execute(
        &self,
        input: SendMessageInput,
        observer: &dyn StreamObserver,
    ) -> Result<SendMessageOutput, SendMessageError> {
        input.validate()?;
        info!(
            model_id = input.model_id,
            conversation_id = input.conversation_id,
            "Sending message: {}",
            preview(&input.question, 80)
        );

        let model = resolve_model(self.models.as_ref(), ModelId::new(input.model_id)).await?;
        let conversation =
            resolve_conversation(self.conversations.as_ref(), input.conversation_id).await?;
        let conversation_id = conversation.id();
        let history = load_history(
            self.messages.as_ref(),
            &conversation,
            HistoryWindow::new(input.history_length),
        )
        .await?;
        debug!(
            conversation_id = conversation_id.get(),
            history = history.len(),
            "Resolved conversation"
        );

        let request = CompletionRequest::new(
            input.model_name.as_str(),
            assemble_prompt(&history, &input.question),
            input.temperature,
        )
        .with_max_completion_tokens(input.max_completion_tokens);

        self.check_cancelled()?;
        let open = self.gateway.open_stream(&model, &request);
        let opened = if let Some(token) = &self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Err(SendMessageError::Cancelled),
                result = open => result,
            }
        } else {
            open.await
        };
        let chunks = opened.map_err(SendMessageError::StreamOpenFailed)?;

        let accumulator = stream::drain(chunks, observer, &self.cancellation_token).await?;
        let total_tokens = accumulator.usage().total_tokens;

        persist::persist_turn(
            self.messages.as_ref(),
            conversation_id,
            &input.question,
            accumulator.content(),
        )
        .await?;

        info!(
            conversation_id = conversation_id.get(),
            total_tokens, "Message completed"
        );
        Ok(SendMessageOutput {
            conversation_id,
            total_tokens,
        })
    }
}
