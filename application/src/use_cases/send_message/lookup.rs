//! Model registry lookup and conversation resolution.

use super::types::SendMessageError;
use crate::ports::storage::{
    CloudModelRepository, ConversationRepository, MessageRepository, StorageError,
};
use grove_domain::{CloudLlmModel, Conversation, ConversationId, HistoryWindow, Message, ModelId};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a model id could not be used for a request.
#[derive(Error, Debug)]
pub enum ModelUnavailable {
    #[error("model {0} does not exist")]
    Missing(i64),

    #[error("model {0} is disabled")]
    Disabled(i64),

    #[error(transparent)]
    Storage(StorageError),
}

/// Resolve a model id to an enabled registry record.
///
/// A record that comes back with the zero identity counts as missing.
pub(super) async fn resolve_model(
    repo: &dyn CloudModelRepository,
    id: ModelId,
) -> Result<CloudLlmModel, ModelUnavailable> {
    let model = match repo.find_model(id).await {
        Ok(model) => model,
        Err(e) if e.is_not_found() => return Err(ModelUnavailable::Missing(id.get())),
        Err(e) => return Err(ModelUnavailable::Storage(e)),
    };
    if model.id.is_unset() {
        return Err(ModelUnavailable::Missing(id.get()));
    }
    if !model.enabled {
        warn!(model_id = id.get(), "Rejected request for disabled model");
        return Err(ModelUnavailable::Disabled(id.get()));
    }
    Ok(model)
}

/// Outcome of conversation resolution.
#[derive(Debug)]
pub(super) enum ResolvedConversation {
    /// Continuing a stored conversation; history may apply.
    Existing(Conversation),
    /// Freshly created; history is empty by construction.
    Created(Conversation),
}

impl ResolvedConversation {
    pub(super) fn id(&self) -> ConversationId {
        match self {
            ResolvedConversation::Existing(c) | ResolvedConversation::Created(c) => c.id,
        }
    }
}

/// Load the conversation named by `requested`, or create one when it is 0.
pub(super) async fn resolve_conversation(
    repo: &dyn ConversationRepository,
    requested: i64,
) -> Result<ResolvedConversation, SendMessageError> {
    if requested > 0 {
        let conversation = repo
            .find_conversation(ConversationId::new(requested))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    SendMessageError::NotFound {
                        entity: "conversation",
                        id: requested,
                    }
                } else {
                    SendMessageError::ConversationResolutionFailed(e)
                }
            })?;
        if conversation.id.is_unset() {
            return Err(SendMessageError::NotFound {
                entity: "conversation",
                id: requested,
            });
        }
        return Ok(ResolvedConversation::Existing(conversation));
    }

    let conversation = repo
        .create_conversation()
        .await
        .map_err(SendMessageError::ConversationResolutionFailed)?;
    debug!(conversation_id = conversation.id.get(), "Created conversation");
    Ok(ResolvedConversation::Created(conversation))
}

/// Fetch the history window for an existing conversation, oldest first.
pub(super) async fn load_history(
    repo: &dyn MessageRepository,
    conversation: &ResolvedConversation,
    window: HistoryWindow,
) -> Result<Vec<Message>, SendMessageError> {
    let ResolvedConversation::Existing(existing) = conversation else {
        return Ok(Vec::new());
    };
    if window.is_empty() {
        return Ok(Vec::new());
    }
    let newest_first = repo
        .recent_messages(existing.id, window.message_limit())
        .await
        .map_err(SendMessageError::ConversationResolutionFailed)?;
    Ok(window.select(newest_first))
}
