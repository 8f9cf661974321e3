//! Message persister.

use super::types::SendMessageError;
use crate::ports::storage::MessageRepository;
use grove_domain::ConversationId;
use tracing::{debug, error};

/// Store the question and answer as one turn.
///
/// The repository writes both rows atomically, so a failure leaves the
/// conversation unchanged.
pub(super) async fn persist_turn(
    repo: &dyn MessageRepository,
    conversation_id: ConversationId,
    question: &str,
    answer: &str,
) -> Result<(), SendMessageError> {
    let (user, assistant) = repo
        .append_turn(conversation_id, question, answer)
        .await
        .map_err(|e| {
            error!(conversation_id = conversation_id.get(), error = %e, "Failed to persist turn");
            SendMessageError::PersistenceFailed(e)
        })?;
    debug!(
        conversation_id = conversation_id.get(),
        user_message_id = user.id.get(),
        assistant_message_id = assistant.id.get(),
        "Persisted turn"
    );
    Ok(())
}
