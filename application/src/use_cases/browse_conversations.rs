//! Conversation and message browsing.

use crate::ports::storage::{ConversationRepository, MessageRepository, Page, PageRequest};
use crate::use_cases::shared::{AdminError, non_blank, require_positive};
use grove_domain::{Conversation, ConversationId, Message, MessageId};
use std::sync::Arc;
use tracing::{debug, info};

/// Default page size for conversation listings.
pub const DEFAULT_CONVERSATION_PAGE_SIZE: u64 = 50;

/// Default number of messages returned per request.
pub const DEFAULT_MESSAGE_PAGE_SIZE: usize = 20;

/// Use case for listing conversations and paging through their messages.
#[derive(Clone)]
pub struct BrowseConversationsUseCase {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl BrowseConversationsUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            conversations,
            messages,
        }
    }

    /// Conversations newest first.
    ///
    /// A blank `search` lists everything; otherwise titles are matched by
    /// case-insensitive substring.
    pub async fn list_conversations(
        &self,
        page: i64,
        size: i64,
        search: Option<&str>,
    ) -> Result<Page<Conversation>, AdminError> {
        let window = PageRequest::from_page(page, size, DEFAULT_CONVERSATION_PAGE_SIZE);
        let search = non_blank(search);
        debug!(?window, ?search, "Listing conversations");
        Ok(self
            .conversations
            .list_conversations(window, search)
            .await?)
    }

    /// Messages of one conversation, newest first.
    ///
    /// `before_id > 0` returns only messages older than that id, which lets
    /// callers page backwards from the last id they saw.
    pub async fn list_messages(
        &self,
        conversation_id: i64,
        before_id: i64,
        size: i64,
    ) -> Result<Vec<Message>, AdminError> {
        if conversation_id < 0 {
            return Err(AdminError::invalid("conversation id must not be negative"));
        }
        let limit = if size < 1 {
            DEFAULT_MESSAGE_PAGE_SIZE
        } else {
            size as usize
        };
        let before = (before_id > 0).then(|| MessageId::new(before_id));
        Ok(self
            .messages
            .list_messages(ConversationId::new(conversation_id), before, limit)
            .await?)
    }

    /// Set or clear a conversation's title.
    pub async fn rename_conversation(
        &self,
        id: i64,
        title: Option<&str>,
    ) -> Result<Conversation, AdminError> {
        require_positive("conversation id", id)?;
        let conversation = self
            .conversations
            .rename_conversation(ConversationId::new(id), non_blank(title))
            .await?;
        info!(conversation_id = id, "Renamed conversation");
        Ok(conversation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::storage::StorageError;
    use async_trait::async_trait;
    use chrono::Utc;
    use grove_domain::Role;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorded {
        conversation_page: Option<(PageRequest, Option<String>)>,
        message_query: Option<(ConversationId, Option<MessageId>, usize)>,
        renamed: Option<(ConversationId, Option<String>)>,
    }

    #[derive(Default)]
    struct MockStore {
        recorded: Mutex<Recorded>,
    }

    fn conversation(id: i64, title: Option<&str>) -> Conversation {
        Conversation {
            id: ConversationId::new(id),
            title: title.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[async_trait]
    impl ConversationRepository for MockStore {
        async fn find_conversation(&self, id: ConversationId) -> Result<Conversation, StorageError> {
            Err(StorageError::not_found("conversation", id.get()))
        }

        async fn create_conversation(&self) -> Result<Conversation, StorageError> {
            Ok(conversation(1, None))
        }

        async fn list_conversations(
            &self,
            page: PageRequest,
            search: Option<&str>,
        ) -> Result<Page<Conversation>, StorageError> {
            self.recorded.lock().unwrap().conversation_page =
                Some((page, search.map(str::to_string)));
            Ok(Page::empty())
        }

        async fn rename_conversation(
            &self,
            id: ConversationId,
            title: Option<&str>,
        ) -> Result<Conversation, StorageError> {
            self.recorded.lock().unwrap().renamed = Some((id, title.map(str::to_string)));
            Ok(conversation(id.get(), title))
        }
    }

    #[async_trait]
    impl MessageRepository for MockStore {
        async fn recent_messages(
            &self,
            _: ConversationId,
            _: usize,
        ) -> Result<Vec<Message>, StorageError> {
            Ok(Vec::new())
        }

        async fn list_messages(
            &self,
            conversation_id: ConversationId,
            before: Option<MessageId>,
            limit: usize,
        ) -> Result<Vec<Message>, StorageError> {
            self.recorded.lock().unwrap().message_query = Some((conversation_id, before, limit));
            Ok(vec![Message {
                id: MessageId::new(1),
                conversation_id,
                role: Role::User,
                content: "hi".to_string(),
                created_at: Utc::now(),
            }])
        }

        async fn append_turn(
            &self,
            _: ConversationId,
            _: &str,
            _: &str,
        ) -> Result<(Message, Message), StorageError> {
            Err(StorageError::Backend("read-only".to_string()))
        }
    }

    fn use_case() -> (BrowseConversationsUseCase, Arc<MockStore>) {
        let store = Arc::new(MockStore::default());
        (
            BrowseConversationsUseCase::new(store.clone(), store.clone()),
            store,
        )
    }

    #[tokio::test]
    async fn test_conversation_page_defaults() {
        let (uc, store) = use_case();
        uc.list_conversations(0, 0, Some("   ")).await.unwrap();
        let recorded = store.recorded.lock().unwrap();
        assert_eq!(
            recorded.conversation_page,
            Some((PageRequest { offset: 0, limit: 50 }, None))
        );
    }

    #[tokio::test]
    async fn test_conversation_search_is_trimmed() {
        let (uc, store) = use_case();
        uc.list_conversations(2, 5, Some(" rust ")).await.unwrap();
        let recorded = store.recorded.lock().unwrap();
        assert_eq!(
            recorded.conversation_page,
            Some((PageRequest { offset: 5, limit: 5 }, Some("rust".to_string())))
        );
    }

    #[tokio::test]
    async fn test_message_cursor_and_defaults() {
        let (uc, store) = use_case();
        uc.list_messages(3, 0, 0).await.unwrap();
        assert_eq!(
            store.recorded.lock().unwrap().message_query,
            Some((ConversationId::new(3), None, 20))
        );

        uc.list_messages(3, 41, 5).await.unwrap();
        assert_eq!(
            store.recorded.lock().unwrap().message_query,
            Some((ConversationId::new(3), Some(MessageId::new(41)), 5))
        );
    }

    #[tokio::test]
    async fn test_negative_conversation_rejected() {
        let (uc, store) = use_case();
        assert!(matches!(
            uc.list_messages(-1, 0, 10).await,
            Err(AdminError::InvalidArgument(_))
        ));
        assert!(store.recorded.lock().unwrap().message_query.is_none());
    }

    #[tokio::test]
    async fn test_rename_clears_blank_title() {
        let (uc, store) = use_case();
        let renamed = uc.rename_conversation(7, Some("  ")).await.unwrap();
        assert_eq!(renamed.title, None);
        assert_eq!(
            store.recorded.lock().unwrap().renamed,
            Some((ConversationId::new(7), None))
        );

        assert!(matches!(
            uc.rename_conversation(0, Some("x")).await,
            Err(AdminError::InvalidArgument(_))
        ));
    }
}
