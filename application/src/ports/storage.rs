//! Storage ports
//!
//! Repositories for the three record kinds the chat pipeline touches, plus
//! settings. A single adapter usually implements all of them over one
//! database handle, constructed once and injected into each use case.

use async_trait::async_trait;
use grove_domain::{
    CloudLlmModel, Conversation, ConversationId, Message, MessageId, ModelId, NewCloudLlmModel,
    Setting,
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by storage adapters
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StorageError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// One page of results plus the unpaged total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
        }
    }
}

/// Offset/limit window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Convert a 1-based page number and page size into an offset window.
    ///
    /// Out-of-range values fall back to page 1 and `default_size`. The
    /// offset saturates at `i64::MAX`, the largest offset SQL accepts.
    pub fn from_page(page: i64, size: i64, default_size: u64) -> Self {
        let page = if page < 1 { 1 } else { page as u64 };
        let limit = if size < 1 { default_size } else { size as u64 };
        Self {
            offset: (page - 1).saturating_mul(limit).min(i64::MAX as u64),
            limit,
        }
    }
}

#[async_trait]
pub trait CloudModelRepository: Send + Sync {
    /// Fetch one model. Disabled models are returned; callers decide.
    async fn find_model(&self, id: ModelId) -> Result<CloudLlmModel, StorageError>;

    /// Models ordered by id.
    async fn list_models(&self, page: PageRequest) -> Result<Page<CloudLlmModel>, StorageError>;

    async fn insert_model(&self, model: &NewCloudLlmModel) -> Result<CloudLlmModel, StorageError>;

    /// Overwrite every mutable field of an existing model.
    async fn update_model(
        &self,
        id: ModelId,
        model: &NewCloudLlmModel,
    ) -> Result<CloudLlmModel, StorageError>;

    async fn delete_model(&self, id: ModelId) -> Result<(), StorageError>;

    async fn set_model_enabled(
        &self,
        id: ModelId,
        enabled: bool,
    ) -> Result<CloudLlmModel, StorageError>;
}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn find_conversation(&self, id: ConversationId) -> Result<Conversation, StorageError>;

    /// Create an untitled conversation.
    async fn create_conversation(&self) -> Result<Conversation, StorageError>;

    /// Conversations newest first, optionally filtered by a case-insensitive
    /// title substring.
    async fn list_conversations(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Conversation>, StorageError>;

    async fn rename_conversation(
        &self,
        id: ConversationId,
        title: Option<&str>,
    ) -> Result<Conversation, StorageError>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Up to `limit` most recent messages of a conversation, newest first.
    async fn recent_messages(
        &self,
        conversation_id: ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, StorageError>;

    /// Messages newest first, restricted to ids below `before` when given.
    async fn list_messages(
        &self,
        conversation_id: ConversationId,
        before: Option<MessageId>,
        limit: usize,
    ) -> Result<Vec<Message>, StorageError>;

    /// Insert the user question and the assistant answer, in that order, as
    /// one atomic unit.
    async fn append_turn(
        &self,
        conversation_id: ConversationId,
        question: &str,
        answer: &str,
    ) -> Result<(Message, Message), StorageError>;
}

#[async_trait]
pub trait SettingRepository: Send + Sync {
    async fn get_setting(&self, key: &str) -> Result<Option<Setting>, StorageError>;

    /// Insert or overwrite the value for `key`.
    async fn set_setting(&self, key: &str, value: &str) -> Result<Setting, StorageError>;

    async fn list_settings(&self) -> Result<Vec<Setting>, StorageError>;
}
