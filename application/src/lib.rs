//! Application layer for grove
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatDefaults;
pub use ports::{
    llm_gateway::{ChunkStream, GatewayError, LlmGateway},
    storage::{
        CloudModelRepository, ConversationRepository, MessageRepository, Page, PageRequest,
        SettingRepository, StorageError,
    },
    stream_observer::{ChannelStreamObserver, NoStreamObserver, StreamObserver},
};
pub use use_cases::browse_conversations::BrowseConversationsUseCase;
pub use use_cases::manage_models::{ManageModelsUseCase, ModelDraft};
pub use use_cases::manage_settings::ManageSettingsUseCase;
pub use use_cases::send_message::{
    ModelUnavailable, SendMessageError, SendMessageInput, SendMessageOutput, SendMessageUseCase,
};
pub use use_cases::shared::AdminError;
