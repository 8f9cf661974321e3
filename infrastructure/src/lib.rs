//! Infrastructure layer for grove
//!
//! Adapters that implement the ports defined in the application layer:
//! SQLite storage, the OpenAI-compatible streaming gateway, and
//! configuration file loading.

pub mod config;
pub mod openai;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, DataPaths, FileChatConfig, FileConfig,
    FileOutputConfig, FileProviderConfig, FileReplConfig,
};
pub use openai::OpenAiGateway;
pub use storage::SqliteStorage;
