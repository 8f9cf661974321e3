//! Presentation layer for grove
//!
//! This crate contains CLI definitions, output formatters, the console
//! stream observer, and the interactive chat interface.

pub mod admin;
pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use admin::AdminConsole;
pub use chat::{ChatRepl, run_turn};
pub use cli::commands::{
    AskArgs, ChatArgs, Cli, Command, ConversationsCommand, MessagesArgs, ModelsCommand,
    RequestArgs, SettingsCommand,
};
pub use output::console::ConsoleFormatter;
pub use progress::stream::ConsoleStreamObserver;
