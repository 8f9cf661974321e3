//! Use cases (application services)

pub mod browse_conversations;
pub mod manage_models;
pub mod manage_settings;
pub mod send_message;
pub mod shared;
