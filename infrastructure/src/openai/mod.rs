//! OpenAI-compatible chat completion provider.

mod gateway;
mod sse;
mod wire;

pub use gateway::OpenAiGateway;
