//! Streaming chat completion domain.
//!
//! Provider chunks are folded into a [`accumulator::CompletionAccumulator`]
//! by a pure reducer so the orchestration loop stays free of parsing logic.

pub mod accumulator;
pub mod chunk;
pub mod request;
