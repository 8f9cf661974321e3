//! LLM Gateway port
//!
//! Defines the interface for opening streaming chat completions against a
//! provider.

use async_trait::async_trait;
use grove_domain::{ChatChunk, CloudLlmModel, CompletionRequest};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Malformed stream payload: {0}")]
    Decode(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to chat completion
/// providers. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Open a streaming completion using the model's endpoint and credentials.
    ///
    /// Resolves once the provider has accepted the request. Errors after that
    /// point arrive through the returned [`ChunkStream`].
    async fn open_stream(
        &self,
        model: &CloudLlmModel,
        request: &CompletionRequest,
    ) -> Result<ChunkStream, GatewayError>;
}

/// Handle for receiving streamed chunks from a provider.
///
/// Wraps an `mpsc::Receiver`. The channel closing without an error is a clean
/// end of stream. Dropping the handle tells the producer to stop, which
/// aborts the underlying network call.
pub struct ChunkStream {
    pub receiver: mpsc::Receiver<Result<ChatChunk, GatewayError>>,
}

impl ChunkStream {
    pub fn new(receiver: mpsc::Receiver<Result<ChatChunk, GatewayError>>) -> Self {
        Self { receiver }
    }

    /// Receive the next chunk, or `None` once the stream has ended.
    pub async fn next(&mut self) -> Option<Result<ChatChunk, GatewayError>> {
        self.receiver.recv().await
    }

    /// Build a stream that yields the given items and then ends.
    pub fn from_items(items: Vec<Result<ChatChunk, GatewayError>>) -> Self {
        let (tx, rx) = mpsc::channel(items.len().max(1));
        for item in items {
            // Capacity covers every item, so this never blocks or fails.
            let _ = tx.try_send(item);
        }
        Self::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_items_yields_in_order_then_ends() {
        let first = ChatChunk {
            id: "a".to_string(),
            ..Default::default()
        };
        let mut stream = ChunkStream::from_items(vec![
            Ok(first),
            Err(GatewayError::Provider("overloaded".to_string())),
        ]);

        assert_eq!(stream.next().await.unwrap().unwrap().id, "a");
        assert!(matches!(
            stream.next().await,
            Some(Err(GatewayError::Provider(_)))
        ));
        assert!(stream.next().await.is_none());
    }

    #[test]
    fn test_status_error_display() {
        let err = GatewayError::Status {
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert_eq!(err.to_string(), "Provider returned HTTP 401: invalid api key");
    }
}
