//! Streaming chat completions over an OpenAI-compatible HTTP API.

use super::sse::SseParser;
use super::wire::{ChatCompletionBody, ErrorBody, StreamPayload};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use futures::StreamExt;
use grove_application::{ChunkStream, GatewayError, LlmGateway};
use grove_domain::core::string::preview;
use grove_domain::{ChatChunk, CloudLlmModel, CompletionRequest};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Chunks buffered between the network task and the consumer.
const CHANNEL_CAPACITY: usize = 64;

const DEFAULT_USER_AGENT: &str = concat!("grove/", env!("CARGO_PKG_VERSION"));

/// [`LlmGateway`] adapter for `/chat/completions` style providers.
///
/// One HTTP client is shared by every request; the endpoint and API key come
/// from the model record each time, so nothing per-provider is cached.
#[derive(Clone)]
pub struct OpenAiGateway {
    client: reqwest::Client,
    default_endpoint: String,
}

impl OpenAiGateway {
    pub fn new(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            default_endpoint: config.default_endpoint.clone(),
        })
    }

    fn completions_url(&self, model: &CloudLlmModel) -> String {
        let endpoint = model.endpoint.trim();
        let base = if endpoint.is_empty() {
            self.default_endpoint.as_str()
        } else {
            endpoint
        };
        format!("{}/chat/completions", base.trim_end_matches('/'))
    }

    fn headers(api_key: &str) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| GatewayError::Other("API key is not a valid header value".into()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn open_stream(
        &self,
        model: &CloudLlmModel,
        request: &CompletionRequest,
    ) -> Result<ChunkStream, GatewayError> {
        let url = self.completions_url(model);
        debug!(
            model_id = model.id.get(),
            model = %request.model,
            messages = request.messages.len(),
            %url,
            "Opening completion stream"
        );

        let response = self
            .client
            .post(&url)
            .headers(Self::headers(&model.api_key)?)
            .json(&ChatCompletionBody::from(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %preview(&body, 200), "Provider rejected request");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: describe_error_body(&body),
            });
        }

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(pump(response, tx));
        Ok(ChunkStream::new(rx))
    }
}

/// Prefer the provider's error message over the raw JSON body.
fn describe_error_body(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Envelope {
        error: ErrorBody,
    }
    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) => envelope.error.describe(),
        Err(_) => body.trim().to_string(),
    }
}

enum Decoded {
    Chunk(ChatChunk),
    Done,
    Skip,
    Failed(GatewayError),
}

fn decode(data: &str) -> Decoded {
    let data = data.trim();
    if data.is_empty() {
        return Decoded::Skip;
    }
    if data == "[DONE]" {
        return Decoded::Done;
    }
    match serde_json::from_str::<StreamPayload>(data) {
        Ok(StreamPayload::Chunk(chunk)) => Decoded::Chunk(chunk),
        Ok(StreamPayload::Error { error }) => {
            Decoded::Failed(GatewayError::Provider(error.describe()))
        }
        Err(e) => Decoded::Failed(GatewayError::Decode(format!(
            "{e}: {}",
            preview(data, 120)
        ))),
    }
}

/// Forward decoded chunks until `[DONE]`, the end of the body, an error, or
/// the consumer going away. Returning drops the response, which closes the
/// connection.
async fn pump(response: reqwest::Response, tx: mpsc::Sender<Result<ChatChunk, GatewayError>>) {
    let mut body = response.bytes_stream();
    let mut parser = SseParser::new();

    loop {
        let next = tokio::select! {
            _ = tx.closed() => {
                debug!("Stream consumer dropped, aborting request");
                return;
            }
            next = body.next() => next,
        };

        let bytes = match next {
            Some(Ok(bytes)) => bytes,
            Some(Err(e)) => {
                let _ = tx.send(Err(GatewayError::Connection(e.to_string()))).await;
                return;
            }
            None => {
                if let Some(data) = parser.finish() {
                    forward(decode(&data), &tx).await;
                }
                trace!("Provider closed stream");
                return;
            }
        };

        for data in parser.push(&bytes) {
            if !forward(decode(&data), &tx).await {
                return;
            }
        }
    }
}

/// Returns false once the stream should stop.
async fn forward(decoded: Decoded, tx: &mpsc::Sender<Result<ChatChunk, GatewayError>>) -> bool {
    match decoded {
        Decoded::Chunk(chunk) => tx.send(Ok(chunk)).await.is_ok(),
        Decoded::Skip => true,
        Decoded::Done => false,
        Decoded::Failed(error) => {
            let _ = tx.send(Err(error)).await;
            false
        }
    }
}
