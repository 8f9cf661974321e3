//! Stream consumption: fold chunks and notify the observer.

use super::types::SendMessageError;
use crate::ports::llm_gateway::ChunkStream;
use crate::ports::stream_observer::StreamObserver;
use grove_domain::{CompletionAccumulator, StreamEvent};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Drain `stream` to completion.
///
/// Fragments are emitted in arrival order with a 0-based index that advances
/// only on fragments. Exactly one completion event is emitted on a clean
/// end: when the first choice's content just finished, or after the stream
/// ends if that signal never came. Errors and cancellation emit nothing
/// further and discard the accumulated text.
pub(super) async fn drain(
    mut stream: ChunkStream,
    observer: &dyn StreamObserver,
    cancellation_token: &Option<CancellationToken>,
) -> Result<CompletionAccumulator, SendMessageError> {
    let mut accumulator = CompletionAccumulator::new();
    let mut chunk_index: u64 = 0;
    let mut done_emitted = false;

    loop {
        let item = if let Some(token) = cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(chunk_index, "Stream cancelled");
                    return Err(SendMessageError::Cancelled);
                }
                item = stream.next() => item,
            }
        } else {
            stream.next().await
        };

        let Some(item) = item else {
            break;
        };

        let chunk = item.map_err(|e| {
            warn!(chunk_index, error = %e, "Completion stream failed");
            SendMessageError::StreamReadFailed(e)
        })?;
        accumulator = accumulator.merge(&chunk);

        if accumulator.just_finished_content() && !done_emitted {
            observer.emit(StreamEvent::completed(chunk_index));
            done_emitted = true;
        }

        if let Some(delta) = chunk.first_text_delta() {
            trace!(chunk_index, len = delta.len(), "Fragment");
            observer.emit(StreamEvent::fragment(delta, chunk_index));
            chunk_index += 1;
        }
    }

    if !done_emitted {
        debug!(chunk_index, "Stream ended without a finish signal");
        observer.emit(StreamEvent::completed(chunk_index));
    }

    if let Some(refusal) = accumulator.refusal() {
        warn!(len = refusal.len(), "Provider refused the request");
    }
    debug!(
        response_id = accumulator.id(),
        model = accumulator.model(),
        finish_reason = accumulator.finish_reason().unwrap_or("none"),
        fragments = chunk_index,
        "Completion stream drained"
    );

    Ok(accumulator)
}
