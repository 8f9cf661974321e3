//! One question/answer exchange on the console.

use crate::progress::stream::ConsoleStreamObserver;
use grove_application::{SendMessageError, SendMessageInput, SendMessageOutput, SendMessageUseCase};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Stream one answer to stdout.
///
/// Ctrl-C while the answer is in flight cancels this request only; the
/// caller gets [`SendMessageError::Cancelled`] and nothing is persisted.
pub async fn run_turn(
    use_case: &SendMessageUseCase,
    input: SendMessageInput,
    show_progress: bool,
) -> Result<SendMessageOutput, SendMessageError> {
    let token = CancellationToken::new();
    let use_case = use_case.clone().with_cancellation(token.clone());
    let observer = ConsoleStreamObserver::stdout(show_progress);

    let run = use_case.execute(input, &observer);
    tokio::pin!(run);

    let result = tokio::select! {
        result = &mut run => result,
        _ = tokio::signal::ctrl_c() => {
            debug!("Interrupt received, cancelling request");
            token.cancel();
            run.await
        }
    };

    observer.finish();
    result
}
