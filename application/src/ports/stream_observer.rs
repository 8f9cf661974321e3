//! Stream observer port
//!
//! One-way sink for [`StreamEvent`]s emitted while a completion is drained.
//! Emission is fire-and-forget: an implementation must never block on a
//! consumer or report failure back to the producer.

use grove_domain::StreamEvent;
use tokio::sync::mpsc;
use tracing::trace;

/// Receives streaming events in arrival order.
///
/// Implementations live in the presentation layer (console) or forward to
/// another task (channel).
pub trait StreamObserver: Send + Sync {
    fn emit(&self, event: StreamEvent);
}

/// No-op observer for when nobody is listening
pub struct NoStreamObserver;

impl StreamObserver for NoStreamObserver {
    fn emit(&self, _event: StreamEvent) {}
}

/// Forwards events to an unbounded channel.
///
/// A dropped receiver is not an error; later events are discarded.
pub struct ChannelStreamObserver {
    tx: mpsc::UnboundedSender<StreamEvent>,
}

impl ChannelStreamObserver {
    pub fn new(tx: mpsc::UnboundedSender<StreamEvent>) -> Self {
        Self { tx }
    }

    /// Create an observer together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<StreamEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl StreamObserver for ChannelStreamObserver {
    fn emit(&self, event: StreamEvent) {
        if self.tx.send(event).is_err() {
            trace!("Stream observer receiver dropped; event discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_observer_forwards_in_order() {
        let (observer, mut rx) = ChannelStreamObserver::channel();
        observer.emit(StreamEvent::fragment("a", 0));
        observer.emit(StreamEvent::completed(1));

        assert_eq!(rx.try_recv().unwrap(), StreamEvent::fragment("a", 0));
        assert_eq!(rx.try_recv().unwrap(), StreamEvent::completed(1));
    }

    #[test]
    fn test_closed_receiver_is_ignored() {
        let (observer, rx) = ChannelStreamObserver::channel();
        drop(rx);
        observer.emit(StreamEvent::fragment("lost", 0));
    }
}
