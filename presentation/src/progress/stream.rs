//! Console stream observer
//!
//! Shows a spinner on stderr until the first event arrives, then writes each
//! fragment to stdout as-is. Write failures are dropped: a closed pipe must
//! not abort the request that is still being persisted.

use grove_application::StreamObserver;
use grove_domain::StreamEvent;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

pub struct ConsoleStreamObserver<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleStreamObserver {
    /// Observer writing to stdout, with a spinner when `show_progress` is set.
    pub fn stdout(show_progress: bool) -> Self {
        let spinner = show_progress.then(Self::spinner);
        Self {
            out: Mutex::new(io::stdout()),
            spinner: Mutex::new(spinner),
        }
    }

    fn spinner() -> ProgressBar {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.set_message("Waiting for response...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl<W: Write + Send> ConsoleStreamObserver<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            spinner: Mutex::new(None),
        }
    }

    /// Remove the spinner if no event ever arrived, e.g. after an error.
    pub fn finish(&self) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }

    pub fn into_inner(self) -> Option<W> {
        self.finish();
        self.out.into_inner().ok()
    }
}

impl<W: Write + Send> StreamObserver for ConsoleStreamObserver<W> {
    fn emit(&self, event: StreamEvent) {
        self.finish();

        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if !event.content.is_empty() {
            let _ = out.write_all(event.content.as_bytes());
        }
        if event.done {
            let _ = out.write_all(b"\n");
        }
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_fragments_written_in_order() {
        let observer = ConsoleStreamObserver::with_writer(Vec::new());
        observer.emit(StreamEvent::fragment("Hel", 0));
        observer.emit(StreamEvent::fragment("lo", 1));
        observer.emit(StreamEvent::completed(2));

        let out = observer.into_inner().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Hello\n");
    }

    #[test]
    fn test_write_errors_are_ignored() {
        let observer = ConsoleStreamObserver::with_writer(BrokenPipe);
        observer.emit(StreamEvent::fragment("x", 0));
        observer.emit(StreamEvent::completed(1));
    }

    #[test]
    fn test_spinner_cleared_on_first_event() {
        let observer = ConsoleStreamObserver {
            out: Mutex::new(Vec::new()),
            spinner: Mutex::new(Some(ProgressBar::hidden())),
        };
        observer.emit(StreamEvent::fragment("a", 0));
        assert!(observer.spinner.lock().unwrap().is_none());
    }
}
