//! Line-at-a-time answer input that can be raced against a timer.
//!
//! Each read blocks a dedicated OS thread and hands its result back over a
//! oneshot channel. There is no way to interrupt a blocked console read, so a
//! caller that gives up on a [`ReadHandle`] simply drops it; the thread keeps
//! running until the line (or end of stream) arrives and then discards it.
//! Plain threads are used instead of runtime blocking tasks so that an
//! abandoned read never holds up runtime shutdown or process exit.

use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use tokio::sync::oneshot;

use crate::error::QuizError;

/// Default bound on reads that may be outstanding at once.
pub const DEFAULT_MAX_PENDING: usize = 4;

/// A blocking source of input lines.
pub trait LineSource: Send + 'static {
    /// Block until the next line is available.
    ///
    /// The returned line may still carry its terminator. `Ok(None)` means the
    /// stream is closed.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Adapts any [`BufRead`] into a [`LineSource`].
pub struct BufferedLines<R> {
    inner: R,
}

impl<R> BufferedLines<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: BufRead + Send + 'static> LineSource for BufferedLines<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.inner.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

/// What a single read produced.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A line of input, terminator included if one was read.
    Line(String),
    /// The stream closed before a line arrived.
    EndOfStream,
    /// The read failed.
    Failed(io::Error),
}

/// Starts background line reads against a shared input source.
///
/// Clones share the same source and the same pending-read count.
#[derive(Clone)]
pub struct ResponseReader {
    source: Arc<Mutex<Box<dyn LineSource>>>,
    pending: Arc<AtomicUsize>,
    max_pending: usize,
}

impl ResponseReader {
    pub fn new(source: impl LineSource) -> Self {
        Self {
            source: Arc::new(Mutex::new(Box::new(source))),
            pending: Arc::new(AtomicUsize::new(0)),
            max_pending: DEFAULT_MAX_PENDING,
        }
    }

    /// Reader over the process's standard input.
    pub fn stdin() -> Self {
        Self::new(BufferedLines::new(BufReader::new(io::stdin())))
    }

    /// Bound the number of reads that may be outstanding at once (minimum 1).
    pub fn with_max_pending(mut self, limit: usize) -> Self {
        self.max_pending = limit.max(1);
        self
    }

    /// Reads started but not yet finished, including abandoned ones.
    pub fn pending_reads(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Start reading one line on a background thread.
    pub fn begin_read(&self) -> Result<ReadHandle, QuizError> {
        let previous = self.pending.fetch_add(1, Ordering::AcqRel);
        let guard = PendingGuard(Arc::clone(&self.pending));
        if previous >= self.max_pending {
            return Err(QuizError::ReaderSaturated {
                pending: previous,
                limit: self.max_pending,
            });
        }

        let (tx, rx) = oneshot::channel();
        let source = Arc::clone(&self.source);

        thread::Builder::new()
            .name("quiz-reader".into())
            .spawn(move || {
                let outcome = match source.lock() {
                    Ok(mut source) => match source.next_line() {
                        Ok(Some(line)) => ReadOutcome::Line(line),
                        Ok(None) => ReadOutcome::EndOfStream,
                        Err(e) => ReadOutcome::Failed(e),
                    },
                    Err(_) => ReadOutcome::Failed(io::Error::other("input source lock poisoned")),
                };
                drop(guard);
                if tx.send(outcome).is_err() {
                    tracing::debug!("answer arrived after its question was abandoned");
                }
            })
            .map_err(QuizError::Spawn)?;

        Ok(ReadHandle { rx })
    }
}

/// Decrements the pending count when a read finishes or fails to start.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Handle to one in-flight read. Dropping it abandons the read.
#[derive(Debug)]
pub struct ReadHandle {
    rx: oneshot::Receiver<ReadOutcome>,
}

impl ReadHandle {
    /// Wait for the read to finish.
    pub async fn outcome(self) -> ReadOutcome {
        self.rx.await.unwrap_or_else(|_| {
            ReadOutcome::Failed(io::Error::other("reader thread exited without a result"))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use super::*;
    use crate::mock::ScriptedInput;

    #[tokio::test]
    async fn reads_lines_in_order() {
        let reader = ResponseReader::new(BufferedLines::new(Cursor::new("4\r\n6\n")));

        match reader.begin_read().unwrap().outcome().await {
            ReadOutcome::Line(line) => assert_eq!(line, "4\r\n"),
            other => panic!("expected a line, got {other:?}"),
        }
        match reader.begin_read().unwrap().outcome().await {
            ReadOutcome::Line(line) => assert_eq!(line, "6\n"),
            other => panic!("expected a line, got {other:?}"),
        }
        assert!(matches!(
            reader.begin_read().unwrap().outcome().await,
            ReadOutcome::EndOfStream
        ));
    }

    #[tokio::test]
    async fn last_line_without_terminator() {
        let reader = ResponseReader::new(BufferedLines::new(Cursor::new("Paris")));
        match reader.begin_read().unwrap().outcome().await {
            ReadOutcome::Line(line) => assert_eq!(line, "Paris"),
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn read_errors_are_reported() {
        let reader = ResponseReader::new(
            ScriptedInput::new().fail(io::ErrorKind::InvalidData),
        );
        assert!(matches!(
            reader.begin_read().unwrap().outcome().await,
            ReadOutcome::Failed(_)
        ));
    }

    #[tokio::test]
    async fn abandoned_read_finishes_in_background() {
        let reader = ResponseReader::new(
            ScriptedInput::new().line_after(Duration::from_millis(100), "late"),
        );
        let handle = reader.begin_read().unwrap();
        assert_eq!(reader.pending_reads(), 1);
        drop(handle);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(reader.pending_reads(), 0);
    }

    #[tokio::test]
    async fn pending_reads_are_bounded() {
        let reader = ResponseReader::new(
            ScriptedInput::new()
                .line_after(Duration::from_millis(200), "a")
                .line_after(Duration::from_millis(200), "b"),
        )
        .with_max_pending(1);

        let first = reader.begin_read().unwrap();
        let err = reader.begin_read().unwrap_err();
        assert!(matches!(
            err,
            QuizError::ReaderSaturated {
                pending: 1,
                limit: 1
            }
        ));
        // A rejected read must not count against the bound.
        assert_eq!(reader.pending_reads(), 1);

        assert!(matches!(first.outcome().await, ReadOutcome::Line(_)));
        assert!(reader.begin_read().is_ok());
    }
}
