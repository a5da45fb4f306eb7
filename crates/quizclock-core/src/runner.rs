//! Asks a single question and scores the answer.

use crate::error::QuizError;
use crate::model::QuestionRecord;
use crate::reader::{ReadHandle, ReadOutcome, ResponseReader};

/// Progress of a [`QuestionRunner`].
///
/// There is no cancelled state: a runner whose completion is never awaited
/// stays `Asked` and its record is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Pending,
    Asked,
    Scored,
}

/// Drives one [`QuestionRecord`] from asked to scored.
///
/// The runner mutates only its own record. The score increment is handed
/// back as the output of [`QuestionRunner::complete`] so the caller can race
/// it against a deadline and apply it to its own counters.
#[derive(Debug)]
pub struct QuestionRunner<'a> {
    record: &'a mut QuestionRecord,
    state: RunnerState,
}

impl<'a> QuestionRunner<'a> {
    pub fn new(record: &'a mut QuestionRecord) -> Self {
        Self {
            record,
            state: RunnerState::Pending,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn prompt(&self) -> &str {
        self.record.prompt()
    }

    /// Start reading the answer in the background.
    pub fn ask(&mut self, reader: &ResponseReader) -> Result<ReadHandle, QuizError> {
        debug_assert_eq!(self.state, RunnerState::Pending);
        let handle = reader.begin_read()?;
        self.state = RunnerState::Asked;
        Ok(handle)
    }

    /// Wait for the answer, record it, and resolve with 1 if it was correct.
    ///
    /// End of stream and read failures count as an empty (wrong) answer.
    pub async fn complete(&mut self, handle: ReadHandle) -> u32 {
        debug_assert_eq!(self.state, RunnerState::Asked);
        let raw = match handle.outcome().await {
            ReadOutcome::Line(line) => line,
            ReadOutcome::EndOfStream => {
                tracing::debug!(prompt = self.record.prompt(), "input closed before answer");
                String::new()
            }
            ReadOutcome::Failed(e) => {
                tracing::warn!(prompt = self.record.prompt(), "failed to read answer: {e}");
                String::new()
            }
        };

        self.record.record_answer(&raw);
        self.state = RunnerState::Scored;
        tracing::debug!(
            prompt = self.record.prompt(),
            correct = self.record.is_correct(),
            "question scored"
        );
        u32::from(self.record.is_correct())
    }
}
