//! Quiz error types.
//!
//! Every variant here is fatal for the current run: import failures abort
//! before any question is asked, and engine misuse is rejected rather than
//! left undefined. Wrong answers and timeouts are not errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while importing or running a quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question file could not be opened.
    #[error("unable to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed as CSV.
    #[error("error reading CSV row {row}: {source}")]
    Malformed {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// A row has fewer than the two required columns.
    #[error("row {row} has {found} column(s), expected a question and an answer")]
    MissingColumn { row: usize, found: usize },

    /// Too many abandoned reads are still waiting on the input stream.
    #[error("{pending} reads are still pending on the input stream (limit {limit})")]
    ReaderSaturated { pending: usize, limit: usize },

    /// The reader thread could not be started.
    #[error("failed to start input reader: {0}")]
    Spawn(#[source] std::io::Error),

    /// The engine has already played its one run.
    #[error("quiz has already been played")]
    AlreadyPlayed,
}
