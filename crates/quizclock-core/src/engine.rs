//! Central quiz engine.
//!
//! Owns the question list and runs it against a single shared deadline. The
//! deadline is one countdown for the whole quiz: time spent on one question
//! is not given back to the next.

use std::future;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::QuizError;
use crate::model::QuestionRecord;
use crate::parser;
use crate::reader::ResponseReader;
use crate::report::ScoreReport;
use crate::runner::QuestionRunner;

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct QuizEngineConfig {
    /// Total time budget for the whole quiz. `None` or zero means unbounded.
    pub time_limit: Option<Duration>,
    /// Floor applied per question when a time limit is set.
    pub min_time_per_question: Duration,
}

impl Default for QuizEngineConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            min_time_per_question: Duration::from_secs(1),
        }
    }
}

impl QuizEngineConfig {
    /// Config with a limit given in whole seconds, where `0` means unbounded.
    pub fn with_time_limit_secs(secs: u64) -> Self {
        Self {
            time_limit: (secs > 0).then_some(Duration::from_secs(secs)),
            ..Self::default()
        }
    }
}

/// How a play session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Every question was answered.
    Completed,
    /// The deadline fired while waiting on the answer to `question` (1-based).
    TimedOut { question: usize },
}

/// Presentation hooks for a play session.
pub trait QuizReporter: Send + Sync {
    fn on_quiz_start(&self, total: usize, time_limit: Option<Duration>);
    fn on_question(&self, ordinal: usize, prompt: &str);
    fn on_time_up(&self, ordinal: usize);
}

/// No-op reporter.
pub struct NoopReporter;

impl QuizReporter for NoopReporter {
    fn on_quiz_start(&self, _: usize, _: Option<Duration>) {}
    fn on_question(&self, _: usize, _: &str) {}
    fn on_time_up(&self, _: usize) {}
}

/// Writes quiz text to a terminal-like stream.
pub struct ConsoleReporter<W> {
    out: Mutex<W>,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, args: std::fmt::Arguments<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_fmt(args).and_then(|()| out.flush()) {
            tracing::warn!("failed to write quiz output: {e}");
        }
    }
}

impl<W: Write + Send> QuizReporter for ConsoleReporter<W> {
    fn on_quiz_start(&self, total: usize, time_limit: Option<Duration>) {
        self.emit(format_args!(
            "Please answer the following {total} questions:\n"
        ));
        if let Some(limit) = time_limit {
            self.emit(format_args!(
                "(You have {} seconds to finish!)\n",
                limit.as_secs()
            ));
        }
    }

    fn on_question(&self, ordinal: usize, prompt: &str) {
        self.emit(format_args!("{ordinal}: {prompt} = ? "));
    }

    fn on_time_up(&self, _: usize) {
        self.emit(format_args!("\nSorry, your time has run out!\n"));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ready,
    Played,
}

/// A single-use timed quiz.
#[derive(Debug)]
pub struct QuizEngine {
    questions: Vec<QuestionRecord>,
    config: QuizEngineConfig,
    asked: usize,
    answered: usize,
    correct: usize,
    phase: Phase,
}

impl QuizEngine {
    pub fn new(questions: Vec<QuestionRecord>, config: QuizEngineConfig) -> Self {
        Self {
            questions,
            config,
            asked: 0,
            answered: 0,
            correct: 0,
            phase: Phase::Ready,
        }
    }

    /// Build a quiz from a CSV question file. Any bad row fails the import.
    pub fn import(path: &Path, config: QuizEngineConfig) -> Result<Self, QuizError> {
        Ok(Self::new(parser::parse_question_file(path)?, config))
    }

    /// Build a quiz from CSV read out of `reader`.
    pub fn import_from_reader<R: Read>(
        reader: R,
        config: QuizEngineConfig,
    ) -> Result<Self, QuizError> {
        Ok(Self::new(parser::parse_questions(reader)?, config))
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn asked_count(&self) -> usize {
        self.asked
    }

    pub fn answered_count(&self) -> usize {
        self.answered
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    /// Shuffle the questions and return the seed used.
    ///
    /// Without an explicit seed the current time is used.
    pub fn shuffle(&mut self, seed: Option<u64>) -> Result<u64, QuizError> {
        let seed = seed.unwrap_or_else(time_seed);
        let mut rng = StdRng::seed_from_u64(seed);
        self.shuffle_with(&mut rng)?;
        tracing::debug!(seed, "shuffled questions");
        Ok(seed)
    }

    /// Shuffle the questions with a caller-supplied generator.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), QuizError> {
        if self.phase == Phase::Played {
            return Err(QuizError::AlreadyPlayed);
        }
        self.questions.shuffle(rng);
        Ok(())
    }

    /// The deadline `play` will run under, after the per-question floor.
    pub fn effective_time_limit(&self) -> Option<Duration> {
        let limit = self.config.time_limit.filter(|limit| !limit.is_zero())?;
        let count = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let floor = self.config.min_time_per_question.saturating_mul(count);
        Some(limit.max(floor))
    }

    /// Ask every question in order, racing each answer against the deadline.
    ///
    /// When the deadline fires the pending read is abandoned, not cancelled,
    /// and no further questions are asked.
    ///
    /// If a read cannot be started the prompt is not shown and the error is
    /// returned; the counters and `score` then cover only the questions
    /// before it.
    pub async fn play(
        &mut self,
        reader: &ResponseReader,
        reporter: &dyn QuizReporter,
    ) -> Result<PlayOutcome, QuizError> {
        if self.phase == Phase::Played {
            return Err(QuizError::AlreadyPlayed);
        }
        self.phase = Phase::Played;

        let total = self.questions.len();
        let time_limit = self.effective_time_limit();
        reporter.on_quiz_start(total, time_limit);
        tracing::info!(questions = total, ?time_limit, "starting quiz");

        let timer = time_limit.map(tokio::time::sleep);
        let deadline = async move {
            match timer {
                Some(timer) => timer.await,
                None => future::pending::<()>().await,
            }
        };
        tokio::pin!(deadline);

        for (index, record) in self.questions.iter_mut().enumerate() {
            let ordinal = index + 1;
            let mut runner = QuestionRunner::new(record);
            let handle = runner.ask(reader)?;

            self.asked += 1;
            reporter.on_question(ordinal, runner.prompt());

            tokio::select! {
                biased;
                () = &mut deadline => {
                    reporter.on_time_up(ordinal);
                    tracing::info!(
                        question = ordinal,
                        answered = self.answered,
                        pending_reads = reader.pending_reads(),
                        "time limit reached, abandoning pending read"
                    );
                    return Ok(PlayOutcome::TimedOut { question: ordinal });
                }
                increment = runner.complete(handle) => {
                    self.answered += 1;
                    self.correct += increment as usize;
                }
            }
        }

        tracing::info!(
            answered = self.answered,
            correct = self.correct,
            "quiz complete"
        );
        Ok(PlayOutcome::Completed)
    }

    /// Tally the run.
    pub fn score(&self) -> ScoreReport {
        let misses = self
            .questions
            .iter()
            .filter_map(QuestionRecord::describe_if_wrong)
            .collect();

        ScoreReport::new(
            self.questions.len(),
            self.asked,
            self.answered,
            self.correct,
            misses,
        )
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
