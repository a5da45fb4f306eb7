//! quizclock-core — Timed quiz engine, question model, and CSV import.
//!
//! The engine asks questions one at a time and races every answer against a
//! single deadline shared by the whole quiz.

pub mod engine;
pub mod error;
pub mod mock;
pub mod model;
pub mod parser;
pub mod reader;
pub mod report;
pub mod runner;

pub use engine::{PlayOutcome, QuizEngine, QuizEngineConfig, QuizReporter};
pub use error::QuizError;
pub use model::QuestionRecord;
pub use reader::ResponseReader;
pub use report::ScoreReport;
