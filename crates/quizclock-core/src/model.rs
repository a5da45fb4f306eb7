//! Question records.
//!
//! A record pairs an immutable prompt and expected answer with the answer
//! state written during a single play session.

use serde::Serialize;

/// One question of a quiz and the outcome of asking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    prompt: String,
    expected_answer: String,
    response: String,
    was_asked: bool,
    is_correct: bool,
}

impl QuestionRecord {
    pub fn new(prompt: impl Into<String>, expected_answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            expected_answer: expected_answer.into(),
            response: String::new(),
            was_asked: false,
            is_correct: false,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn expected_answer(&self) -> &str {
        &self.expected_answer
    }

    /// The normalized response, empty until the question is answered.
    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn was_asked(&self) -> bool {
        self.was_asked
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    /// Store the user's answer and score it.
    ///
    /// Only trailing carriage returns and line feeds are stripped; the
    /// comparison is otherwise exact and case-sensitive. Must be called at
    /// most once per run.
    pub fn record_answer(&mut self, raw: &str) {
        self.response = raw.trim_end_matches(['\r', '\n']).to_string();
        self.was_asked = true;
        self.is_correct = self.response == self.expected_answer;
    }

    /// Review line for an asked question that was answered wrongly.
    pub fn describe_if_wrong(&self) -> Option<String> {
        if self.was_asked && !self.is_correct {
            Some(format!(
                "'{}' is '{}'; you said '{}'",
                self.prompt, self.expected_answer, self.response
            ))
        } else {
            None
        }
    }
}
