//! Scripted input for testing the quiz engine without a terminal.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::reader::LineSource;

enum Step {
    Line { delay: Duration, text: String },
    Fail(io::ErrorKind),
}

/// A [`LineSource`] that replays a fixed script of answers.
///
/// Each scripted line is returned with a trailing `\n` after its delay has
/// elapsed on the reading thread. Once the script is exhausted the source
/// reports end of stream.
#[derive(Default)]
pub struct ScriptedInput {
    steps: VecDeque<Step>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script that answers every read immediately with the given lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines
            .into_iter()
            .fold(Self::new(), |script, line| script.line(line))
    }

    /// Append an immediate answer.
    pub fn line(self, text: impl Into<String>) -> Self {
        self.line_after(Duration::ZERO, text)
    }

    /// Append an answer that arrives after `delay`.
    pub fn line_after(mut self, delay: Duration, text: impl Into<String>) -> Self {
        self.steps.push_back(Step::Line {
            delay,
            text: text.into(),
        });
        self
    }

    /// Append a read that fails with `kind`.
    pub fn fail(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(Step::Fail(kind));
        self
    }
}

impl LineSource for ScriptedInput {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        match self.steps.pop_front() {
            Some(Step::Line { delay, text }) => {
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                Ok(Some(format!("{text}\n")))
            }
            Some(Step::Fail(kind)) => Err(io::Error::new(kind, "scripted read failure")),
            None => Ok(None),
        }
    }
}
