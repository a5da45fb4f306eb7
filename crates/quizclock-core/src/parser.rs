//! CSV question-file parser.
//!
//! Loads `question,answer` rows (no header) and validates them. Any bad row
//! fails the whole import.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::QuizError;
use crate::model::QuestionRecord;

/// Parse a CSV file into question records, in file order.
pub fn parse_question_file(path: &Path) -> Result<Vec<QuestionRecord>, QuizError> {
    let file = File::open(path).map_err(|source| QuizError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    parse_questions(file)
}

/// Parse CSV rows from any reader (useful for testing).
///
/// The first two columns are the prompt and the expected answer. Every row
/// must have the same number of columns.
pub fn parse_questions<R: Read>(reader: R) -> Result<Vec<QuestionRecord>, QuizError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut questions = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row_number = index + 1;
        let record = row.map_err(|source| QuizError::Malformed {
            row: row_number,
            source,
        })?;

        match (record.get(0), record.get(1)) {
            (Some(prompt), Some(answer)) => questions.push(QuestionRecord::new(prompt, answer)),
            _ => {
                return Err(QuizError::MissingColumn {
                    row: row_number,
                    found: record.len(),
                })
            }
        }
    }

    tracing::debug!(count = questions.len(), "imported questions");
    Ok(questions)
}

/// A warning from question-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based row of the offending question.
    pub row: usize,
    /// Warning message.
    pub message: String,
}

/// Check a question set for entries that are likely mistakes.
pub fn validate_questions(questions: &[QuestionRecord]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (index, q) in questions.iter().enumerate() {
        let row = index + 1;

        if q.prompt().trim().is_empty() {
            warnings.push(ValidationWarning {
                row,
                message: "prompt is empty".into(),
            });
        } else {
            match first_seen.entry(q.prompt()) {
                Entry::Occupied(first) => warnings.push(ValidationWarning {
                    row,
                    message: format!(
                        "duplicate prompt '{}' (first seen on row {})",
                        q.prompt(),
                        first.get()
                    ),
                }),
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
            }
        }

        if q.expected_answer().is_empty() {
            warnings.push(ValidationWarning {
                row,
                message: "expected answer is empty".into(),
            });
        } else if q.expected_answer().trim() != q.expected_answer() {
            // Only line endings are stripped from responses, so padding in
            // the answer has to be typed exactly.
            warnings.push(ValidationWarning {
                row,
                message: format!(
                    "expected answer '{}' has leading or trailing whitespace",
                    q.expected_answer()
                ),
            });
        }
    }

    warnings
}
