//! End-of-run score report.

use std::fmt;

use serde::Serialize;

/// Which closing message a report ends with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every question in the quiz was answered correctly.
    FullMarks,
    /// The run was cut short but every answer given was correct.
    AllAnsweredCorrect,
    /// Some answers were wrong; the review lists them.
    Review,
}

/// Final tally of a quiz run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    /// Questions in the quiz.
    pub total: usize,
    /// Questions whose prompt was shown.
    pub asked: usize,
    /// Questions whose answer was captured and scored.
    pub answered: usize,
    /// Correct answers.
    pub correct: usize,
    /// Whether the run ended before every question was answered.
    pub cut_short: bool,
    pub verdict: Verdict,
    /// Review lines for wrongly answered questions, in quiz order.
    pub misses: Vec<String>,
}

impl ScoreReport {
    pub fn new(
        total: usize,
        asked: usize,
        answered: usize,
        correct: usize,
        misses: Vec<String>,
    ) -> Self {
        let cut_short = answered < total;
        let verdict = if correct == total {
            Verdict::FullMarks
        } else if cut_short && answered > 0 && correct == answered {
            Verdict::AllAnsweredCorrect
        } else {
            Verdict::Review
        };

        Self {
            total,
            asked,
            answered,
            correct,
            cut_short,
            verdict,
            misses,
        }
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "You scored {} out of {}", self.correct, self.total)?;
        if self.verdict == Verdict::FullMarks {
            return writeln!(f, "Congratulations! You scored 100% correct!");
        }
        if self.cut_short {
            writeln!(f, "You only answered {} questions!", self.answered)?;
        }
        match self.verdict {
            Verdict::AllAnsweredCorrect => {
                writeln!(f, "Of the ones you were asked, you got all correct!")
            }
            _ => {
                writeln!(
                    f,
                    "These are the correct answers for the ones you got wrong:"
                )?;
                for line in &self.misses {
                    writeln!(f, " {line}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_marks() {
        let report = ScoreReport::new(2, 2, 2, 2, vec![]);
        assert_eq!(report.verdict, Verdict::FullMarks);
        assert!(!report.cut_short);
        assert_eq!(
            report.to_string(),
            "You scored 2 out of 2\nCongratulations! You scored 100% correct!\n"
        );
    }

    #[test]
    fn empty_quiz_is_full_marks() {
        let report = ScoreReport::new(0, 0, 0, 0, vec![]);
        assert_eq!(report.verdict, Verdict::FullMarks);
        assert!(report.to_string().starts_with("You scored 0 out of 0\n"));
    }

    #[test]
    fn cut_short_all_correct() {
        let report = ScoreReport::new(3, 3, 2, 2, vec![]);
        assert_eq!(report.verdict, Verdict::AllAnsweredCorrect);
        assert_eq!(
            report.to_string(),
            "You scored 2 out of 3\n\
             You only answered 2 questions!\n\
             Of the ones you were asked, you got all correct!\n"
        );
    }

    #[test]
    fn cut_short_with_mistakes_lists_them() {
        let misses = vec!["'3+3' is '6'; you said '5'".to_string()];
        let report = ScoreReport::new(3, 3, 2, 1, misses);
        assert_eq!(report.verdict, Verdict::Review);
        let text = report.to_string();
        assert!(text.contains("You only answered 2 questions!"));
        assert!(text.contains(" '3+3' is '6'; you said '5'\n"));
    }

    #[test]
    fn nothing_answered_is_not_all_correct() {
        let report = ScoreReport::new(2, 1, 0, 0, vec![]);
        assert!(report.cut_short);
        assert_eq!(report.verdict, Verdict::Review);
        assert_eq!(
            report.to_string(),
            "You scored 0 out of 2\n\
             You only answered 0 questions!\n\
             These are the correct answers for the ones you got wrong:\n"
        );
    }

    #[test]
    fn review_lists_every_miss() {
        let misses = vec![
            "'1+1' is '2'; you said '3'".to_string(),
            "'3+3' is '6'; you said ''".to_string(),
        ];
        let report = ScoreReport::new(3, 3, 3, 1, misses);
        assert_eq!(
            report.to_string(),
            "You scored 1 out of 3\n\
             These are the correct answers for the ones you got wrong:\n \
             '1+1' is '2'; you said '3'\n \
             '3+3' is '6'; you said ''\n"
        );
    }

    #[test]
    fn serializes_verdict_in_snake_case() {
        let report = ScoreReport::new(3, 3, 2, 2, vec![]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["verdict"], "all_answered_correct");
        assert_eq!(json["answered"], 2);
    }
}
