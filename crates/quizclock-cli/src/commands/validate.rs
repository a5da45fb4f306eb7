//! The `quizclock validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizclock_core::parser;

pub fn execute(problems: PathBuf, show: bool) -> Result<()> {
    let questions = parser::parse_question_file(&problems)?;

    println!(
        "Question set: {} ({} questions)",
        problems.display(),
        questions.len()
    );

    if show {
        let mut table = Table::new();
        table.set_header(vec!["#", "Question", "Answer"]);
        for (index, q) in questions.iter().enumerate() {
            table.add_row(vec![
                Cell::new(index + 1),
                Cell::new(q.prompt()),
                Cell::new(q.expected_answer()),
            ]);
        }
        println!("{table}");
    }

    let warnings = parser::validate_questions(&questions);
    for w in &warnings {
        println!("  [row {}] WARNING: {}", w.row, w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
