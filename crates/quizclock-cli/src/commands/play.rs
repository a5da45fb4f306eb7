//! The `quizclock play` command.

use std::path::PathBuf;

use anyhow::Result;

use quizclock_core::engine::{ConsoleReporter, QuizEngine, QuizEngineConfig};
use quizclock_core::reader::ResponseReader;

use crate::config::load_config_from;

pub async fn execute(
    problems: Option<PathBuf>,
    limit: Option<u64>,
    shuffle: bool,
    seed: Option<u64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected 'text' or 'json'"
    );

    let config = load_config_from(config_path.as_deref())?;

    let problems = problems.unwrap_or(config.problems);
    let limit = limit.unwrap_or(config.time_limit_secs);
    let seed = seed.or(config.seed);
    let shuffle = shuffle || config.shuffle || seed.is_some();

    let mut engine = QuizEngine::import(&problems, QuizEngineConfig::with_time_limit_secs(limit))?;

    if shuffle {
        let seed = engine.shuffle(seed)?;
        tracing::info!(seed, "questions shuffled");
    }

    let reader = ResponseReader::stdin();
    let reporter = ConsoleReporter::stdout();
    let outcome = engine.play(&reader, &reporter).await?;
    tracing::debug!(?outcome, "play finished");

    let report = engine.score();
    if format == "json" {
        println!();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    Ok(())
}
