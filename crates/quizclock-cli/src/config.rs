//! Configuration file loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizclock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizclockConfig {
    /// Question file used when `--problems` is not given.
    #[serde(default = "default_problems")]
    pub problems: PathBuf,
    /// Time limit for the whole quiz in seconds (0 = no limit).
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// Shuffle questions before playing.
    #[serde(default)]
    pub shuffle: bool,
    /// Fixed shuffle seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_problems() -> PathBuf {
    PathBuf::from("problems.csv")
}
fn default_time_limit() -> u64 {
    0
}

impl Default for QuizclockConfig {
    fn default() -> Self {
        Self {
            problems: default_problems(),
            time_limit_secs: default_time_limit(),
            shuffle: false,
            seed: None,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizclock.toml` in the current directory
/// 2. `~/.config/quizclock/config.toml`
///
/// Environment variable overrides: `QUIZCLOCK_PROBLEMS`, `QUIZCLOCK_TIME_LIMIT`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizclockConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizclock.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizclockConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizclockConfig::default(),
    };

    apply_env_overrides(config, |name| std::env::var(name).ok())
}

fn apply_env_overrides(
    mut config: QuizclockConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<QuizclockConfig> {
    if let Some(problems) = lookup("QUIZCLOCK_PROBLEMS") {
        config.problems = PathBuf::from(problems);
    }

    if let Some(limit) = lookup("QUIZCLOCK_TIME_LIMIT") {
        config.time_limit_secs = limit
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZCLOCK_TIME_LIMIT: '{limit}'"))?;
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizclock"))
}
