//! quizclock CLI — timed quizzes in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizclock", version, about = "Timed terminal quizzes from CSV files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz
    Play {
        /// CSV file of `question,answer` rows
        #[arg(long)]
        problems: Option<PathBuf>,

        /// Time limit for the whole quiz in seconds (0 = no limit)
        #[arg(long)]
        limit: Option<u64>,

        /// Shuffle the questions before playing
        #[arg(long)]
        shuffle: bool,

        /// Seed for a reproducible shuffle (implies --shuffle)
        #[arg(long)]
        seed: Option<u64>,

        /// Report format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a question file
    Validate {
        /// CSV file of `question,answer` rows
        #[arg(long)]
        problems: PathBuf,

        /// Print every question and answer
        #[arg(long)]
        show: bool,
    },

    /// Create a starter config and question file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizclock=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            problems,
            limit,
            shuffle,
            seed,
            format,
            config,
        } => commands::play::execute(problems, limit, shuffle, seed, format, config).await,
        Commands::Validate { problems, show } => commands::validate::execute(problems, show),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
