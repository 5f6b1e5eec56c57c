//! typequiz CLI: generate, normalize, validate, and score personality quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "typequiz", version, about = "Personality quiz authoring and scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one raw quiz document per configured topic
    Generate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Normalize raw documents into the canonical corpus
    Normalize {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score an answer set against a canonical test
    Score {
        /// Test id in the canonical corpus
        #[arg(long)]
        test_id: String,

        /// JSON file with an array of {questionId, selectedOptionId}
        #[arg(long)]
        answers: PathBuf,

        /// Persist the result for later display
        #[arg(long)]
        save: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate canonical test documents
    Validate {
        /// Path to a canonical document or a directory of them
        #[arg(long)]
        input: PathBuf,
    },

    /// Create starter config and a sample raw document
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("typequiz=info".parse().unwrap())
                .add_directive("typequiz_core=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config } => commands::generate::execute(config),
        Commands::Normalize { config } => commands::normalize::execute(config),
        Commands::Score {
            test_id,
            answers,
            save,
            json,
            config,
        } => commands::score::execute(test_id, answers, save, json, config),
        Commands::Validate { input } => commands::validate::execute(input),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
