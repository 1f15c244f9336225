use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use resvet_core::Vocabulary;

mod analyze;

#[derive(Debug, Parser)]
#[command(name = "resvet")]
#[command(about = "Resume fact extraction and verification")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract, verify, and score one or more resume documents
    Analyze {
        /// Resume files to analyze (.pdf or .docx)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Extraction only, skipping registry and identity verification
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = resvet_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // A missing vocabulary file is not fatal: the bundled one covers the
    // default deployment.
    let vocabulary = if config.vocabulary_path.exists() {
        Vocabulary::load(&config.vocabulary_path)?
    } else {
        tracing::warn!(
            path = %config.vocabulary_path.display(),
            "vocabulary file not found, using bundled vocabulary"
        );
        Vocabulary::bundled()?
    };

    match cli.command {
        Commands::Analyze { files, offline } => {
            analyze::run_analyze(&config, &vocabulary, &files, offline).await
        }
    }
}
