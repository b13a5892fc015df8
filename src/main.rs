mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use legis_embed::config::LegisConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "legis-embed", version, about = "Embedding service and dataset tooling for legal texts")]
struct Cli {
    /// Config file (defaults to ~/.legis-embed/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP embedding service
    Serve,
    /// Embed every chunk file in a directory and write embeddings.json next to it
    EmbedBatch {
        /// Directory of `<yy><titl><code>_chunk<N>.txt` files
        input_dir: PathBuf,
    },
    /// Check a dataset file for structural problems
    Validate {
        /// Dataset file (embeddings.json)
        file: PathBuf,
    },
    /// Drop and recreate the configured Qdrant collection
    Provision,
    /// Upload a dataset file into the configured Qdrant collection
    Upload {
        /// Dataset file (embeddings.json)
        file: PathBuf,
    },
    /// Search the collection for text similar to a query
    Search {
        query: String,
        /// Number of results (defaults to qdrant.search_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Split plain-text documents into chunk files
    Chunk {
        input_dir: PathBuf,
        output_dir: PathBuf,
        /// Maximum characters per chunk (defaults to chunking.chunk_size)
        #[arg(long)]
        size: Option<usize>,
    },
    /// Manage the embedding model
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },
}

#[derive(Subcommand)]
enum ModelAction {
    /// Download the embedding model to the configured cache directory
    Download,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LegisConfig::load_from(path)?,
        None => LegisConfig::load()?,
    };

    // Log to stderr so stdout carries only command output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => legis_embed::server::serve(config).await?,
        Command::EmbedBatch { input_dir } => cli::embed_batch::embed_batch(&config, &input_dir).await?,
        Command::Validate { file } => cli::validate::validate(&config, &file)?,
        Command::Provision => cli::provision::provision(&config).await?,
        Command::Upload { file } => cli::upload::upload(&config, &file).await?,
        Command::Search { query, limit } => cli::search::search(&config, &query, limit).await?,
        Command::Chunk {
            input_dir,
            output_dir,
            size,
        } => cli::chunk::chunk(&config, &input_dir, &output_dir, size)?,
        Command::Model { action } => match action {
            ModelAction::Download => cli::model_download(&config.embedding).await?,
        },
    }

    Ok(())
}
