//! CLI `embed-batch` command — run the directory pipeline from the terminal.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use legis_embed::config::LegisConfig;
use legis_embed::embedding::{self, EmbeddingProvider};
use legis_embed::pipeline::{embed_directory, BatchOptions};

/// Embed every chunk file in `input_dir` and write the dataset next to it.
pub async fn embed_batch(config: &LegisConfig, input_dir: &Path) -> Result<()> {
    let provider: Arc<dyn EmbeddingProvider> = Arc::from(
        embedding::create_provider(&config.embedding)
            .context("failed to create embedding provider")?,
    );

    let options = BatchOptions {
        file_name: config.dataset.file_name.clone(),
        show_progress: config.embedding.show_progress,
    };
    let input_dir = input_dir.to_path_buf();

    let outcome = tokio::task::spawn_blocking(move || {
        embed_directory(provider.as_ref(), &input_dir, &options)
    })
    .await??;

    println!(
        "Embedded {} lines into {}",
        outcome.count,
        outcome.embeddings_file.display()
    );
    Ok(())
}
