//! CLI `upload` command — push a dataset file into the vector collection.

use anyhow::{Context, Result};
use std::path::Path;

use legis_embed::config::LegisConfig;
use legis_embed::dataset::DatasetEntry;
use legis_embed::qdrant::QdrantClient;

pub async fn upload(config: &LegisConfig, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read dataset: {}", file.display()))?;
    let entries: Vec<DatasetEntry> =
        serde_json::from_str(&json).context("failed to parse dataset JSON")?;

    println!("Uploading {} points to '{}'...", entries.len(), config.qdrant.collection);

    let client = QdrantClient::new(&config.qdrant.url)?;
    let uploaded = client
        .upsert_points(
            &config.qdrant.collection,
            &entries,
            config.qdrant.vector_size,
            config.qdrant.upload_batch_size,
        )
        .await?;

    println!("Uploaded {uploaded} points to Qdrant.");
    Ok(())
}
