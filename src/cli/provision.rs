//! CLI `provision` command — drop and recreate the vector collection.

use anyhow::Result;

use legis_embed::config::LegisConfig;
use legis_embed::qdrant::{Distance, QdrantClient};

pub async fn provision(config: &LegisConfig) -> Result<()> {
    let distance: Distance = config
        .qdrant
        .distance
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let client = QdrantClient::new(&config.qdrant.url)?;

    client
        .recreate_collection(&config.qdrant.collection, config.qdrant.vector_size, distance)
        .await?;

    println!(
        "Created or reset collection '{}' with dimension {}",
        config.qdrant.collection, config.qdrant.vector_size
    );
    Ok(())
}
