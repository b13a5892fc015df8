use anyhow::Result;
use std::sync::Arc;

use legis_embed::config::LegisConfig;
use legis_embed::embedding::{self, EmbeddingProvider};
use legis_embed::qdrant::QdrantClient;

/// Run an interactive search from the terminal.
pub async fn search(config: &LegisConfig, query: &str, limit: Option<usize>) -> Result<()> {
    let provider: Arc<dyn EmbeddingProvider> =
        Arc::from(embedding::create_provider(&config.embedding)?);

    // Embed the query
    let query_text = query.to_string();
    let ep = Arc::clone(&provider);
    let query_embedding = tokio::task::spawn_blocking(move || ep.embed(&query_text)).await??;

    let client = QdrantClient::new(&config.qdrant.url)?;
    let hits = client
        .search(
            &config.qdrant.collection,
            &query_embedding,
            limit.unwrap_or(config.qdrant.search_limit),
        )
        .await?;

    if hits.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    for (i, hit) in hits.iter().enumerate() {
        let Some(payload) = &hit.payload else {
            println!("  {}. {} (score: {:.3})", i + 1, hit.id, hit.score);
            continue;
        };
        let preview: String = if payload.text.chars().count() > 120 {
            format!("{}...", payload.text.chars().take(120).collect::<String>())
        } else {
            payload.text.clone()
        };
        println!(
            "  {}. [{}, {}, chunk {}] (score: {:.3})",
            i + 1,
            payload.numar_lege,
            payload.filename,
            payload.chunk,
            hit.score,
        );
        println!("     {preview}");
        println!();
    }

    Ok(())
}
