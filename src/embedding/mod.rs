//! Text-to-vector embedding pipeline.
//!
//! Provides the [`EmbeddingProvider`] trait and a local implementation running
//! an ONNX sentence-embedding model (384 dimensions, L2-normalized). The
//! provider is created via [`create_provider`] from configuration.

pub mod local;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Number of dimensions in the embedding vectors.
pub const EMBEDDING_DIM: usize = 384;

/// Trait for embedding text into vectors.
///
/// Implementations produce vectors of exactly [`EmbeddingProvider::dimensions`]
/// length. All methods are synchronous — callers in async contexts should use
/// `tokio::task::spawn_blocking`.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of text strings. Implementations may override for batched inference.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Same as [`embed_batch`](Self::embed_batch), advancing `progress` as
    /// inputs are processed.
    fn embed_batch_with_progress(
        &self,
        texts: &[&str],
        progress: &ProgressBar,
    ) -> Result<Vec<Vec<f32>>> {
        let vectors = self.embed_batch(texts)?;
        progress.inc(texts.len() as u64);
        Ok(vectors)
    }

    /// Return the number of dimensions this provider produces.
    fn dimensions(&self) -> usize {
        EMBEDDING_DIM
    }

    /// Identifier of the underlying model, reported by the health endpoint.
    fn model_name(&self) -> &str;
}

/// Embed `texts` with a single provider call, one vector per input in order.
///
/// When `show_progress` is set a terminal progress bar tracks the call; it has
/// no effect on the result.
pub fn embed_texts(
    provider: &dyn EmbeddingProvider,
    texts: &[&str],
    show_progress: bool,
) -> Result<Vec<Vec<f32>>> {
    if !show_progress {
        return provider.embed_batch(texts);
    }

    let pb = ProgressBar::new(texts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Batches {bar:40.cyan/blue} {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    let vectors = provider.embed_batch_with_progress(texts, &pb)?;
    pb.finish_and_clear();
    Ok(vectors)
}

/// Create an embedding provider from config.
///
/// Currently only `"local"` is supported (ONNX Runtime).
/// Returns an error if model files are not found — run `legis-embed model download` first.
pub fn create_provider(
    config: &crate::config::EmbeddingConfig,
) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "local" => {
            let provider = local::LocalEmbeddingProvider::new(config)?;
            Ok(Box::new(provider))
        }
        other => anyhow::bail!("unknown embedding provider: {other}. Supported: local"),
    }
}
