pub mod chunk;
pub mod embed_batch;
pub mod provision;
pub mod search;
pub mod upload;
pub mod validate;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use legis_embed::config::{expand_tilde, EmbeddingConfig};
use std::path::Path;
use tokio::io::AsyncWriteExt;

const HF_BASE_URL: &str = "https://huggingface.co";

/// Hugging Face download URLs for the ONNX export and tokenizer of `model`.
fn model_urls(model: &str) -> (String, String) {
    (
        format!("{HF_BASE_URL}/{model}/resolve/main/onnx/model.onnx"),
        format!("{HF_BASE_URL}/{model}/resolve/main/tokenizer.json"),
    )
}

/// Download the ONNX embedding model and tokenizer to the cache directory.
pub async fn model_download(config: &EmbeddingConfig) -> Result<()> {
    let cache_dir = expand_tilde(&config.cache_dir);
    std::fs::create_dir_all(&cache_dir)
        .with_context(|| format!("failed to create cache dir: {}", cache_dir.display()))?;

    let (model_url, tokenizer_url) = model_urls(&config.model);
    let model_path = cache_dir.join("model.onnx");
    let tokenizer_path = cache_dir.join("tokenizer.json");

    if model_path.exists() {
        println!("Model already exists at {}", model_path.display());
    } else {
        println!("Downloading model.onnx for {}...", config.model);
        download_file(&model_url, &model_path).await?;
        println!("Model saved to {}", model_path.display());
    }

    if tokenizer_path.exists() {
        println!("Tokenizer already exists at {}", tokenizer_path.display());
    } else {
        println!("Downloading tokenizer.json...");
        download_file(&tokenizer_url, &tokenizer_path).await?;
        println!("Tokenizer saved to {}", tokenizer_path.display());
    }

    println!("Model download complete. Ready for use.");
    Ok(())
}

/// Download a file from a URL with progress bar. Uses atomic write (tmp + rename).
async fn download_file(url: &str, dest: &Path) -> Result<()> {
    let mut response = reqwest::get(url)
        .await
        .with_context(|| format!("HTTP request failed for {url}"))?;

    anyhow::ensure!(
        response.status().is_success(),
        "download failed with HTTP {}",
        response.status()
    );

    let pb = match response.content_length() {
        Some(size) => {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  {bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")?
                    .progress_chars("##-"),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };

    let tmp_path = dest.with_extension("tmp");
    let mut file = tokio::fs::File::create(&tmp_path)
        .await
        .with_context(|| format!("failed to create temp file: {}", tmp_path.display()))?;

    while let Some(chunk) = response.chunk().await.context("error reading response")? {
        file.write_all(&chunk)
            .await
            .context("error writing to file")?;
        pb.inc(chunk.len() as u64);
    }

    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp_path, dest)
        .await
        .context("failed to rename temp file")?;

    pb.finish_and_clear();
    Ok(())
}
