//! Directory-to-dataset batch run: collect, embed, write.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::corpus::collector::collect_records;
use crate::dataset::writer::{build_entries, output_path_for, write_dataset};
use crate::embedding::{embed_texts, EmbeddingProvider};
use crate::error::EmbedError;

/// Result of a batch run, also the `/embed-batch` response body.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub count: usize,
    pub embeddings_file: PathBuf,
}

/// Options for [`embed_directory`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// File name of the dataset written next to the input directory.
    pub file_name: String,
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            file_name: "embeddings.json".into(),
            show_progress: false,
        }
    }
}

/// Embed every line of every decodable chunk file in `input_dir` and write the
/// dataset to the input directory's parent.
pub fn embed_directory(
    provider: &dyn EmbeddingProvider,
    input_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchOutcome, EmbedError> {
    let records = collect_records(input_dir)?;

    let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
    let vectors =
        embed_texts(provider, &texts, options.show_progress).map_err(EmbedError::Embedding)?;

    let entries = build_entries(records, vectors)?;
    let embeddings_file = output_path_for(input_dir, &options.file_name);
    write_dataset(&embeddings_file, &entries)?;

    Ok(BatchOutcome {
        count: entries.len(),
        embeddings_file,
    })
}

/// Embed a single non-empty text.
pub fn embed_one(provider: &dyn EmbeddingProvider, text: &str) -> Result<Vec<f32>, EmbedError> {
    if text.is_empty() {
        return Err(EmbedError::MissingText);
    }
    provider.embed(text).map_err(EmbedError::Embedding)
}
