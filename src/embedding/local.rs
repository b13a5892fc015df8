//! Local ONNX Runtime embedding provider.
//!
//! Implements [`EmbeddingProvider`] for sentence-transformers models exported to
//! ONNX, via `ort`. Handles tokenization, inference, mean pooling, and L2 normalization.

use std::sync::Mutex;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;

use super::{EmbeddingProvider, EMBEDDING_DIM};
use crate::config::EmbeddingConfig;

/// Maximum sequence length fed to the model (MiniLM sentence models train at 128–256).
const MAX_SEQ_LEN: usize = 256;

/// Texts per inference run. Keeps padded tensors small on large batches.
const INFERENCE_BATCH: usize = 32;

/// Local ONNX-based embedding provider.
pub struct LocalEmbeddingProvider {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    model: String,
    token_type_ids: bool,
}

// Safety: Tokenizer is Send+Sync. Session is behind a Mutex.
// The Mutex guarantees exclusive access during run().
unsafe impl Send for LocalEmbeddingProvider {}
unsafe impl Sync for LocalEmbeddingProvider {}

impl LocalEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let cache_dir = crate::config::expand_tilde(&config.cache_dir);
        let model_path = cache_dir.join("model.onnx");
        let tokenizer_path = cache_dir.join("tokenizer.json");

        anyhow::ensure!(
            model_path.exists(),
            "ONNX model not found at {}. Run `legis-embed model download` first.",
            model_path.display()
        );
        anyhow::ensure!(
            tokenizer_path.exists(),
            "Tokenizer not found at {}. Run `legis-embed model download` first.",
            tokenizer_path.display()
        );

        let session = Session::builder()?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .commit_from_file(&model_path)
            .context("failed to load ONNX model")?;

        tracing::info!(model = %model_path.display(), "ONNX model loaded");

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("failed to load tokenizer: {e}"))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("failed to set truncation: {e}"))?;

        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            strategy: tokenizers::PaddingStrategy::BatchLongest,
            ..Default::default()
        }));

        tracing::info!(tokenizer = %tokenizer_path.display(), "tokenizer loaded");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            model: config.model.clone(),
            token_type_ids: config.token_type_ids,
        })
    }

    /// Tokenize, run, and pool one inference batch.
    fn run_inference(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("tokenization failed: {e}"))?;

        let batch_size = encodings.len();
        let seq_len = encodings[0].get_ids().len();

        let mut input_ids_flat = Vec::with_capacity(batch_size * seq_len);
        let mut attention_mask_flat = Vec::with_capacity(batch_size * seq_len);

        for encoding in &encodings {
            input_ids_flat.extend(encoding.get_ids().iter().map(|&id| id as i64));
            attention_mask_flat.extend(encoding.get_attention_mask().iter().map(|&m| m as i64));
        }

        let shape = vec![batch_size as i64, seq_len as i64];
        let input_ids_tensor =
            Tensor::from_array((shape.clone(), input_ids_flat.into_boxed_slice()))?;
        let attention_mask_tensor =
            Tensor::from_array((shape.clone(), attention_mask_flat.clone().into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("session lock poisoned: {e}"))?;

        let outputs = if self.token_type_ids {
            // Single sentence, no segment B
            let token_type_ids = vec![0i64; batch_size * seq_len];
            let token_type_ids_tensor =
                Tensor::from_array((shape, token_type_ids.into_boxed_slice()))?;
            session.run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor,
            })?
        } else {
            session.run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
            })?
        };

        // Shape [batch, seq_len, 384]. The output name varies by ONNX export.
        let token_emb_value = outputs
            .get("token_embeddings")
            .or_else(|| outputs.get("last_hidden_state"))
            .unwrap_or_else(|| &outputs[0]);

        let (shape, data) = token_emb_value
            .try_extract_tensor::<f32>()
            .context("failed to extract token_embeddings tensor")?;

        let dims: &[i64] = &shape;
        anyhow::ensure!(
            dims.len() == 3 && dims[2] == EMBEDDING_DIM as i64,
            "unexpected token_embeddings shape: {dims:?}, expected [batch, seq, {EMBEDDING_DIM}]"
        );
        anyhow::ensure!(
            dims[0] as usize == batch_size && dims[1] as usize == seq_len,
            "token_embeddings shape {dims:?} does not match input [{batch_size}, {seq_len}]"
        );
        let hidden_dim = dims[2] as usize;
        let stride = seq_len * hidden_dim;

        Ok((0..batch_size)
            .map(|b| {
                let mask = &attention_mask_flat[b * seq_len..(b + 1) * seq_len];
                let tokens = &data[b * stride..(b + 1) * stride];
                l2_normalize(&mean_pool(tokens, mask, hidden_dim))
            })
            .collect())
    }
}

impl EmbeddingProvider for LocalEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.run_inference(&[text])?
            .into_iter()
            .next()
            .context("model returned no embedding")
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for batch in texts.chunks(INFERENCE_BATCH) {
            results.extend(self.run_inference(batch)?);
        }
        Ok(results)
    }

    fn embed_batch_with_progress(
        &self,
        texts: &[&str],
        progress: &ProgressBar,
    ) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for batch in texts.chunks(INFERENCE_BATCH) {
            results.extend(self.run_inference(batch)?);
            progress.inc(batch.len() as u64);
        }
        Ok(results)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Average token vectors over positions where `mask` is set.
fn mean_pool(tokens: &[f32], mask: &[i64], hidden_dim: usize) -> Vec<f32> {
    let mut sum = vec![0.0f32; hidden_dim];
    let mut count = 0.0f32;

    for (s, &m) in mask.iter().enumerate() {
        if m > 0 {
            let row = &tokens[s * hidden_dim..(s + 1) * hidden_dim];
            for (acc, x) in sum.iter_mut().zip(row) {
                *acc += x;
            }
            count += 1.0;
        }
    }

    if count > 0.0 {
        for x in &mut sum {
            *x /= count;
        }
    }
    sum
}

/// L2-normalize a vector. Returns a zero vector if the input norm is zero.
fn l2_normalize(v: &[f32]) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}
