//! Minimal Qdrant REST client: collection provisioning, point upload, search.
//!
//! Errors from Qdrant are passed through as-is (HTTP status plus response body).

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::dataset::{DatasetEntry, Payload};

/// Distance metric configured on a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    Cosine,
    Euclid,
    Dot,
    Manhattan,
}

impl std::str::FromStr for Distance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "euclid" => Ok(Self::Euclid),
            "dot" => Ok(Self::Dot),
            "manhattan" => Ok(Self::Manhattan),
            _ => Err(format!("unknown distance: {s}")),
        }
    }
}

/// One search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredPoint {
    pub id: Value,
    pub score: f32,
    pub payload: Option<Payload>,
}

#[derive(Debug, Deserialize)]
struct QdrantResponse<T> {
    result: T,
}

/// Handle to a Qdrant instance reached over HTTP.
#[derive(Clone)]
pub struct QdrantClient {
    client: Client,
    base_url: String,
}

impl QdrantClient {
    pub fn new(base_url: &str) -> Result<Self> {
        anyhow::ensure!(
            base_url.starts_with("http://") || base_url.starts_with("https://"),
            "Qdrant URL must be an http(s) URL, got {base_url}"
        );
        let client = Client::builder()
            .build()
            .context("failed to build Qdrant HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, name: &str) -> String {
        format!("{}/collections/{name}", self.base_url)
    }

    /// Drop `name` if it exists, then create it with the given vector config.
    ///
    /// Any existing points are discarded. Running it again leaves the same
    /// empty, identically configured collection.
    pub async fn recreate_collection(&self, name: &str, size: usize, distance: Distance) -> Result<()> {
        let url = self.collection_url(name);

        let resp = self.client.delete(&url).send().await?;
        let status = resp.status();
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Qdrant delete collection failed ({status}): {body}");
        }

        let body = json!({ "vectors": { "size": size, "distance": distance } });
        let resp = self.client.put(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Qdrant create collection failed ({status}): {body}");
        }

        tracing::info!(collection = name, size, ?distance, "collection recreated");
        Ok(())
    }

    /// Upsert dataset entries as points, `batch_size` per request.
    ///
    /// Every vector must have `vector_size` elements; otherwise nothing is sent.
    pub async fn upsert_points(
        &self,
        name: &str,
        entries: &[DatasetEntry],
        vector_size: usize,
        batch_size: usize,
    ) -> Result<usize> {
        if let Some(bad) = entries.iter().find(|e| e.vector.len() != vector_size) {
            anyhow::bail!(
                "invalid vector size for point id {}: {} (expected {vector_size})",
                bad.id,
                bad.vector.len()
            );
        }

        let url = format!("{}/points?wait=true", self.collection_url(name));
        for batch in entries.chunks(batch_size.max(1)) {
            let body = json!({ "points": batch });
            let resp = self.client.put(&url).json(&body).send().await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                anyhow::bail!("Qdrant upsert failed ({status}): {body}");
            }
            tracing::debug!(collection = name, points = batch.len(), "points upserted");
        }

        tracing::info!(collection = name, points = entries.len(), "upload complete");
        Ok(entries.len())
    }

    /// Nearest points to `vector`, with payloads.
    pub async fn search(&self, name: &str, vector: &[f32], limit: usize) -> Result<Vec<ScoredPoint>> {
        let url = format!("{}/points/search", self.collection_url(name));
        let body = json!({ "vector": vector, "limit": limit, "with_payload": true });
        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Qdrant search failed ({status}): {body}");
        }
        let parsed: QdrantResponse<Vec<ScoredPoint>> = resp
            .json()
            .await
            .context("failed to parse Qdrant search response")?;
        Ok(parsed.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_parses_case_insensitively() {
        assert_eq!("Cosine".parse::<Distance>().unwrap(), Distance::Cosine);
        assert_eq!("dot".parse::<Distance>().unwrap(), Distance::Dot);
        assert!("hamming".parse::<Distance>().is_err());
    }

    #[test]
    fn distance_serializes_as_qdrant_expects() {
        assert_eq!(serde_json::to_value(Distance::Cosine).unwrap(), json!("Cosine"));
    }

    #[test]
    fn rejects_non_http_url() {
        assert!(QdrantClient::new("localhost:6333").is_err());
        let client = QdrantClient::new("http://localhost:6333/").unwrap();
        assert_eq!(
            client.collection_url("proiect-senat"),
            "http://localhost:6333/collections/proiect-senat"
        );
    }
}
