use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LegisConfig {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub dataset: DatasetConfig,
    pub qdrant: QdrantConfig,
    pub chunking: ChunkingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub cache_dir: String,
    /// Whether the ONNX graph takes a `token_type_ids` input (BERT exports do,
    /// XLM-R exports do not).
    pub token_type_ids: bool,
    pub show_progress: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatasetConfig {
    pub file_name: String,
    pub dimensions: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct QdrantConfig {
    pub url: String,
    pub collection: String,
    pub vector_size: usize,
    pub distance: String,
    pub upload_batch_size: usize,
    pub search_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            log_level: "info".into(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        let cache_dir = default_legis_dir()
            .join("models")
            .to_string_lossy()
            .into_owned();
        Self {
            provider: "local".into(),
            model: "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2".into(),
            cache_dir,
            token_type_ids: false,
            show_progress: true,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            file_name: "embeddings.json".into(),
            dimensions: crate::embedding::EMBEDDING_DIM,
        }
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6333".into(),
            collection: "proiect-senat".into(),
            vector_size: crate::embedding::EMBEDDING_DIM,
            distance: "Cosine".into(),
            upload_batch_size: 256,
            search_limit: 5,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_size: 1000 }
    }
}

/// Returns `~/.legis-embed/`
pub fn default_legis_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".legis-embed")
}

/// Returns the default config file path: `~/.legis-embed/config.toml`
pub fn default_config_path() -> PathBuf {
    default_legis_dir().join("config.toml")
}

impl LegisConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            LegisConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (LEGIS_LOG_LEVEL, LEGIS_PORT,
    /// LEGIS_QDRANT_URL, LEGIS_COLLECTION, LEGIS_MODEL_DIR).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LEGIS_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("LEGIS_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %val, "ignoring invalid LEGIS_PORT"),
            }
        }
        if let Ok(val) = std::env::var("LEGIS_QDRANT_URL") {
            self.qdrant.url = val;
        }
        if let Ok(val) = std::env::var("LEGIS_COLLECTION") {
            self.qdrant.collection = val;
        }
        if let Ok(val) = std::env::var("LEGIS_MODEL_DIR") {
            self.embedding.cache_dir = val;
        }
    }

    /// `host:port` the HTTP service binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
