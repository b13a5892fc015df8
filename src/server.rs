//! HTTP embedding service.
//!
//! Routes:
//! - `POST /embed` `{text}` → `{embedding}`
//! - `POST /embed-batch` `{input_dir}` → `{count, embeddings_file}`
//! - `GET /` → `{status, model}`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::config::LegisConfig;
use crate::embedding::{self, EmbeddingProvider};
use crate::error::EmbedError;
use crate::pipeline::{self, BatchOptions, BatchOutcome};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn EmbeddingProvider>,
    pub batch: BatchOptions,
}

#[derive(Debug, Deserialize)]
pub struct EmbedRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
pub struct EmbedBatchRequest {
    #[serde(default)]
    pub input_dir: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for EmbedError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %self, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/embed", post(embed))
        .route("/embed-batch", post(embed_batch))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        model: state.provider.model_name().to_string(),
    })
}

async fn embed(
    State(state): State<AppState>,
    Json(request): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>, EmbedError> {
    let text = request.text.unwrap_or_default();
    let provider = Arc::clone(&state.provider);

    let embedding = tokio::task::spawn_blocking(move || pipeline::embed_one(provider.as_ref(), &text))
        .await
        .map_err(|e| EmbedError::Embedding(e.into()))??;

    Ok(Json(EmbedResponse { embedding }))
}

async fn embed_batch(
    State(state): State<AppState>,
    Json(request): Json<EmbedBatchRequest>,
) -> Result<Json<BatchOutcome>, EmbedError> {
    // An empty path is passed on and fails the directory check with its own value.
    let input_dir = request
        .input_dir
        .ok_or_else(|| EmbedError::DirectoryNotFound("None".into()))?;
    tracing::info!(input_dir = %input_dir, "batch embedding requested");

    let provider = Arc::clone(&state.provider);
    let options = state.batch.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        pipeline::embed_directory(provider.as_ref(), &PathBuf::from(input_dir), &options)
    })
    .await
    .map_err(|e| EmbedError::Embedding(e.into()))??;

    tracing::info!(
        count = outcome.count,
        file = %outcome.embeddings_file.display(),
        "batch embedding complete"
    );
    Ok(Json(outcome))
}

/// Load the embedding model and serve HTTP until ctrl-c.
pub async fn serve(config: LegisConfig) -> Result<()> {
    let provider: Arc<dyn EmbeddingProvider> =
        Arc::from(embedding::create_provider(&config.embedding)?);
    tracing::info!(model = provider.model_name(), "embedding provider ready");

    let state = AppState {
        provider,
        batch: BatchOptions {
            file_name: config.dataset.file_name.clone(),
            show_progress: config.embedding.show_progress,
        },
    };

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "embedding service listening at http://{bind_addr}/");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down embedding service");
        })
        .await?;

    Ok(())
}
