#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::{Json, Router};
use legis_embed::embedding::{EmbeddingProvider, EMBEDDING_DIM};
use serde_json::{json, Value};

/// Deterministic provider: a unit spike whose position depends on the text.
pub struct FakeProvider {
    pub dim: usize,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self { dim: EMBEDDING_DIM }
    }
}

impl EmbeddingProvider for FakeProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let seed: usize = text.bytes().map(usize::from).sum();
        let mut v = vec![0.0f32; self.dim];
        v[seed % self.dim] = 1.0;
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        self.dim
    }

    fn model_name(&self) -> &str {
        "fake-minilm"
    }
}

/// Write `lines` joined by newlines to `dir/name`.
pub fn write_chunk(dir: &Path, name: &str, lines: &[&str]) {
    std::fs::write(dir.join(name), lines.join("\n")).unwrap();
}

/// Serve `router` on an ephemeral localhost port and return its address.
pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// In-process stand-in for the parts of the Qdrant REST API the client uses.
#[derive(Clone, Default)]
pub struct FakeQdrant {
    pub collections: Arc<Mutex<HashMap<String, FakeCollection>>>,
    pub create_calls: Arc<Mutex<usize>>,
}

#[derive(Clone, Debug)]
pub struct FakeCollection {
    pub vectors: Value,
    pub points: Vec<Value>,
}

impl FakeQdrant {
    pub fn router(&self) -> Router {
        Router::new()
            .route(
                "/collections/{name}",
                put(create_collection).delete(delete_collection),
            )
            .route("/collections/{name}/points", put(upsert_points))
            .route("/collections/{name}/points/search", post(search_points))
            .with_state(self.clone())
    }

    pub fn collection(&self, name: &str) -> Option<FakeCollection> {
        self.collections.lock().unwrap().get(name).cloned()
    }
}

async fn create_collection(
    State(qdrant): State<FakeQdrant>,
    UrlPath(name): UrlPath<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    *qdrant.create_calls.lock().unwrap() += 1;
    let mut collections = qdrant.collections.lock().unwrap();
    if collections.contains_key(&name) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"status": {"error": format!("Collection `{name}` already exists!")}})),
        );
    }
    collections.insert(
        name,
        FakeCollection {
            vectors: body["vectors"].clone(),
            points: Vec::new(),
        },
    );
    (StatusCode::OK, Json(json!({"result": true, "status": "ok"})))
}

async fn delete_collection(
    State(qdrant): State<FakeQdrant>,
    UrlPath(name): UrlPath<String>,
) -> Json<Value> {
    let removed = qdrant.collections.lock().unwrap().remove(&name).is_some();
    Json(json!({"result": removed, "status": "ok"}))
}

async fn upsert_points(
    State(qdrant): State<FakeQdrant>,
    UrlPath(name): UrlPath<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut collections = qdrant.collections.lock().unwrap();
    let Some(collection) = collections.get_mut(&name) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"status": {"error": format!("Collection `{name}` doesn't exist!")}})),
        );
    };
    if let Some(points) = body["points"].as_array() {
        collection.points.extend(points.iter().cloned());
    }
    (
        StatusCode::OK,
        Json(json!({"result": {"operation_id": 0, "status": "completed"}, "status": "ok"})),
    )
}

async fn search_points(
    State(qdrant): State<FakeQdrant>,
    UrlPath(name): UrlPath<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let collections = qdrant.collections.lock().unwrap();
    let Some(collection) = collections.get(&name) else {
        return (StatusCode::NOT_FOUND, Json(json!({"status": {"error": "missing"}})));
    };
    let limit = body["limit"].as_u64().unwrap_or(10) as usize;
    let hits: Vec<Value> = collection
        .points
        .iter()
        .take(limit)
        .enumerate()
        .map(|(rank, p)| {
            json!({
                "id": p["id"],
                "version": 0,
                "score": 1.0 - rank as f64 * 0.1,
                "payload": p["payload"],
            })
        })
        .collect();
    (StatusCode::OK, Json(json!({"result": hits, "status": "ok", "time": 0.001})))
}
