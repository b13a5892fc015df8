//! The on-disk embeddings dataset.
//!
//! A dataset is a JSON array of [`DatasetEntry`] objects, one per embedded
//! line: `{id, vector, payload: {text, an, numar_lege, cod_document, filename, chunk}}`.
//! [`writer`] produces it and [`validate`] checks it.

pub mod validate;
pub mod writer;

use serde::{Deserialize, Serialize};

use crate::corpus::TextRecord;

/// Searchable metadata stored alongside each vector.
pub type Payload = TextRecord;

/// One embedded line, ready for upload to the vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// 0-based position of the line within its batch run.
    pub id: u64,
    pub vector: Vec<f32>,
    pub payload: Payload,
}
