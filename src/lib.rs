//! Embedding service and dataset tooling for a legal-document vector index.
//!
//! legis-embed turns a directory of chunked legal texts into a JSON dataset of
//! `(id, vector, payload)` records ready for a [Qdrant](https://qdrant.tech)
//! collection, checks such datasets, and provisions the collection.
//!
//! # Pipeline
//!
//! 1. [`corpus::filename`] decodes `05lege123_chunk1.txt`-style names into
//!    year, law number, document code and chunk index
//! 2. [`corpus::collector`] emits one record per non-empty line of each decodable file
//! 3. [`embedding`] computes 384-dimensional vectors with a local ONNX model
//! 4. [`dataset::writer`] writes `embeddings.json` next to the input directory
//! 5. [`dataset::validate`] re-reads a dataset and reports structural problems
//! 6. [`qdrant`] recreates the target collection and uploads datasets
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`server`] — The HTTP service (`/embed`, `/embed-batch`, `/`)
//! - [`pipeline`] — Directory-to-dataset batch runs

pub mod config;
pub mod corpus;
pub mod dataset;
pub mod embedding;
pub mod error;
pub mod pipeline;
pub mod qdrant;
pub mod server;
