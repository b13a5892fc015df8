//! Reading the chunked legal-text corpus.
//!
//! - [`filename`] decodes `<yy><titl><code>_chunk<N>.<ext>` names into [`FileMeta`]
//! - [`collector`] turns a directory of chunk files into [`TextRecord`]s
//! - [`chunker`] produces those chunk files from whole plain-text documents

pub mod chunker;
pub mod collector;
pub mod filename;

use serde::{Deserialize, Serialize};

/// Metadata decoded from a chunk file's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// Four-digit year, expanded from the two-digit prefix.
    pub year: i32,
    /// Law number in `Title/Year` form, e.g. `Lege/2005`.
    pub law: String,
    /// Document code following the title.
    pub code: String,
    /// The part of the file name before the first underscore.
    pub main_id: String,
    /// Chunk index within the original document.
    pub chunk: i64,
}

/// One non-empty line of one chunk file, tagged with that file's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub text: String,
    pub an: i32,
    pub numar_lege: String,
    pub cod_document: String,
    pub filename: String,
    pub chunk: i64,
}

impl TextRecord {
    pub fn new(text: impl Into<String>, meta: &FileMeta) -> Self {
        Self {
            text: text.into(),
            an: meta.year,
            numar_lege: meta.law.clone(),
            cod_document: meta.code.clone(),
            filename: meta.main_id.clone(),
            chunk: meta.chunk,
        }
    }
}
