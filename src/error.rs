//! Error types for the embedding pipeline.
//!
//! Caller-facing input problems ([`EmbedError::MissingText`],
//! [`EmbedError::DirectoryNotFound`], [`EmbedError::NoValidTexts`]) are kept
//! distinct from internal failures so the HTTP layer can answer with a 400.

use thiserror::Error;

/// Errors raised by the embed and batch operations.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("No text provided")]
    MissingText,
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("No valid texts found in directory.")]
    NoValidTexts,
    #[error("record/vector count mismatch: {records} records, {vectors} vectors")]
    LengthMismatch { records: usize, vectors: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),
}

impl EmbedError {
    /// True for errors caused by the request itself rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingText | Self::DirectoryNotFound(_) | Self::NoValidTexts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_classified() {
        assert!(EmbedError::MissingText.is_client_error());
        assert!(EmbedError::DirectoryNotFound("x".into()).is_client_error());
        assert!(EmbedError::NoValidTexts.is_client_error());
        assert!(!EmbedError::LengthMismatch {
            records: 1,
            vectors: 2
        }
        .is_client_error());
    }

    #[test]
    fn messages_match_api_details() {
        assert_eq!(
            EmbedError::DirectoryNotFound("/tmp/nope".into()).to_string(),
            "Directory not found: /tmp/nope"
        );
        assert_eq!(
            EmbedError::NoValidTexts.to_string(),
            "No valid texts found in directory."
        );
    }
}
