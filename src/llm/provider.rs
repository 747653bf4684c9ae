//! Collaborator interfaces for the embedding and extraction services

use crate::error::{MatcherError, Result};
use crate::processing::embeddings::EmbeddingVector;
use async_trait::async_trait;

/// Turns text into a vector.
///
/// Implementations absorb their own failures and answer
/// `EmbeddingVector::Unavailable` instead of returning an error.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn embed(&self, text: &str) -> EmbeddingVector;
}

/// Free-form completion used for skill and experience extraction
#[async_trait]
pub trait ExtractionProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Provider used when external services are disabled; every signal is
/// unavailable so the deterministic fallback paths are taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

#[async_trait]
impl EmbeddingProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn embed(&self, _text: &str) -> EmbeddingVector {
        EmbeddingVector::Unavailable
    }
}

#[async_trait]
impl ExtractionProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(MatcherError::Extraction(
            "external services are disabled".to_string(),
        ))
    }
}
