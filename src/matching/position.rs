//! Job title comparison

use crate::processing::embeddings::EmbeddingCache;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionMethod {
    Embedding,
    TokenOverlap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionComparison {
    pub resume_position: String,
    pub job_position: String,
    pub matched: bool,
    pub similarity: Option<f32>,
    pub method: PositionMethod,
}

pub struct PositionComparator {
    similarity_threshold: f32,
}

impl PositionComparator {
    pub fn new(similarity_threshold: f32) -> Self {
        Self { similarity_threshold }
    }

    /// Cosine similarity of the normalized titles when both embeddings are
    /// available, token overlap otherwise.
    pub fn compare(
        &self,
        resume_position: &str,
        job_position: &str,
        processor: &TextProcessor,
        embeddings: &EmbeddingCache,
    ) -> PositionComparison {
        let resume_normalized = processor.normalize(resume_position);
        let job_normalized = processor.normalize(job_position);

        let (matched, similarity, method) = match embeddings.similarity(&resume_normalized, &job_normalized) {
            Some(similarity) => (
                similarity >= self.similarity_threshold,
                Some(similarity),
                PositionMethod::Embedding,
            ),
            None => (
                token_overlap_match(
                    &processor.token_set(resume_position),
                    &processor.token_set(job_position),
                ),
                None,
                PositionMethod::TokenOverlap,
            ),
        };

        PositionComparison {
            resume_position: resume_position.to_string(),
            job_position: job_position.to_string(),
            matched,
            similarity,
            method,
        }
    }
}

/// Titles match when they share at least half of the smaller token set,
/// and always at least one token.
pub fn token_overlap_match(a: &HashSet<String>, b: &HashSet<String>) -> bool {
    let shared = a.intersection(b).count() as f32;
    let required = (a.len().min(b.len()) as f32 / 2.0).max(1.0);
    shared >= required
}
