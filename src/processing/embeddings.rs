//! Embedding vectors and the per-comparison embedding cache

use crate::llm::provider::EmbeddingProvider;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Vector for a text span, or the marker for "no signal"
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingVector {
    Available(Vec<f32>),
    Unavailable,
}

impl EmbeddingVector {
    /// Empty vectors carry no signal and become `Unavailable`
    pub fn from_values(values: Vec<f32>) -> Self {
        if values.is_empty() {
            EmbeddingVector::Unavailable
        } else {
            EmbeddingVector::Available(values)
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, EmbeddingVector::Available(_))
    }

    pub fn as_slice(&self) -> Option<&[f32]> {
        match self {
            EmbeddingVector::Available(values) => Some(values),
            EmbeddingVector::Unavailable => None,
        }
    }

    /// `None` whenever either side is unavailable, dimensions differ or a
    /// vector has zero norm, so no pair of non-signals ever looks similar.
    pub fn cosine_similarity(&self, other: &EmbeddingVector) -> Option<f32> {
        let (a, b) = (self.as_slice()?, other.as_slice()?);
        cosine_similarity(a, b)
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        None
    } else {
        Some(dot_product / (norm_a * norm_b))
    }
}

static UNAVAILABLE: EmbeddingVector = EmbeddingVector::Unavailable;

/// Embeddings for every distinct text a single comparison needs.
///
/// Built once per comparison and dropped with it; never shared between
/// comparisons.
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    vectors: HashMap<String, EmbeddingVector>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embed all distinct non-empty `texts` concurrently.
    ///
    /// Each request is bounded by `timeout`; failed, timed-out or panicked
    /// requests leave the text unavailable without affecting the others.
    pub async fn prefetch<I>(
        provider: Arc<dyn EmbeddingProvider>,
        texts: I,
        timeout: Duration,
    ) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let start_time = Instant::now();
        let mut cache = Self::new();
        let mut tasks = JoinSet::new();

        for text in texts {
            if text.trim().is_empty() || cache.vectors.contains_key(&text) {
                continue;
            }
            cache.vectors.insert(text.clone(), EmbeddingVector::Unavailable);

            let provider = Arc::clone(&provider);
            tasks.spawn(async move {
                let vector = match tokio::time::timeout(timeout, provider.embed(&text)).await {
                    Ok(vector) => vector,
                    Err(_) => {
                        warn!("Embedding request timed out after {:?}", timeout);
                        EmbeddingVector::Unavailable
                    }
                };
                (text, vector)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((text, vector)) => {
                    cache.vectors.insert(text, vector);
                }
                Err(e) => warn!("Embedding task failed: {}", e),
            }
        }

        debug!(
            "Prefetched {} embeddings ({} available) in {:.2?}",
            cache.len(),
            cache.available_count(),
            start_time.elapsed()
        );
        cache
    }

    pub fn insert(&mut self, text: impl Into<String>, vector: EmbeddingVector) {
        self.vectors.insert(text.into(), vector);
    }

    /// Unknown texts are reported as unavailable
    pub fn get(&self, text: &str) -> &EmbeddingVector {
        self.vectors.get(text).unwrap_or(&UNAVAILABLE)
    }

    pub fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        self.get(a).cosine_similarity(self.get(b))
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn available_count(&self) -> usize {
        self.vectors.values().filter(|v| v.is_available()).count()
    }
}
