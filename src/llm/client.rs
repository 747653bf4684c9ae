//! HTTP client for an Ollama-compatible embedding and generation host

use crate::config::ServiceConfig;
use crate::error::{MatcherError, Result};
use crate::llm::provider::{EmbeddingProvider, ExtractionProvider};
use crate::processing::embeddings::EmbeddingVector;
use anyhow::Context;
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub struct OllamaClient {
    http: reqwest::Client,
    host: String,
    embedding_model: String,
    extraction_model: String,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("vacancy-matcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MatcherError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            host: config.ollama_host.trim_end_matches('/').to_string(),
            embedding_model: config.embedding_model.clone(),
            extraction_model: config.extraction_model.clone(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    async fn request_embedding(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let response = self
            .http
            .post(format!("{}/api/embed", self.host))
            .json(&EmbedRequest {
                model: &self.embedding_model,
                input: text,
            })
            .send()
            .await
            .context("sending embedding request")?
            .error_for_status()
            .context("embedding service returned an error status")?;

        let body: EmbedResponse = response
            .json()
            .await
            .context("decoding embedding response")?;

        body.embeddings
            .into_iter()
            .next()
            .context("embedding response contained no vectors")
    }

    async fn request_completion(&self, prompt: &str) -> anyhow::Result<String> {
        let response = self
            .http
            .post(format!("{}/api/generate", self.host))
            .json(&GenerateRequest {
                model: &self.extraction_model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .context("sending generation request")?
            .error_for_status()
            .context("generation service returned an error status")?;

        let body: GenerateResponse = response
            .json()
            .await
            .context("decoding generation response")?;
        Ok(body.response)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    fn name(&self) -> &str {
        &self.embedding_model
    }

    async fn embed(&self, text: &str) -> EmbeddingVector {
        let start_time = Instant::now();
        match self.request_embedding(text).await {
            Ok(values) => {
                debug!(
                    "Embedded {} chars into {} dims in {:.2?}",
                    text.len(),
                    values.len(),
                    start_time.elapsed()
                );
                EmbeddingVector::from_values(values)
            }
            Err(e) => {
                warn!("Embedding unavailable: {:#}", e);
                EmbeddingVector::Unavailable
            }
        }
    }
}

#[async_trait]
impl ExtractionProvider for OllamaClient {
    fn name(&self) -> &str {
        &self.extraction_model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let start_time = Instant::now();
        let text = self.request_completion(prompt).await?;
        debug!("Generation finished in {:.2?}", start_time.elapsed());
        Ok(text)
    }
}
