//! Embedding and extraction service integration

pub mod client;
pub mod prompts;
pub mod provider;

pub use client::OllamaClient;
pub use provider::{EmbeddingProvider, ExtractionProvider, OfflineProvider};
