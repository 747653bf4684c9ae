//! Error handling for the vacancy matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Embedding service error: {0}")]
    Embedding(String),

    #[error("Extraction service error: {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Feature analysis failed: {0}")]
    Analysis(String),

    #[error("Comparison failed: {0}")]
    ComparisonFailed(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

impl MatcherError {
    /// True for errors caused by the request body rather than by the engine
    pub fn is_client_error(&self) -> bool {
        matches!(self, MatcherError::InvalidInput(_) | MatcherError::Serialization(_))
    }
}

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::Extraction(format!("{:#}", err))
    }
}

/// Transport failures talking to the embedding/extraction host
impl From<reqwest::Error> for MatcherError {
    fn from(err: reqwest::Error) -> Self {
        MatcherError::Network(err.to_string())
    }
}
