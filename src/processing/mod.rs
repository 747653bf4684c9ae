//! Feature extraction and analysis module

pub mod analyzer;
pub mod embeddings;
pub mod experience;
pub mod extractor;
pub mod features;
pub mod text_processor;

pub use analyzer::{MatchEngine, MatchReport};
pub use features::AnalyzedFeatureSet;
