//! Vacancy matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod matching;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use matching::MatchResult;
pub use processing::{MatchEngine, MatchReport};
