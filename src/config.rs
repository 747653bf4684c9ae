//! Configuration management for the vacancy matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `services.ollama_host`
pub const OLLAMA_HOST_ENV: &str = "OLLAMA_HOST";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub services: ServiceConfig,
    pub scoring: ScoringConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub enabled: bool,
    pub ollama_host: String,
    pub embedding_model: String,
    pub extraction_model: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub position_weight: f32,
    pub experience_weight: f32,
    pub skills_weight: f32,
    /// Share of the position points kept when titles do not match
    pub unmatched_position_fraction: f32,
    pub position_similarity_threshold: f32,
    pub skill_similarity_threshold: f32,
    pub partial_match_credit: f32,
    pub experience_tolerance: f32,
    pub embedding_blend: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub stop_word_language: StopWordLanguage,
    pub merge_overlapping_periods: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWordLanguage {
    Russian,
    English,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ollama_host: "http://localhost:11434".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            extraction_model: "llama3.2:3b".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            position_weight: 20.0,
            experience_weight: 20.0,
            skills_weight: 50.0,
            unmatched_position_fraction: 0.5,
            position_similarity_threshold: 0.5,
            skill_similarity_threshold: 0.8,
            partial_match_credit: 0.5,
            experience_tolerance: 0.8,
            embedding_blend: 0.3,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            stop_word_language: StopWordLanguage::Russian,
            merge_overlapping_periods: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl ScoringConfig {
    /// Sum of the three component weights
    pub fn component_budget(&self) -> f32 {
        self.position_weight + self.experience_weight + self.skills_weight
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("position_weight", self.position_weight),
            ("experience_weight", self.experience_weight),
            ("skills_weight", self.skills_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(MatcherError::Configuration(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.component_budget() <= 0.0 {
            return Err(MatcherError::Configuration(
                "scoring weights must sum to a positive total".to_string(),
            ));
        }

        let fractions = [
            ("unmatched_position_fraction", self.unmatched_position_fraction),
            ("position_similarity_threshold", self.position_similarity_threshold),
            ("skill_similarity_threshold", self.skill_similarity_threshold),
            ("partial_match_credit", self.partial_match_credit),
            ("experience_tolerance", self.experience_tolerance),
            ("embedding_blend", self.embedding_blend),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(MatcherError::Configuration(format!(
                    "scoring.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load from the default location, creating it with defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config.with_env_overrides())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.scoring.validate()?;
        Ok(config.with_env_overrides())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("vacancy-matcher")
            .join("config.toml")
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var(OLLAMA_HOST_ENV) {
            if !host.trim().is_empty() {
                self.services.ollama_host = host.trim().to_string();
            }
        }
        self
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))
    }
}
