//! Input manager for loading request bodies from disk

use crate::error::{MatcherError, Result};
use crate::input::profile::{CandidateProfile, VacancyProfile};
use log::info;
use serde::de::DeserializeOwned;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    pub async fn load_resume(&self, path: &Path) -> Result<CandidateProfile> {
        self.load_json(path).await
    }

    pub async fn load_vacancy(&self, path: &Path) -> Result<VacancyProfile> {
        self.load_json(path).await
    }

    async fn load_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let text = self.read_text(path).await?;
        serde_json::from_str(&text).map_err(|e| {
            MatcherError::InvalidInput(format!("{}: malformed request body: {}", path.display(), e))
        })
    }

    pub async fn read_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        info!("Reading request body: {}", path.display());
        Ok(tokio::fs::read_to_string(path).await?)
    }
}
