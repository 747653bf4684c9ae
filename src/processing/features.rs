//! Comparable feature sets derived from resumes and vacancies

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};

/// Normalized (position, skills, years) triple of one side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedFeatureSet {
    position: String,
    skills: Vec<String>,
    years_of_experience: f32,
}

impl AnalyzedFeatureSet {
    pub fn new(position: impl Into<String>, skills: Vec<String>, years_of_experience: f32) -> Result<Self> {
        if !years_of_experience.is_finite() || years_of_experience < 0.0 {
            return Err(MatcherError::Analysis(format!(
                "years of experience must be a finite non-negative number, got {}",
                years_of_experience
            )));
        }

        let skills = skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            position: position.into().trim().to_string(),
            skills,
            years_of_experience,
        })
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn years_of_experience(&self) -> f32 {
        self.years_of_experience
    }

    /// Position, skills and experience as one text for whole-profile similarity
    pub fn composite_text(&self) -> String {
        format!(
            "{} {} {} years",
            self.position,
            self.skills.join(" "),
            self.years_of_experience
        )
    }
}
