//! Accumulated experience against a required minimum

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceComparison {
    pub candidate_years: f32,
    pub required_years: f32,
    pub satisfied: bool,
    /// Years missing to the full requirement; 0 when the candidate has enough
    pub shortfall: f32,
}

impl ExperienceComparison {
    /// Share of the requirement covered, in [0, 1]
    pub fn coverage(&self) -> f32 {
        if self.satisfied || self.required_years <= 0.0 {
            1.0
        } else {
            (1.0 - self.shortfall / self.required_years).max(0.0)
        }
    }
}

/// Satisfied when the candidate reaches `tolerance` of the required years.
/// A requirement of zero or less is always satisfied.
pub fn compare_experience(candidate_years: f32, required_years: f32, tolerance: f32) -> ExperienceComparison {
    let satisfied = required_years <= 0.0 || candidate_years >= required_years * tolerance;
    let shortfall = (required_years - candidate_years).max(0.0);

    ExperienceComparison {
        candidate_years,
        required_years,
        satisfied,
        shortfall,
    }
}
