//! Combines comparator outcomes into the final verdict

use crate::config::ScoringConfig;
use crate::matching::experience::ExperienceComparison;
use crate::matching::position::PositionComparison;
use crate::matching::skills::{SkillComparison, SkillMatchKind};
use serde::{Deserialize, Serialize};

/// Verdict returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_percentage: u8,
    #[serde(default)]
    pub matched: Vec<String>,
    pub didnt_match: Vec<String>,
}

/// Per-component points behind a `MatchResult`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub position_score: f32,
    pub experience_score: f32,
    pub skills_score: f32,
    /// Component sum on the 100-point scale
    pub base_score: f32,
    pub composite_similarity: Option<f32>,
    pub final_score: f32,
}

pub struct ScoreAggregator {
    config: ScoringConfig,
}

impl ScoreAggregator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn aggregate(
        &self,
        position: &PositionComparison,
        experience: &ExperienceComparison,
        skills: &SkillComparison,
        composite_similarity: Option<f32>,
    ) -> (MatchResult, ScoreBreakdown) {
        let weights = &self.config;
        let mut matched = Vec::new();
        let mut didnt_match = Vec::new();

        let position_score = if position.matched {
            matched.push(format!(
                "Position: '{}' matches '{}'",
                position.resume_position, position.job_position
            ));
            weights.position_weight
        } else {
            didnt_match.push(format!(
                "Position: '{}' does not match '{}'",
                position.resume_position, position.job_position
            ));
            weights.position_weight * weights.unmatched_position_fraction
        };

        let experience_score = weights.experience_weight * experience.coverage();
        if experience.satisfied {
            if experience.required_years > 0.0 {
                matched.push(format!(
                    "Work experience: {} years (required {}+)",
                    experience.candidate_years, experience.required_years
                ));
            } else {
                matched.push(format!(
                    "Work experience: {} years (no minimum required)",
                    experience.candidate_years
                ));
            }
        } else {
            didnt_match.push(format!(
                "Work experience: {} years (required {}+, short by {:.1} years)",
                experience.candidate_years, experience.required_years, experience.shortfall
            ));
        }

        let skills_score = weights.skills_weight * skills.coverage();
        for skill in &skills.matched {
            match skill.kind {
                SkillMatchKind::Partial => matched.push(format!("Skill: {} (partial)", skill.requirement)),
                _ => matched.push(format!("Skill: {}", skill.requirement)),
            }
        }
        if !skills.missing.is_empty() {
            didnt_match.push(format!("Missing skills: {}", skills.missing.join(", ")));
        }

        let base_score =
            (position_score + experience_score + skills_score) * 100.0 / weights.component_budget();

        let blended = match composite_similarity {
            Some(similarity) => {
                base_score * (1.0 - weights.embedding_blend) + similarity * 100.0 * weights.embedding_blend
            }
            None => base_score,
        };
        let final_score = if blended.is_finite() { blended.clamp(0.0, 100.0) } else { 0.0 };

        let result = MatchResult {
            match_percentage: final_score.round() as u8,
            matched,
            didnt_match,
        };
        let breakdown = ScoreBreakdown {
            position_score,
            experience_score,
            skills_score,
            base_score,
            composite_similarity,
            final_score,
        };

        (result, breakdown)
    }
}
